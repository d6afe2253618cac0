//! Listener setup for the broker's network endpoints.
//!
//! Binds the plaintext, TLS, and WebSocket listeners named by the resolved
//! configuration and pairs the TLS-facing ones with an acceptor derived from
//! the trust context. The gateway stops once every configured socket is
//! bound; accepting sessions and speaking the protocol belong to the engine.

use crate::config::Config;
use crate::network::tls::TrustContext;
use anyhow::Context as _;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::info;

/// A bound WebSocket endpoint: the listener, the request path clients must
/// use, and the acceptor when the endpoint is served over TLS.
pub struct WsEndpoint {
    pub listener: TcpListener,
    pub path: String,
    pub acceptor: Option<TlsAcceptor>,
}

/// Bound network endpoints, ready to hand to the session engine.
pub struct Gateway {
    plaintext: Option<TcpListener>,
    tls: Option<(TcpListener, TlsAcceptor)>,
    websocket: Option<WsEndpoint>,
}

impl Gateway {
    /// Bind every listener the configuration names.
    ///
    /// `trust` must be present when the TLS listener is configured, or when
    /// the WebSocket listener is configured to run over TLS. Any bind
    /// failure aborts startup before the broker advertises readiness.
    pub async fn bind(config: &Config, trust: Option<&TrustContext>) -> anyhow::Result<Self> {
        let plaintext = if config.port.is_empty() {
            None
        } else {
            let addr = listen_addr(&config.host, &config.port);
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind plaintext listener on {addr}"))?;
            info!(%addr, "plaintext listener bound");
            Some(listener)
        };

        let tls = if config.tls_port.is_empty() {
            None
        } else {
            let trust = trust.context("tls listener configured without trust material")?;
            let addr = listen_addr(&config.tls_host, &config.tls_port);
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind tls listener on {addr}"))?;
            info!(%addr, client_auth = ?trust.client_auth(), "tls listener bound");
            Some((listener, trust.acceptor()))
        };

        let websocket = if config.ws_port.is_empty() {
            None
        } else {
            let acceptor = if config.ws_tls {
                let trust =
                    trust.context("tls websocket listener configured without trust material")?;
                Some(trust.acceptor())
            } else {
                None
            };
            let addr = listen_addr(&config.host, &config.ws_port);
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind websocket listener on {addr}"))?;
            info!(%addr, path = %config.ws_path, tls = config.ws_tls, "websocket listener bound");
            Some(WsEndpoint {
                listener,
                path: config.ws_path.clone(),
                acceptor,
            })
        };

        Ok(Self {
            plaintext,
            tls,
            websocket,
        })
    }

    /// Local address of the plaintext listener, if bound.
    pub fn plaintext_addr(&self) -> Option<SocketAddr> {
        self.plaintext.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Local address of the TLS listener, if bound.
    pub fn tls_addr(&self) -> Option<SocketAddr> {
        self.tls.as_ref().and_then(|(l, _)| l.local_addr().ok())
    }

    /// Local address of the WebSocket listener, if bound.
    pub fn websocket_addr(&self) -> Option<SocketAddr> {
        self.websocket
            .as_ref()
            .and_then(|ws| ws.listener.local_addr().ok())
    }

    /// Hand the bound endpoints to the session engine.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Option<TcpListener>,
        Option<(TcpListener, TlsAcceptor)>,
        Option<WsEndpoint>,
    ) {
        (self.plaintext, self.tls, self.websocket)
    }
}

fn listen_addr(host: &str, port: &str) -> String {
    format!("{host}:{port}")
}
