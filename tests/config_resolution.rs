//! End-to-end configuration resolution.
//!
//! Drives the public resolve() entry point the way the binary does: flag
//! mode, file mode, and the validation fills that run after either.

mod common;

use beacond::config::{self, Config, ConfigError};

#[test]
fn defaults_match_the_documented_record() {
    let config = config::resolve(["beacond"]).unwrap();
    assert_eq!(config.regular_workers, 1024);
    assert_eq!(config.special_workers, 1024);
    assert_eq!(config.supreme_workers, 1024);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, "1883");
    assert_eq!(config.tls_host, "");
    assert_eq!(config.tls_port, "");
    assert_eq!(config.ws_port, "");
    assert_eq!(config.ws_path, "");
    assert!(!config.ws_tls);
    assert!(!config.acl);
    assert_eq!(config.acl_conf, "");
    assert!(!config.debug);
}

#[test]
fn file_mode_matches_the_decoded_content_field_for_field() {
    let (_dir, path) = common::write_config(
        r#"{
            "regularWorkerNum": 2048,
            "host": "192.0.2.1",
            "port": "2883",
            "tlsHost": "192.0.2.2",
            "tlsPort": "8883",
            "tlsInfo": {
                "verify": true,
                "caFile": "ca.pem",
                "certFile": "server.pem",
                "keyFile": "server.key"
            },
            "wsPort": "9001",
            "wsPath": "/mqtt",
            "wsTLS": true,
            "acl": true,
            "aclConf": "acl.conf",
            "debug": true
        }"#,
    );
    let config = config::resolve(["beacond", "-c", path.to_str().unwrap()]).unwrap();
    assert_eq!(config.regular_workers, 2048);
    assert_eq!(config.host, "192.0.2.1");
    assert_eq!(config.port, "2883");
    assert_eq!(config.tls_host, "192.0.2.2");
    assert_eq!(config.tls_port, "8883");
    assert!(config.tls_info.verify);
    assert_eq!(config.tls_info.ca_file, "ca.pem");
    assert_eq!(config.tls_info.cert_file, "server.pem");
    assert_eq!(config.tls_info.key_file, "server.key");
    assert_eq!(config.ws_port, "9001");
    assert_eq!(config.ws_path, "/mqtt");
    assert!(config.ws_tls);
    assert!(config.acl);
    assert_eq!(config.acl_conf, "acl.conf");
    assert!(config.debug);
    // Counts the file left unset are still default-filled afterward.
    assert_eq!(config.special_workers, 1024);
    assert_eq!(config.supreme_workers, 1024);
}

#[test]
fn file_mode_fills_missing_hosts() {
    let (_dir, path) = common::write_config(
        r#"{
            "port": "1883",
            "tlsPort": "8883",
            "tlsInfo": {"certFile": "server.pem", "keyFile": "server.key"}
        }"#,
    );
    let config = config::resolve(["beacond", "-c", path.to_str().unwrap()]).unwrap();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.tls_host, "0.0.0.0");
}

#[test]
fn file_mode_without_ports_implies_no_listeners() {
    let (_dir, path) = common::write_config("{}");
    let config = config::resolve(["beacond", "-c", path.to_str().unwrap()]).unwrap();
    assert_eq!(config.port, "");
    assert_eq!(config.host, "");
    assert_eq!(config.tls_port, "");
}

#[test]
fn tls_port_without_material_fails_resolution() {
    let (_dir, path) = common::write_config(r#"{"tlsPort": "8883"}"#);
    let err = config::resolve(["beacond", "-c", path.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("certFile and keyFile"));
}

#[test]
fn tls_material_presence_is_checked_without_the_filesystem() {
    let (_dir, path) = common::write_config(
        r#"{
            "tlsPort": "8883",
            "tlsInfo": {"certFile": "/no/such/cert.pem", "keyFile": "/no/such/key.pem"}
        }"#,
    );
    // Paths do not exist; validation only checks that the fields are set.
    let config = config::resolve(["beacond", "-c", path.to_str().unwrap()]).unwrap();
    assert_eq!(config.tls_info.cert_file, "/no/such/cert.pem");
}

#[test]
fn malformed_file_yields_no_partial_record() {
    let (_dir, path) = common::write_config(r#"{"port": 1883}"#);
    let result: Result<Config, ConfigError> =
        config::resolve(["beacond", "-c", path.to_str().unwrap()]);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn unreadable_file_fails_with_the_path() {
    let err = config::resolve(["beacond", "-c", "/no/such/beacond.json"]).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/no/such/beacond.json"));
}
