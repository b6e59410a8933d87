use crate::config::transport::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_WRITE_TIMEOUT, ENV_ACCEPT_INVALID_CERTS, ENV_CA_FILE,
    ENV_CLIENT_CERT, ENV_CLIENT_KEY, ENV_CONNECT_TIMEOUT, ENV_READ_WRITE_TIMEOUT,
    ENV_USE_CLIENT_CERTS,
};
use crate::config::{ClientConfig, DEFAULT_API_VERSION, DEFAULT_BOUNDARY, TransportConfig};
use crate::error::config::ConfigError;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

/// **VALUE**: Verifies trailing slashes never reach endpoint URLs.
///
/// **WHY THIS MATTERS**: Users paste server URLs straight from the browser
/// (`https://tableau.example.com/`). A leftover slash yields `//api/...`, which some
/// reverse proxies reject outright.
///
/// **BUG THIS CATCHES**: Would catch removal of the normalisation in `ClientConfig::new`.
#[test]
fn given_server_with_trailing_slashes_when_config_created_then_slashes_stripped() {
    // GIVEN/WHEN: A padded server URL with trailing slashes
    let config = ClientConfig::new("  https://tableau.example.com//  ").unwrap();

    // THEN: Stored without them and the API base is well formed
    assert_eq!(config.server(), "https://tableau.example.com");
    assert_eq!(config.api_base(), "https://tableau.example.com/api/2.0");
}

#[test]
fn given_server_without_trailing_slash_when_config_created_then_unchanged() {
    assert_eq!(ClientConfig::new("http://host").unwrap().server(), "http://host");
    assert_eq!(ClientConfig::new("http://host/").unwrap().server(), "http://host");
}

#[test]
fn given_new_config_then_defaults_applied() {
    let config = ClientConfig::new("http://localhost:8000").unwrap();

    assert_eq!(config.version(), DEFAULT_API_VERSION);
    assert_eq!(config.boundary(), DEFAULT_BOUNDARY);
    assert_eq!(config.transport(), &TransportConfig::default());
    assert!(!config.debug());
    assert!(config.validate().is_ok());
}

#[test]
fn given_invalid_server_url_when_config_created_then_invalid_server_url_error() {
    for server in ["tableau.example.com", "ftp://tableau.example.com", "https://h/?x=1", ""] {
        let err = ClientConfig::new(server).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidServerUrl { .. }),
            "expected InvalidServerUrl for {server:?}, got {err:?}"
        );
    }
}

#[test]
fn given_server_with_path_prefix_when_config_created_then_prefix_kept() {
    let config = ClientConfig::new("https://example.com/tableau/")
        .unwrap()
        .with_version("3.4");

    assert_eq!(config.api_base(), "https://example.com/tableau/api/3.4");
}

#[test]
fn given_unusable_version_or_boundary_when_validated_then_validation_error() {
    let base = ClientConfig::new("http://localhost:8000").unwrap();

    let cases = [
        base.clone().with_version(""),
        base.clone().with_version("2.0/extra"),
        base.clone().with_version("2.0?x"),
        base.clone().with_version("2.0#y"),
        base.clone().with_version("v2"),
        base.clone().with_boundary(""),
        base.clone().with_boundary("has space"),
        base.clone().with_boundary("quo\"te"),
        base.clone().with_boundary("x".repeat(71)),
    ];

    for config in cases {
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "expected validation failure for {config:?}"
        );
    }
    assert!(base.clone().with_boundary("x".repeat(70)).validate().is_ok());
    assert!(base.with_version("3.19").validate().is_ok());
}

#[test]
fn given_no_variables_when_transport_loaded_then_defaults() {
    let config = TransportConfig::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    assert_eq!(config.read_write_timeout, DEFAULT_READ_WRITE_TIMEOUT);
    assert!(!config.use_client_certificates);
    assert!(!config.accept_invalid_certs);
    assert_eq!(config.tls.identity_paths(), None);
}

/// **VALUE**: Verifies every transport variable is read and parsed.
///
/// **BUG THIS CATCHES**: Would catch a renamed variable constant or a swapped
/// connect/read-write assignment.
#[test]
fn given_all_variables_when_transport_loaded_then_each_is_applied() {
    // GIVEN: Every supported variable set
    let lookup = lookup_from(&[
        (ENV_CONNECT_TIMEOUT, "3s"),
        (ENV_READ_WRITE_TIMEOUT, "1m 30s"),
        (ENV_USE_CLIENT_CERTS, "yes"),
        (ENV_ACCEPT_INVALID_CERTS, "FALSE"),
        (ENV_CLIENT_CERT, "/etc/tableau/client.pem"),
        (ENV_CLIENT_KEY, "/etc/tableau/client.key"),
        (ENV_CA_FILE, "/etc/tableau/ca.pem"),
    ]);

    // WHEN: Loading
    let config = TransportConfig::from_lookup(lookup).unwrap();

    // THEN: All applied
    assert_eq!(config.connect_timeout, Duration::from_secs(3));
    assert_eq!(config.read_write_timeout, Duration::from_secs(90));
    assert!(config.use_client_certificates);
    assert!(!config.accept_invalid_certs);
    assert_eq!(
        config.tls.cert_path,
        Some(PathBuf::from("/etc/tableau/client.pem"))
    );
    assert_eq!(
        config.tls.key_path,
        Some(PathBuf::from("/etc/tableau/client.key"))
    );
    assert_eq!(config.tls.ca_path, Some(PathBuf::from("/etc/tableau/ca.pem")));
}

#[test]
fn given_empty_variable_when_transport_loaded_then_treated_as_unset() {
    let lookup = lookup_from(&[(ENV_CONNECT_TIMEOUT, "  "), (ENV_CLIENT_CERT, "")]);

    let config = TransportConfig::from_lookup(lookup).unwrap();

    assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    assert_eq!(config.tls.cert_path, None);
}

#[test]
fn given_unparsable_duration_when_transport_loaded_then_invalid_env_value_names_variable() {
    let err = TransportConfig::from_lookup(lookup_from(&[(ENV_READ_WRITE_TIMEOUT, "soon")]))
        .unwrap_err();

    match err {
        ConfigError::InvalidEnvValue {
            variable, value, ..
        } => {
            assert_eq!(variable, ENV_READ_WRITE_TIMEOUT);
            assert_eq!(value, "soon");
        }
        other => panic!("expected InvalidEnvValue, got {other:?}"),
    }
}

#[test]
fn given_unparsable_bool_when_transport_loaded_then_invalid_env_value() {
    let err = TransportConfig::from_lookup(lookup_from(&[(ENV_ACCEPT_INVALID_CERTS, "maybe")]))
        .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidEnvValue { .. }));
    assert!(err.to_string().contains(ENV_ACCEPT_INVALID_CERTS));
}

#[test]
fn given_zero_timeout_when_transport_loaded_then_validation_error() {
    let err =
        TransportConfig::from_lookup(lookup_from(&[(ENV_CONNECT_TIMEOUT, "0s")])).unwrap_err();

    assert!(matches!(err, ConfigError::ValidationError { .. }));
}
