//! Global subscriber installation. Kept in its own test binary so the
//! installed subscriber does not leak into other tests.

use rho_kernel::{initialize_logging, LoggingConfig, RhoError};

#[test]
fn second_installation_fails() {
    let config = LoggingConfig { level: "warn".to_string(), format: "json".to_string() };
    initialize_logging(&config).unwrap();
    assert!(matches!(initialize_logging(&config), Err(RhoError::Logging(_))));
}
