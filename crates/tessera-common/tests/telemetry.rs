//! Subscriber installation tests
//!
//! The global subscriber can only be installed once per process, so both
//! checks live in one test.

use tessera_common::telemetry::{init_telemetry, LogFormat, TelemetryConfig, TelemetryError};

#[test]
fn story_subscriber_installs_once() {
    let config = TelemetryConfig {
        service_name: "tessera-test".to_string(),
        format: LogFormat::Compact,
    };

    init_telemetry(config.clone()).expect("first initialization should succeed");
    tracing::debug!(kind = "Applications.Connector/redisCaches", "after init");

    let err = init_telemetry(config).expect_err("second initialization should fail");
    assert!(matches!(err, TelemetryError::SubscriberInit(_)));
}
