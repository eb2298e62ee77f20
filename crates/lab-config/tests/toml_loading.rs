//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed working directories and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use lab_config::{ConfigError, LabConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_server_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
host = "0.0.0.0"
port = 8088
body_limit_bytes = 4096
"#,
        )?;

        let config: LabConfig = Figment::from(Serialized::defaults(LabConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.body_limit_bytes, 4096);
        Ok(())
    });
}

#[test]
fn loads_sandbox_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[sandbox]
threads = 2
memory_limit = "256MB"
allow_external_access = false
"#,
        )?;

        let config: LabConfig = Figment::from(Serialized::defaults(LabConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.sandbox.threads, Some(2));
        assert_eq!(config.sandbox.memory_limit.as_deref(), Some("256MB"));
        assert!(!config.sandbox.allow_external_access);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[server]\nport = 9000\n")?;

        let config: LabConfig = Figment::from(Serialized::defaults(LabConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.sandbox.allow_external_access);
        Ok(())
    });
}

#[test]
fn local_lab_toml_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_file(lab_config::LOCAL_CONFIG_FILE, "[server]\nport = 4321\n")?;

        let config = LabConfig::load().expect("config loads");
        assert_eq!(config.server.port, 4321);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(lab_config::LOCAL_CONFIG_FILE, "[sandbox]\nthreads = 0\n")?;

        let err = LabConfig::load().expect_err("zero threads is invalid");
        assert!(
            matches!(&err, ConfigError::InvalidValue { field, .. } if field == "sandbox.threads"),
            "unexpected error: {err}"
        );
        Ok(())
    });
}
