use super::*;

fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned())
    }
}

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("HOST", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.host, DEFAULT_HOST);
}

#[test]
fn parses_port_and_host() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "8080"), ("HOST", "127.0.0.1")])).unwrap();
    assert_eq!(cfg.addr().to_string(), "127.0.0.1:8080");
}

#[test]
fn rejects_non_numeric_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort("http".into()));
}

#[test]
fn rejects_port_zero_and_overflow() {
    assert!(matches!(
        ServerConfig::from_lookup(lookup(&[("PORT", "0")])),
        Err(ConfigError::InvalidPort(_))
    ));
    assert!(matches!(
        ServerConfig::from_lookup(lookup(&[("PORT", "70000")])),
        Err(ConfigError::InvalidPort(_))
    ));
}

#[test]
fn rejects_bad_host() {
    let err = ServerConfig::from_lookup(lookup(&[("HOST", "localhost")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidHost("localhost".into()));
}

#[test]
fn from_env_reads_process_environment() {
    // Only this test touches PORT/HOST in the process environment.
    unsafe {
        std::env::set_var("PORT", "4321");
        std::env::remove_var("HOST");
    }
    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 4321);
    unsafe { std::env::remove_var("PORT") };
}
