use super::*;
use serial_test::serial;
use std::env;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_fundmatch_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("FUNDMATCH_TOP_N");
        env::remove_var("FUNDMATCH_WORKERS");
        env::remove_var("FUNDMATCH_EXPLANATION_TTL_SECS");
        env::remove_var("FUNDMATCH_EXPLANATION_CAPACITY");
        env::remove_var("FUNDMATCH_EXPLAINER_TIMEOUT_SECS");
        env::remove_var("FUNDMATCH_PROMPT_VERSION");
        env::remove_var("FUNDMATCH_MODEL");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.top_n, 10);
    assert!(config.workers >= 1);
    assert_eq!(config.explanation_ttl, Duration::from_secs(86_400));
    assert_eq!(config.explanation_capacity, 10_000);
    assert_eq!(config.explainer_timeout, Duration::from_secs(20));
    assert_eq!(config.prompt_version, "v1");
    assert_eq!(config.model, DEFAULT_MODEL);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_fundmatch_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_fundmatch_env();

    let config = with_env_vars(
        &[
            ("FUNDMATCH_TOP_N", "3"),
            ("FUNDMATCH_WORKERS", "2"),
            ("FUNDMATCH_EXPLANATION_TTL_SECS", "60"),
            ("FUNDMATCH_EXPLAINER_TIMEOUT_SECS", "5"),
            ("FUNDMATCH_PROMPT_VERSION", " v7 "),
            ("FUNDMATCH_MODEL", "claude-haiku"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.top_n, 3);
    assert_eq!(config.workers, 2);
    assert_eq!(config.explanation_ttl, Duration::from_secs(60));
    assert_eq!(config.explainer_timeout, Duration::from_secs(5));
    assert_eq!(config.prompt_version, "v7");
    assert_eq!(config.model, "claude-haiku");
}

#[test]
#[serial]
fn test_from_env_rejects_non_numeric_top_n() {
    clear_fundmatch_env();

    let result = with_env_vars(&[("FUNDMATCH_TOP_N", "ten")], Config::from_env);

    match result {
        Err(ConfigError::NumberParseError { name, value, .. }) => {
            assert_eq!(name, "FUNDMATCH_TOP_N");
            assert_eq!(value, "ten");
        }
        other => panic!("expected NumberParseError, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_blank_prompt_version_falls_back_to_default() {
    clear_fundmatch_env();

    let config = with_env_vars(&[("FUNDMATCH_PROMPT_VERSION", "   ")], Config::from_env)
        .expect("should parse");

    assert_eq!(config.prompt_version, "v1");
}

#[test]
fn test_validate_rejects_zero_limits() {
    let config = Config {
        top_n: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue {
            name: "FUNDMATCH_TOP_N"
        })
    ));

    let config = Config {
        explainer_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue {
            name: "FUNDMATCH_EXPLAINER_TIMEOUT_SECS"
        })
    ));
}

#[test]
fn test_validate_rejects_empty_prompt_version() {
    let config = Config {
        prompt_version: String::new(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyValue { .. })
    ));
}
