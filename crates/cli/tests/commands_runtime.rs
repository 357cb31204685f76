use std::env;
use std::sync::{Mutex, OnceLock};

use scout_cli::commands::{config, doctor};
use serde_json::Value;

#[test]
fn doctor_passes_with_api_key_in_env() {
    with_env(&[("SCOUT_LLM_API_KEY", "test-key")], || {
        let payload = parse_payload(&doctor::run(true));

        assert_eq!(payload["overall_status"], "pass");
        let checks = payload["checks"].as_array().expect("checks array");
        assert!(checks.iter().any(|check| {
            check["name"] == "config_validation" && check["status"] == "pass"
        }));
        assert!(checks.iter().any(|check| {
            check["name"] == "llm_client_readiness" && check["status"] == "pass"
        }));
        assert!(checks
            .iter()
            .any(|check| check["name"] == "prompt_catalog" && check["status"] == "pass"));
    });
}

#[test]
fn doctor_fails_and_skips_client_check_without_api_key() {
    with_env(&[], || {
        let payload = parse_payload(&doctor::run(true));

        assert_eq!(payload["overall_status"], "fail");
        let checks = payload["checks"].as_array().expect("checks array");
        assert!(checks.iter().any(|check| {
            check["name"] == "config_validation" && check["status"] == "fail"
        }));
        assert!(checks.iter().any(|check| {
            check["name"] == "llm_client_readiness" && check["status"] == "skipped"
        }));
    });
}

#[test]
fn doctor_human_output_lists_each_check() {
    with_env(&[("SCOUT_LLM_API_KEY", "test-key")], || {
        let output = doctor::run(false);

        assert!(output.starts_with("doctor: all readiness checks passed"));
        assert!(output.contains("- [ok] config_validation"));
        assert!(output.contains("- [ok] llm_client_readiness"));
        assert!(output.contains("- [ok] prompt_catalog"));
    });
}

#[test]
fn config_redacts_api_key_and_names_env_source() {
    with_env(
        &[("SCOUT_LLM_API_KEY", "very-secret"), ("SCOUT_LLM_MODEL", "gemini-1.5-flash")],
        || {
            let output = config::run();

            assert!(!output.contains("very-secret"), "api key must never be printed");
            assert!(output.contains("- llm.api_key = <redacted> (source: env (SCOUT_LLM_API_KEY))"));
            assert!(output
                .contains("- llm.model = gemini-1.5-flash (source: env (SCOUT_LLM_MODEL))"));
            assert!(output.contains("- logging.level = info (source: default)"));
        },
    );
}

#[test]
fn config_reports_validation_failure_without_api_key() {
    with_env(&[], || {
        let output = config::run();

        assert!(output.starts_with("config validation failed:"));
        assert!(output.contains("llm.api_key"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "SCOUT_LLM_API_KEY",
        "GOOGLE_API_KEY",
        "SCOUT_LLM_BASE_URL",
        "SCOUT_LLM_MODEL",
        "SCOUT_LLM_TIMEOUT_SECS",
        "SCOUT_LOGGING_LEVEL",
        "SCOUT_LOGGING_FORMAT",
        "SCOUT_LOG_LEVEL",
        "SCOUT_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
