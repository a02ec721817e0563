/// Integration tests for configuration loading.
///
/// These tests mutate process environment variables, so they run serially.
use std::io::Write;

use serial_test::serial;
use vintner::{AssistantConfig, ConfigError};

const ALL_VARS: [&str; 4] = [
    AssistantConfig::ENV_HOST,
    AssistantConfig::ENV_TOKEN,
    AssistantConfig::ENV_VS_ENDPOINT,
    AssistantConfig::ENV_VS_INDEX,
];

fn clear_all_vars() {
    for name in ALL_VARS {
        unsafe {
            std::env::remove_var(name);
        }
    }
}

#[test]
#[serial]
fn env_file_supplies_missing_variables() {
    clear_all_vars();

    // Write a complete env file and load it the way --env-file does
    let mut env_file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        env_file,
        "DATABRICKS_HOST=https://adb-456.azuredatabricks.net\n\
         DATABRICKS_TOKEN=dapi-from-file\n\
         VS_ENDPOINT=wine_endpoint\n\
         VS_INDEX=wine_country.brochures_index"
    )
    .expect("failed to write env file");

    dotenvy::from_path(env_file.path()).expect("env file should load");

    let config = AssistantConfig::from_env().expect("config should load from env file");
    assert_eq!(config.host(), "https://adb-456.azuredatabricks.net");
    assert_eq!(config.token(), "dapi-from-file");
    assert_eq!(config.vs_endpoint(), "wine_endpoint");
    assert_eq!(config.vs_index(), "wine_country.brochures_index");

    clear_all_vars();
}

#[test]
#[serial]
fn process_environment_wins_over_env_file() {
    clear_all_vars();
    unsafe {
        std::env::set_var(AssistantConfig::ENV_HOST, "https://from-process.example.com");
    }

    let mut env_file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        env_file,
        "DATABRICKS_HOST=https://from-file.example.com\n\
         DATABRICKS_TOKEN=dapi-from-file\n\
         VS_ENDPOINT=wine_endpoint\n\
         VS_INDEX=wine_country.brochures_index"
    )
    .expect("failed to write env file");

    dotenvy::from_path(env_file.path()).expect("env file should load");

    let config = AssistantConfig::from_env().expect("config should load");
    // dotenvy does not override variables that are already set
    assert_eq!(config.host(), "https://from-process.example.com");

    clear_all_vars();
}

#[test]
#[serial]
fn startup_fails_fast_when_nothing_is_configured() {
    clear_all_vars();

    let err = AssistantConfig::from_env().expect_err("nothing is configured");
    assert!(matches!(
        err,
        ConfigError::MissingVar { name } if name == AssistantConfig::ENV_HOST
    ));
}

#[test]
#[serial]
fn startup_rejects_an_invalid_host() {
    clear_all_vars();
    unsafe {
        std::env::set_var(AssistantConfig::ENV_HOST, "adb-123.azuredatabricks.net");
        std::env::set_var(AssistantConfig::ENV_TOKEN, "dapi-test");
        std::env::set_var(AssistantConfig::ENV_VS_ENDPOINT, "wine_endpoint");
        std::env::set_var(AssistantConfig::ENV_VS_INDEX, "wine_country.brochures_index");
    }

    // Missing scheme makes the host unusable for both clients
    let err = AssistantConfig::from_env().expect_err("host has no scheme");
    assert!(matches!(err, ConfigError::InvalidHost(_)));

    clear_all_vars();
}
