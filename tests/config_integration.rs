use embed_widget::config::AppConfig;
use embed_widget::settings::SettingKey;
use serial_test::serial;
use std::env;
use std::io::Write;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("CONFIG_FILE");
        env::remove_var("EMBED_BASE_API_URL");
        env::remove_var("EMBED_ID");
        env::remove_var("EMBED_BEARER_TOKEN");
        env::remove_var("EMBED_FALLBACK_BEARER_TOKEN");
        env::remove_var("ALLM_WIDGET__EMBED_ID");
        env::remove_var("ALLM_RENDER__OPEN");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["embed-widget"]).expect("defaults should load");
    assert!(config.widget.base_api_url.is_none());
    assert!(config.widget.attributes.is_empty());
    assert!(config.auth.fallback_bearer_token().is_none());
    assert!(!config.render.open);
    assert!(!config.render.print_settings);
    assert!(config.widget.script_attributes().is_empty());
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("ALLM_WIDGET__EMBED_ID", "env-embed");
        env::set_var("ALLM_RENDER__OPEN", "true");
    }

    let config = AppConfig::load_from_args(["embed-widget"]).expect("Failed to load config");
    assert_eq!(config.widget.embed_id.as_deref(), Some("env-embed"));
    assert!(config.render.open);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp config");
    write!(
        file,
        r##"
[widget]
base_api_url = "https://llm.example.com/api/embed"
embed_id = "file-embed"

[widget.attributes]
"data-button-color" = "#111111"

[auth]
fallback_bearer_token = "operator-token"
"##
    )
    .expect("Failed to write temp config");

    unsafe {
        env::set_var("CONFIG_FILE", file.path());
    }

    let config = AppConfig::load_from_args(["embed-widget"]).expect("Failed to load config from file");
    assert_eq!(
        config.widget.base_api_url.as_deref(),
        Some("https://llm.example.com/api/embed")
    );
    assert_eq!(config.auth.fallback_bearer_token(), Some("operator-token"));

    let script = config.widget.script_attributes();
    assert_eq!(script.get(SettingKey::EmbedId), Some("file-embed"));
    assert_eq!(script.get(SettingKey::ButtonColor), Some("#111111"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_overrides_file_and_env() {
    clear_env_vars();
    unsafe {
        env::set_var("ALLM_WIDGET__EMBED_ID", "env-embed");
    }

    let config = AppConfig::load_from_args([
        "embed-widget",
        "--embed-id",
        "cli-embed",
        "--bearer-token",
        "cli-token",
        "-a",
        "data-position=top-left",
        "--attr",
        "data-assistant-name=Helper",
        "--open",
        "true",
    ])
    .expect("Failed to load config");

    let script = config.widget.script_attributes();
    assert_eq!(script.get(SettingKey::EmbedId), Some("cli-embed"));
    assert_eq!(script.get(SettingKey::BearerToken), Some("cli-token"));
    assert_eq!(script.get(SettingKey::Position), Some("top-left"));
    assert_eq!(script.get(SettingKey::AssistantName), Some("Helper"));
    assert!(config.render.open);

    clear_env_vars();
}

#[test]
#[serial]
fn test_bad_attribute_is_rejected() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["embed-widget", "-a", "missing-separator"]);
    assert!(result.is_err());
}
