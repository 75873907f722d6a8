/*!
 * Unit tests for application configuration
 */

use autocap::app_config::Config;

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_fromFile_withMissingFile_shouldCreateDefaultConfig() {
    let temp_dir = create_temp_dir().unwrap();
    let config_path = temp_dir.path().join("conf.json");

    let config = Config::from_file(&config_path).unwrap();

    assert!(config_path.exists());
    assert_eq!(config.provider.provider_type, "whisper");
    assert_eq!(config.provider.model, "openai/whisper-large-v3-turbo");
    assert_eq!(config.limits.max_duration_secs, 300);
    assert_eq!(config.limits.max_file_size_bytes, 50 * 1024 * 1024);
    assert_eq!(config.export.embed_mode, "soft");
    assert!(!config.backend.enabled());
}

#[test]
fn test_saveAndLoad_shouldRoundTrip() {
    let temp_dir = create_temp_dir().unwrap();
    let config_path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.provider.api_key = "key-123".to_string();
    config.backend.base_url = "https://captions.example.com".to_string();
    config.limits.max_duration_secs = 120;
    config.save(&config_path).unwrap();

    let loaded = Config::from_file(&config_path).unwrap();

    assert_eq!(loaded.provider.api_key, "key-123");
    assert_eq!(loaded.backend.base_url, "https://captions.example.com");
    assert_eq!(loaded.limits.max_duration_secs, 120);
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let config_path = create_test_file(
        &dir,
        "conf.json",
        r#"{"provider": {"type": "whisper", "api_key": "abc"}}"#,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();

    assert_eq!(config.provider.api_key, "abc");
    assert_eq!(config.provider.timeout_secs, 60);
    assert_eq!(config.export.font_name, "Arial");
}

#[test]
fn test_validate_withBadBackendUrl_shouldFail() {
    let mut config = Config::default();
    config.backend.base_url = "not a url".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withBadEmbedMode_shouldFail() {
    let mut config = Config::default();
    config.export.embed_mode = "sideways".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_effectiveApiKey_shouldPreferConfigFileValue() {
    let mut config = Config::default();
    config.provider.api_key = "from-file".to_string();

    assert_eq!(config.provider.effective_api_key(), "from-file");
}

#[test]
fn test_backendEndpoints_shouldDeriveFromBaseUrl() {
    let mut config = Config::default();
    config.backend.base_url = "https://captions.example.com/".to_string();

    assert_eq!(
        config.backend.rate_limit_endpoint(),
        "https://captions.example.com/api/rate-limit"
    );
    assert_eq!(
        config.backend.projects_endpoint(),
        "https://captions.example.com/api/project"
    );
    assert_eq!(
        config.backend.stats_endpoint(),
        "https://captions.example.com/api/stats"
    );
}

#[test]
fn test_burnStyle_shouldAssembleForceStyleString() {
    let config = Config::default();

    assert_eq!(config.export.burn_style(), "FontSize=24,FontName=Arial");
}
