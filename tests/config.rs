use blockkit::config::Config;
use blockkit::constants::{AUTOPLAY_INTERVAL_MS_DEFAULT, DEBOUNCE_MS_DEFAULT, PAGE_SIZE_DEFAULT};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.fetch.default_page_size, PAGE_SIZE_DEFAULT);
    assert!(config.fetch.embed_relations);
    assert!(!config.carousel.autoplay);
    assert_eq!(config.carousel.autoplay_interval_ms, AUTOPLAY_INTERVAL_MS_DEFAULT);
    assert_eq!(config.search.debounce_ms, DEBOUNCE_MS_DEFAULT);
    assert!(!config.logging.enabled);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Out-of-range page size should fail
    config.fetch.default_page_size = 0;
    assert!(config.validate().is_err());
    config.fetch.default_page_size = 500;
    assert!(config.validate().is_err());

    // Reset and test invalid autoplay interval
    config.fetch.default_page_size = 6;
    config.carousel.autoplay_interval_ms = 100;
    assert!(config.validate().is_err());

    // Reset and test invalid debounce
    config.carousel.autoplay_interval_ms = 5000;
    config.search.debounce_ms = 60_000;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("default_page_size = 6"));
    assert!(toml_str.contains("autoplay_interval_ms = 5000"));
    assert!(toml_str.contains("debounce_ms = 150"));
}

#[test]
fn test_partial_config_deserialization() {
    // Test that partial TOML configs merge with defaults
    let partial_toml = r#"
[carousel]
autoplay = true

[search]
debounce_ms = 300
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert!(config.carousel.autoplay);
    assert_eq!(config.search.debounce_ms, 300);

    // Check that unspecified values use defaults
    assert_eq!(config.fetch.default_page_size, PAGE_SIZE_DEFAULT);
    assert_eq!(config.carousel.autoplay_interval_ms, AUTOPLAY_INTERVAL_MS_DEFAULT);
    assert!(!config.logging.enabled);
}
