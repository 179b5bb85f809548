use expense_core::{
    config::{Config, ConfigError, ConfigManager},
    domain::rust_decimal::Decimal,
};
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config.mileage_rate, Decimal::new(25, 2));
    assert_eq!(config.invoice_currency, "CAD");
}

#[test]
fn saved_config_is_reloaded() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    let config = Config {
        mileage_rate: Decimal::new(45, 2),
        ..Config::default()
    };
    manager.save(&config).unwrap();
    assert!(manager.config_path().exists());
    assert_eq!(manager.load().unwrap().mileage_rate, Decimal::new(45, 2));
}

#[test]
fn partial_json_fills_in_defaults() {
    let config = Config::from_json(r#"{ "mileage_rate": "0.5" }"#).unwrap();
    assert_eq!(config.mileage_rate, Decimal::new(5, 1));
    assert_eq!(config.currency_suffix, "$");
}

#[test]
fn negative_rate_is_rejected() {
    let err = Config::from_json(r#"{ "mileage_rate": "-1" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
