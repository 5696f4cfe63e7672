use portfolio_probe::http::normalize_base_url;
use portfolio_probe::{ProbeError, Result};

#[test]
fn test_config_error() {
    let err = ProbeError::ConfigError("unknown environment 'staging'".to_string());
    assert_eq!(err.to_string(), "配置错误: unknown environment 'staging'");
}

#[test]
fn test_missing_setting() {
    let err = ProbeError::MissingSetting("admin_password");
    assert_eq!(err.to_string(), "缺少配置项: admin_password");
}

#[test]
fn test_invalid_url() {
    let err = ProbeError::InvalidUrl("not a url".to_string());
    assert_eq!(err.to_string(), "无效的 URL: not a url");
}

#[test]
fn test_json_error_conversion() {
    let err: ProbeError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(err.to_string().starts_with("JSON 解析错误"));
}

#[test]
fn test_base_url_rejects_unsupported_scheme() {
    match normalize_base_url("ftp://example.com/api") {
        Err(ProbeError::InvalidUrl(msg)) => assert!(msg.contains("ftp://example.com/api")),
        other => panic!("Expected InvalidUrl, got {:?}", other),
    }
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(ProbeError::MissingSetting("admin_email"))
    }

    let result = returns_error();
    assert!(result.is_err());
    match result {
        Err(ProbeError::MissingSetting(key)) => assert_eq!(key, "admin_email"),
        _ => panic!("Expected MissingSetting"),
    }
}
