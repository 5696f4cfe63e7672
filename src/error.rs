use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("缺少配置项: {0}")]
    MissingSetting(&'static str),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    #[error("无效的请求头: {0}")]
    InvalidHeader(String),

    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML 解析错误: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("URL 解析错误: {0}")]
    UrlParseError(#[from] url::ParseError),
}

/// Result type for portfolio-probe crate
pub type Result<T> = std::result::Result<T, ProbeError>;
