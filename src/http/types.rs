use std::fmt;

use crate::{ProbeError, Result};
use serde::{Deserialize, Serialize};

/// 探针使用的 HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// 默认 host，当 URL 中未指定 host 时使用
const DEFAULT_HOST: &str = "localhost";
/// 默认 scheme，当 URL 中未指定 scheme 时使用
const DEFAULT_SCHEME: &str = "http";

/// 解析 base URL，支持简化写法
///
/// - `:8001/api` -> `http://localhost:8001/api`
/// - `localhost:8001/api` -> `http://localhost:8001/api`
/// - `https://:8443/api` -> `https://localhost:8443/api`
///
/// 结尾的 `/` 会被去掉，方便后续直接拼接路径。
pub fn normalize_base_url(s: &str) -> Result<url::Url> {
    let input = s.trim().trim_end_matches('/');
    if input.is_empty() {
        return Err(ProbeError::InvalidUrl(s.to_string()));
    }

    let normalized = if input.starts_with(':') {
        format!("{}://{}{}", DEFAULT_SCHEME, DEFAULT_HOST, input)
    } else if let Some(pos) = input.find("://") {
        let after_scheme = &input[pos + 3..];
        if after_scheme.starts_with(':') {
            format!("{}://{}{}", &input[..pos], DEFAULT_HOST, after_scheme)
        } else {
            input.to_string()
        }
    } else {
        format!("{}://{}", DEFAULT_SCHEME, input)
    };

    let url = url::Url::parse(&normalized)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProbeError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            other, s
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u16);

impl Status {
    /// reqwest 给出的任何状态码都接受（100..=999）
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => "Unknown",
        }
    }
}

impl From<reqwest::StatusCode> for Status {
    fn from(status: reqwest::StatusCode) -> Self {
        Self(status.as_u16())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_url() {
        let url = normalize_base_url("https://api.example.com:8443/api/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com:8443/api");
    }

    #[test]
    fn test_normalize_without_scheme() {
        let url = normalize_base_url("example.com/api").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn test_normalize_port_only() {
        let url = normalize_base_url(":8001/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8001/api");
    }

    #[test]
    fn test_normalize_port_with_scheme() {
        let url = normalize_base_url("https://:8443/api").unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn test_normalize_with_whitespace() {
        let url = normalize_base_url("  http://127.0.0.1:8001/api  ").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8001/api");
    }

    #[test]
    fn test_normalize_rejects_empty_and_foreign_scheme() {
        assert!(normalize_base_url("   ").is_err());
        assert!(normalize_base_url("ftp://example.com/api").is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::new(201).to_string(), "201 Created");
        assert_eq!(Status::new(429).reason_phrase(), "Too Many Requests");
    }

    #[test]
    fn test_status_outside_standard_range() {
        let status = Status::from(reqwest::StatusCode::from_u16(699).unwrap());
        assert_eq!(status.code(), 699);
        assert_eq!(status.to_string(), "699 Unknown");
    }
}
