use reqwest::header::{CONTENT_TYPE, HeaderMap as Headers, HeaderValue};
use serde::Serialize;

use crate::Result;
use crate::http::types::Method;

/// 一次待发送的请求
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: url::Url,
    pub headers: Headers,
    pub body: Option<String>,
    /// 查询参数，保持插入顺序
    pub query_params: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
            query_params: Vec::new(),
        }
    }

    pub fn with_json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_string(data)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(json);
        Ok(self)
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// 拼上查询参数后的完整 URL
    pub fn full_url(&self) -> url::Url {
        let mut url = self.url.clone();
        if !self.query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query_params);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> url::Url {
        url::Url::parse("http://localhost:8001/api/portfolio/projects").unwrap()
    }

    #[test]
    fn test_full_url_with_query() {
        let request = Request::new(Method::Get, base()).with_query("category", "AI");
        assert_eq!(
            request.full_url().as_str(),
            "http://localhost:8001/api/portfolio/projects?category=AI"
        );
    }

    #[test]
    fn test_full_url_without_query() {
        let request = Request::new(Method::Get, base());
        assert_eq!(request.full_url(), base());
    }

    #[test]
    fn test_with_json_sets_content_type() {
        let request = Request::new(Method::Post, base())
            .with_json(&serde_json::json!({"name": "John"}))
            .unwrap();
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"John"}"#));
    }
}
