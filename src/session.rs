use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::http::{Client, Request, Response};
use crate::{ProbeError, Result};

/// 一次运行共享的会话：base URL、可选的 bearer token 和默认 headers
pub struct Session {
    client: Client,
    base_url: url::Url,
    token: Option<String>,
    headers: HeaderMap,
}

impl Session {
    pub fn new(client: Client, base_url: url::Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            client,
            base_url,
            token: None,
            headers,
        }
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn has_auth_header(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    /// 在 base URL 的路径后追加 API 路径，`""` 表示 API 根
    ///
    /// base URL 自带的查询参数保留，fragment 丢弃。
    pub fn url(&self, path: &str) -> Result<url::Url> {
        let mut url = self.base_url.clone();
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ProbeError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    /// 保存登录得到的 token 并挂到默认 headers 上
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ProbeError::InvalidHeader("Authorization: Bearer <token>".to_string()))?;
        self.headers.insert(AUTHORIZATION, value);
        self.token = Some(token);
        debug!("Bearer credential installed");
        Ok(())
    }

    /// 临时摘掉 Authorization header，返回值交给 [`Session::restore_auth`]
    pub fn strip_auth(&mut self) -> Option<HeaderValue> {
        self.headers.remove(AUTHORIZATION)
    }

    pub fn restore_auth(&mut self, saved: Option<HeaderValue>) {
        if let Some(value) = saved {
            self.headers.insert(AUTHORIZATION, value);
        }
    }

    pub async fn send(&self, request: Request) -> Result<Response> {
        self.client.execute(request, &self.headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn session(base: &str) -> Session {
        let client = Client::new(Duration::from_secs(1)).unwrap();
        Session::new(client, url::Url::parse(base).unwrap())
    }

    #[test]
    fn test_url_joins_paths() {
        let s = session("http://localhost:8001/api");
        assert_eq!(s.url("/health").unwrap().as_str(), "http://localhost:8001/api/health");
        assert_eq!(s.url("").unwrap().as_str(), "http://localhost:8001/api");
    }

    #[test]
    fn test_url_with_root_base() {
        let s = session("http://localhost:8001/");
        assert_eq!(s.url("/health").unwrap().as_str(), "http://localhost:8001/health");
    }

    #[test]
    fn test_url_keeps_base_query() {
        let s = session("http://localhost:8001/api?tenant=demo#top");
        assert_eq!(
            s.url("/health").unwrap().as_str(),
            "http://localhost:8001/api/health?tenant=demo"
        );
    }

    #[test]
    fn test_url_with_nested_path() {
        let s = session("http://localhost:8001/api/");
        assert_eq!(
            s.url("/portfolio/projects/featured").unwrap().as_str(),
            "http://localhost:8001/api/portfolio/projects/featured"
        );
    }

    #[test]
    fn test_set_token_installs_header() {
        let mut s = session("http://localhost:8001/api");
        assert!(!s.has_auth_header());

        s.set_token("abc").unwrap();
        assert_eq!(s.token(), Some("abc"));
        assert!(s.has_auth_header());
    }

    #[test]
    fn test_strip_and_restore_auth() {
        let mut s = session("http://localhost:8001/api");
        s.set_token("abc").unwrap();

        let saved = s.strip_auth();
        assert!(!s.has_auth_header());
        // token 仍然保留，只是不再随请求发送
        assert_eq!(s.token(), Some("abc"));

        s.restore_auth(saved);
        assert!(s.has_auth_header());
    }

    #[test]
    fn test_strip_without_token_is_noop() {
        let mut s = session("http://localhost:8001/api");
        let saved = s.strip_auth();
        assert!(saved.is_none());
        s.restore_auth(saved);
        assert!(!s.has_auth_header());
    }
}
