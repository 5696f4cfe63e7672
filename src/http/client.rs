use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use tracing::debug;

use crate::Result;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::types::Status;

#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    /// 创建客户端，每个请求都受 `timeout` 限制
    pub fn new(timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("portfolio-probe/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { inner })
    }

    /// 发送请求
    ///
    /// `defaults` 是会话级别的 headers，请求自身的 headers 优先。
    pub async fn execute(&self, request: Request, defaults: &HeaderMap) -> Result<Response> {
        let url = request.full_url();
        let method = request.method;

        let mut headers = defaults.clone();
        headers.extend(request.headers);

        let mut req = self
            .inner
            .request(method.into(), url.clone())
            .headers(headers);
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let start = Instant::now();
        let response = req.send().await?;
        let status = Status::from(response.status());
        let body = response.text().await?;

        debug!(
            "{} {} -> {} ({}ms)",
            method,
            url,
            status,
            start.elapsed().as_millis()
        );

        Ok(Response::new(status.code(), body))
    }
}
