use crate::Result;
use crate::http::types::Status;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: String) -> Self {
        Self {
            status: Status::new(status),
            body,
        }
    }

    pub fn code(&self) -> u16 {
        self.status.code()
    }

    /// 把 body 解析为 JSON
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
