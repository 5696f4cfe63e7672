use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use std::process::ExitCode;
use std::time::Duration;

use crate::http::Response;

/// 单个探针的结果，创建后不再修改
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    /// 探针名称
    pub test: String,

    /// 是否通过
    pub success: bool,

    /// 结果说明
    pub message: String,

    /// 失败时的细节：响应 body 或错误文本
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    /// 记录时间
    pub timestamp: DateTime<Local>,

    /// 探针耗时
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl ProbeResult {
    pub fn passed(test: impl Into<String>, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            test: test.into(),
            success: true,
            message: message.into(),
            details: None,
            timestamp: Local::now(),
            duration,
        }
    }

    pub fn failed(test: impl Into<String>, failure: ProbeFailure, duration: Duration) -> Self {
        Self {
            test: test.into(),
            success: false,
            message: failure.message,
            details: failure.details,
            timestamp: Local::now(),
            duration,
        }
    }
}

/// 探针失败的原因，在探针边界转换成失败记录
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ProbeFailure {
    pub message: String,
    pub details: Option<Value>,
}

impl ProbeFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(message: impl Into<String>, details: Value) -> Self {
        Self {
            message: message.into(),
            details: Some(details),
        }
    }

    /// 状态码不符合预期，细节为原始 body
    ///
    /// 期望 2xx 时只报告实际状态码，否则报告期望与实际。
    pub fn unexpected_status(expected: u16, response: &Response) -> Self {
        let message = if (200..300).contains(&expected) {
            format!("HTTP {}", response.code())
        } else {
            format!("Expected {}, got {}", expected, response.code())
        };
        Self::with_details(message, Value::String(response.body.clone()))
    }

    /// 请求没能完成（连接、超时、body 读取等）
    pub fn transport(context: &str, error: impl std::fmt::Display) -> Self {
        Self::with_details(context, Value::String(error.to_string()))
    }
}

/// 探针执行结果：通过时带上说明文字
pub type Outcome = std::result::Result<String, ProbeFailure>;

/// 测试摘要
#[derive(Debug, Clone, Serialize)]
pub struct ProbeSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// 通过率（百分比）
    pub success_rate: f64,
    pub total_duration_ms: u64,
    /// 失败的探针：(名称, 说明)
    pub failures: Vec<(String, String)>,
}

impl ProbeSummary {
    pub fn from_results(results: &[ProbeResult]) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        let total = results.len();
        let success_rate = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64 * 100.0
        };
        let total_duration: Duration = results.iter().map(|r| r.duration).sum();

        Self {
            total,
            passed,
            failed: total - passed,
            success_rate,
            total_duration_ms: total_duration.as_millis() as u64,
            failures: results
                .iter()
                .filter(|r| !r.success)
                .map(|r| (r.test.clone(), r.message.clone()))
                .collect(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// 没有失败记录时为 0，否则为 1
    pub fn exit_code(&self) -> ExitCode {
        if self.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;
    use serde_json::json;

    fn response(status: u16, body: &str) -> Response {
        Response::new(status, body.to_string())
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            ProbeResult::passed("Health Check", "API is running", Duration::from_millis(100)),
            ProbeResult::failed(
                "Root Endpoint",
                ProbeFailure::new("Unexpected response format"),
                Duration::from_millis(200),
            ),
            ProbeResult::passed("Tech Stack API", "Retrieved 4 tech stack items", Duration::ZERO),
        ];

        let summary = ProbeSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(format!("{:.1}", summary.success_rate), "66.7");
        assert_eq!(summary.total_duration_ms, 300);
        assert_eq!(
            summary.failures,
            vec![(
                "Root Endpoint".to_string(),
                "Unexpected response format".to_string()
            )]
        );
        assert!(!summary.all_passed());
        assert_eq!(summary.exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn test_summary_empty() {
        let summary = ProbeSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert!(summary.all_passed());
        assert_eq!(summary.exit_code(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_unexpected_status_messages() {
        let failure = ProbeFailure::unexpected_status(200, &response(500, "boom"));
        assert_eq!(failure.message, "HTTP 500");
        assert_eq!(failure.details, Some(json!("boom")));

        let failure = ProbeFailure::unexpected_status(401, &response(200, "{}"));
        assert_eq!(failure.message, "Expected 401, got 200");
    }

    #[test]
    fn test_failed_result_carries_details() {
        let result = ProbeResult::failed(
            "Health Check",
            ProbeFailure::transport("Connection failed", "connection refused"),
            Duration::ZERO,
        );
        assert!(!result.success);
        assert_eq!(result.message, "Connection failed");
        assert_eq!(result.details, Some(json!("connection refused")));
    }

    #[test]
    fn test_result_serializes_duration_as_millis() {
        let result = ProbeResult::passed("Health Check", "API is running", Duration::from_millis(42));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["duration_ms"], json!(42));
        assert_eq!(value["test"], json!("Health Check"));
        assert!(value.get("details").is_none());
    }
}
