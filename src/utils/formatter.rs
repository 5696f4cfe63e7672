use serde_json::Value;

/// 超过这个长度的细节会被截断
const DEFAULT_MAX_CHARS: usize = 2000;

/// 把失败细节整理成适合终端阅读的文本
pub struct DetailsFormatter {
    max_chars: usize,
}

impl Default for DetailsFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl DetailsFormatter {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// JSON 结构体美化输出；字符串如果本身是 JSON 也会美化，否则原样输出
    pub fn format(&self, details: &Value) -> String {
        let text = match details {
            Value::String(s) => self.try_format_json(s).unwrap_or_else(|| s.clone()),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        };
        self.truncate(text)
    }

    fn try_format_json(&self, body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        if value.is_object() || value.is_array() {
            serde_json::to_string_pretty(&value).ok()
        } else {
            None
        }
    }

    fn truncate(&self, text: String) -> String {
        let total = text.chars().count();
        if total <= self.max_chars {
            return text;
        }
        let kept: String = text.chars().take(self.max_chars).collect();
        format!("{}… ({} more chars)", kept, total - self.max_chars)
    }
}
