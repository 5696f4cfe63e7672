//! 后端统一的响应包装 `{success, data|message|token|user}`
//!
//! 判断规则沿用 JSON 的宽松真值：`null`、`false`、`0`、`""`、`[]`、`{}`
//! 以及缺失的字段都算假值。

use serde_json::Value;

/// JSON 值是否为"真"
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// 集合类字段的元素个数，非集合视为 0
pub fn item_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::String(s) => s.chars().count(),
        _ => 0,
    }
}

/// 对一个已解析 body 的只读视图
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    body: &'a Value,
}

impl<'a> Envelope<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self { body }
    }

    /// 字段存在（不论取值）
    pub fn has(&self, key: &str) -> bool {
        self.body.get(key).is_some()
    }

    /// 字段存在且为真
    pub fn truthy(&self, key: &str) -> bool {
        self.body.get(key).is_some_and(is_truthy)
    }

    pub fn success(&self) -> bool {
        self.truthy("success")
    }

    pub fn message(&self) -> &'a str {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn token(&self) -> Option<&'a str> {
        self.body
            .get("token")
            .filter(|v| is_truthy(v))
            .and_then(Value::as_str)
    }

    pub fn data(&self) -> Option<&'a Value> {
        self.body.get("data")
    }

    /// `data` 下缺失或为假的字段，保持传入顺序
    pub fn missing_truthy_data_fields(&self, fields: &[&'static str]) -> Vec<&'static str> {
        let data = self.data();
        fields
            .iter()
            .copied()
            .filter(|field| !data.and_then(|d| d.get(*field)).is_some_and(is_truthy))
            .collect()
    }

    /// `data` 下完全不存在的字段，保持传入顺序
    pub fn missing_data_keys(&self, fields: &[&'static str]) -> Vec<&'static str> {
        let data = self.data();
        fields
            .iter()
            .copied()
            .filter(|field| data.and_then(|d| d.get(*field)).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!({"a": null})));
    }

    #[test]
    fn test_item_count() {
        assert_eq!(item_count(&json!([1, 2, 3])), 3);
        assert_eq!(item_count(&json!({"a": 1})), 1);
        assert_eq!(item_count(&json!(null)), 0);
    }

    #[test]
    fn test_success_and_message() {
        let body = json!({"success": true, "message": "Portfolio Backend API"});
        let env = Envelope::new(&body);
        assert!(env.success());
        assert_eq!(env.message(), "Portfolio Backend API");

        let body = json!({"success": false});
        let env = Envelope::new(&body);
        assert!(!env.success());
        assert_eq!(env.message(), "");

        let body = json!({"message": 42});
        assert_eq!(Envelope::new(&body).message(), "");
    }

    #[test]
    fn test_token_requires_non_empty_string() {
        let body = json!({"success": true, "token": "abc"});
        assert_eq!(Envelope::new(&body).token(), Some("abc"));

        let body = json!({"success": true, "token": ""});
        assert_eq!(Envelope::new(&body).token(), None);

        let body = json!({"success": true});
        assert_eq!(Envelope::new(&body).token(), None);
    }

    #[test]
    fn test_has_versus_truthy() {
        let body = json!({"success": true, "data": []});
        let env = Envelope::new(&body);
        assert!(env.has("data"));
        assert!(!env.truthy("data"));
    }

    #[test]
    fn test_missing_fields() {
        let body = json!({
            "success": true,
            "data": {"name": "Naveen", "title": "", "totalProjects": 0}
        });
        let env = Envelope::new(&body);
        assert_eq!(
            env.missing_truthy_data_fields(&["name", "title", "email"]),
            vec!["title", "email"]
        );
        assert_eq!(
            env.missing_data_keys(&["totalProjects", "techCount"]),
            vec!["techCount"]
        );
    }
}
