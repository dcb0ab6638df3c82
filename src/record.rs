//! Raw question records as produced by the generation service.
//!
//! The shape depends on `workTypeId`, so the payload is kept as a loose JSON
//! map. Accessors never fail: a missing or mistyped field reads as empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw option before labelling.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOption {
    pub text: String,
    pub translation: Option<String>,
}

/// One generated question, loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// Missing ids read as 0, which no work type uses.
    #[serde(default)]
    pub work_type_id: u32,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(work_type_id: u32, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            work_type_id,
            fields,
        }
    }

    /// Question number shown in the title; `fallback` when absent.
    pub fn display_id(&self, fallback: usize) -> String {
        match self.fields.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// A string field, or `""`.
    pub fn text(&self, name: &str) -> &str {
        self.fields.get(name).and_then(Value::as_str).unwrap_or("")
    }

    /// A string field that is present and non-blank.
    pub fn non_empty_text(&self, name: &str) -> Option<&str> {
        Some(self.text(name)).filter(|s| !s.trim().is_empty())
    }

    /// A list of strings; numbers are stringified, other entries skipped.
    pub fn string_list(&self, name: &str) -> Vec<String> {
        self.fields
            .get(name)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(scalar_string).collect())
            .unwrap_or_default()
    }

    /// Rows of a string table.
    pub fn rows(&self, name: &str) -> Vec<Vec<String>> {
        self.fields
            .get(name)
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(Value::as_array)
                    .map(|cells| cells.iter().filter_map(scalar_string).collect())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Options as plain strings or `{text, translation}` objects.
    pub fn options(&self) -> Vec<RawOption> {
        let Some(items) = self.fields.get("options").and_then(Value::as_array) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::Object(obj) => Some(RawOption {
                    text: obj
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                        .to_string(),
                    translation: obj
                        .get("translation")
                        .and_then(Value::as_str)
                        .filter(|s| !s.trim().is_empty())
                        .map(str::to_string),
                }),
                other => scalar_string(other).map(|text| RawOption {
                    text,
                    translation: None,
                }),
            })
            .collect()
    }

    /// 1-based correct choice numbers from `answer` (a number, a numeric
    /// string, or an array of either).
    pub fn answer_numbers(&self) -> Vec<usize> {
        match self.fields.get("answer") {
            Some(Value::Array(items)) => items.iter().filter_map(choice_number).collect(),
            Some(v) => choice_number(v).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Nested records of a composite session.
    pub fn sub_records(&self) -> Vec<RawRecord> {
        self.fields
            .get("questions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Compact JSON dump, used for records nobody knows how to lay out.
    pub fn dump(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn choice_number(v: &Value) -> Option<usize> {
    match v {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_read_empty() {
        let r = RawRecord::new(8, json!({}));
        assert_eq!(r.text("passage"), "");
        assert!(r.options().is_empty());
        assert!(r.answer_numbers().is_empty());
        assert!(r.string_list("answers").is_empty());
        assert_eq!(r.display_id(4), "4");
    }

    #[test]
    fn mistyped_fields_read_empty() {
        let r = RawRecord::new(8, json!({"passage": 12, "options": "nope", "answer": {"x": 1}}));
        assert_eq!(r.text("passage"), "");
        assert!(r.options().is_empty());
        assert!(r.answer_numbers().is_empty());
    }

    #[test]
    fn mixed_option_shapes() {
        let r = RawRecord::new(
            1,
            json!({"options": ["apple", {"text": "pear", "translation": "배"}, 3, null]}),
        );
        let opts = r.options();
        assert_eq!(opts.len(), 3);
        assert_eq!(opts[1].translation.as_deref(), Some("배"));
        assert_eq!(opts[2].text, "3");
    }

    #[test]
    fn answer_forms() {
        assert_eq!(RawRecord::new(1, json!({"answer": 3})).answer_numbers(), vec![3]);
        assert_eq!(RawRecord::new(1, json!({"answer": "2"})).answer_numbers(), vec![2]);
        assert_eq!(RawRecord::new(1, json!({"answer": [1, "4"]})).answer_numbers(), vec![1, 4]);
    }

    #[test]
    fn deserializes_flat_json() {
        let r: RawRecord =
            serde_json::from_str(r#"{"workTypeId": 12, "id": "7", "passage": "Hi"}"#).unwrap();
        assert_eq!(r.work_type_id, 12);
        assert_eq!(r.display_id(0), "7");
        assert_eq!(r.text("passage"), "Hi");
    }

    #[test]
    fn missing_work_type_defaults_to_zero() {
        let r: RawRecord = serde_json::from_str(r#"{"passage": "Hi"}"#).unwrap();
        assert_eq!(r.work_type_id, 0);
    }
}
