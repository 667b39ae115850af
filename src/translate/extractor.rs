use serde_json::Value;

const TEXT_KEYS: [&str; 2] = ["translation_text", "generated_text"];

/// Find the translated text in an inference API response.
///
/// Handles a bare object, a list of one object, and a list of candidate
/// objects (first non-empty wins). Returns `None` when nothing usable is found.
pub fn extract_translation(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items.iter().find_map(extract_translation),
        Value::Object(map) => {
            let text = TEXT_KEYS
                .iter()
                .filter_map(|key| map.get(*key))
                .find(|v| !is_blank_value(v))?;
            let trimmed = text.as_str()?.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

// Falsy values (null, false, 0, "", [], {}) fall through to the next key
fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_of_one_object() {
        let value = json!([{ "translation_text": "Xin chào" }]);
        assert_eq!(extract_translation(&value).as_deref(), Some("Xin chào"));
    }

    #[test]
    fn bare_object() {
        let value = json!({ "translation_text": "Xin chào" });
        assert_eq!(extract_translation(&value).as_deref(), Some("Xin chào"));
    }

    #[test]
    fn generated_text_is_trimmed() {
        let value = json!([{ "generated_text": "  Xin chào  " }]);
        assert_eq!(extract_translation(&value).as_deref(), Some("Xin chào"));
    }

    #[test]
    fn translation_text_takes_precedence() {
        let value = json!({ "generated_text": "second", "translation_text": "first" });
        assert_eq!(extract_translation(&value).as_deref(), Some("first"));
    }

    #[test]
    fn empty_translation_text_falls_back_to_generated_text() {
        let value = json!({ "translation_text": "", "generated_text": "Chào" });
        assert_eq!(extract_translation(&value).as_deref(), Some("Chào"));

        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!([]), json!({})] {
            let value = json!({ "translation_text": falsy, "generated_text": "Chào" });
            assert_eq!(extract_translation(&value).as_deref(), Some("Chào"), "{}", value);
        }
    }

    #[test]
    fn truthy_non_string_translation_text_does_not_fall_back() {
        for truthy in [json!(true), json!(1), json!(["x"]), json!({ "a": 1 })] {
            let value = json!({ "translation_text": truthy, "generated_text": "Chào" });
            assert_eq!(extract_translation(&value), None, "{}", value);
        }
    }

    #[test]
    fn empty_or_blank_text_is_absent() {
        assert_eq!(extract_translation(&json!({ "translation_text": "" })), None);
        assert_eq!(extract_translation(&json!({ "translation_text": "   " })), None);
        assert_eq!(extract_translation(&json!({ "translation_text": 42 })), None);
    }

    #[test]
    fn first_non_empty_candidate_wins() {
        let value = json!([{}, { "translation_text": "Chào bạn" }, { "translation_text": "Xin chào" }]);
        assert_eq!(extract_translation(&value).as_deref(), Some("Chào bạn"));
    }

    #[test]
    fn nested_lists_are_searched_depth_first() {
        let value = json!([[{ "generated_text": " " }], [[{ "generated_text": "Tạm biệt" }]]]);
        assert_eq!(extract_translation(&value).as_deref(), Some("Tạm biệt"));
    }

    #[test]
    fn scalars_are_absent() {
        assert_eq!(extract_translation(&json!("just a string")), None);
        assert_eq!(extract_translation(&json!(3.5)), None);
        assert_eq!(extract_translation(&json!(true)), None);
        assert_eq!(extract_translation(&Value::Null), None);
        assert_eq!(extract_translation(&json!([])), None);
    }

    #[test]
    fn object_values_are_not_searched() {
        let value = json!({ "data": { "translation_text": "hidden" } });
        assert_eq!(extract_translation(&value), None);
    }
}
