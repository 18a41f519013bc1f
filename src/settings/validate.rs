//! Per-field value validators.
//!
//! Script-tag attributes always arrive as strings while the remote document
//! carries typed JSON, so each validator accepts both forms.

use serde_json::Value;

use crate::error::FieldError;

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

fn shape(field: &'static str, expected: &'static str, value: &Value) -> FieldError {
    FieldError::Shape {
        field,
        expected,
        found: describe(value),
    }
}

/// Plain text. Numbers and booleans are accepted and stringified.
pub fn string(field: &'static str, value: &Value) -> Result<String, FieldError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(shape(field, "string", other)),
    }
}

pub fn number(field: &'static str, value: &Value) -> Result<f64, FieldError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| shape(field, "number", value)),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| FieldError::Unsupported {
            field,
            value: s.clone(),
        }),
        other => Err(shape(field, "number", other)),
    }
}

/// On/off switch. Accepts booleans, `on`/`off`, `true`/`false`, `yes`/`no`, `1`/`0`.
pub fn flag(field: &'static str, value: &Value) -> Result<bool, FieldError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(FieldError::Unsupported {
                field,
                value: n.to_string(),
            }),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Ok(true),
            "off" | "false" | "no" | "0" | "" => Ok(false),
            _ => Err(FieldError::Unsupported {
                field,
                value: s.clone(),
            }),
        },
        other => Err(shape(field, "on/off", other)),
    }
}

/// Pixel size such as `14` or `"14px"`.
pub fn pixels(field: &'static str, value: &Value) -> Result<u32, FieldError> {
    let unsupported = |raw: String| FieldError::Unsupported { field, value: raw };
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| unsupported(n.to_string())),
        Value::String(s) => {
            let trimmed = s.trim();
            let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
            digits.parse::<u32>().map_err(|_| unsupported(s.clone()))
        }
        other => Err(shape(field, "pixel size", other)),
    }
}

/// CSS length for the panel size. Bare numbers, JSON or textual, are pixels;
/// values that already carry a unit (`80vh`, `50%`, `400px`) pass through.
pub fn css_length(field: &'static str, value: &Value) -> Result<String, FieldError> {
    let unsupported = |raw: String| FieldError::Unsupported { field, value: raw };
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(v) if v.is_finite() && v >= 0.0 => Ok(format!("{n}px")),
            _ => Err(unsupported(n.to_string())),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(unsupported(s.clone()));
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Ok(format!("{trimmed}px")),
                Ok(_) => Err(unsupported(s.clone())),
                Err(_) => Ok(trimmed.to_string()),
            }
        }
        other => Err(shape(field, "CSS length", other)),
    }
}

/// Suggested messages: a comma-separated string or a list of strings.
///
/// Every comma-separated piece must be non-empty before trimming, so `"a,,b"`
/// is rejected as a whole.
pub fn default_messages(value: &Value) -> Result<Vec<String>, FieldError> {
    const FIELD: &str = "defaultMessages";
    const EXPECTED: &str = "array of strings or comma-separated string";

    match value {
        Value::String(s) => {
            let pieces: Vec<&str> = s.split(',').collect();
            if pieces.iter().any(|piece| piece.is_empty()) {
                return Err(FieldError::Unsupported {
                    field: FIELD,
                    value: s.clone(),
                });
            }
            Ok(pieces.into_iter().map(|piece| piece.trim().to_string()).collect())
        }
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| shape(FIELD, EXPECTED, value)),
        other => Err(shape(FIELD, EXPECTED, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_messages_comma_string_is_split_and_trimmed() {
        assert_eq!(
            default_messages(&json!("a, b ,c")).unwrap(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_default_messages_list_of_strings_is_unchanged() {
        assert_eq!(default_messages(&json!(["x", "y"])).unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_default_messages_rejects_other_shapes() {
        assert!(default_messages(&json!(42)).is_err());
        assert!(default_messages(&json!([1, 2])).is_err());
        assert!(default_messages(&json!(null)).is_err());
        assert!(default_messages(&json!("a,,b")).is_err());
        assert!(default_messages(&json!("")).is_err());
    }

    #[test]
    fn test_flag_spellings() {
        assert!(flag("openOnLoad", &json!("on")).unwrap());
        assert!(flag("openOnLoad", &json!(true)).unwrap());
        assert!(!flag("openOnLoad", &json!("off")).unwrap());
        assert!(!flag("openOnLoad", &json!(0)).unwrap());
        assert!(flag("openOnLoad", &json!("sometimes")).is_err());
    }

    #[test]
    fn test_pixels_accepts_suffix() {
        assert_eq!(pixels("textSize", &json!("14px")).unwrap(), 14);
        assert_eq!(pixels("textSize", &json!(16)).unwrap(), 16);
        assert!(pixels("textSize", &json!(-3)).is_err());
        assert!(pixels("textSize", &json!("large")).is_err());
    }

    #[test]
    fn test_css_length_adds_px_to_bare_numbers() {
        assert_eq!(css_length("windowWidth", &json!(400)).unwrap(), "400px");
        assert_eq!(css_length("windowWidth", &json!("400")).unwrap(), "400px");
        assert_eq!(css_length("windowWidth", &json!(" 320 ")).unwrap(), "320px");
        assert_eq!(css_length("windowHeight", &json!("80vh")).unwrap(), "80vh");
        assert_eq!(css_length("windowHeight", &json!("600px")).unwrap(), "600px");
        assert!(css_length("windowHeight", &json!(-1)).is_err());
        assert!(css_length("windowHeight", &json!("  ")).is_err());
        assert!(css_length("windowHeight", &json!(true)).is_err());
    }

    #[test]
    fn test_number_and_string_coercions() {
        assert!((number("temperature", &json!("0.7")).unwrap() - 0.7).abs() < f64::EPSILON);
        assert_eq!(string("windowHeight", &json!(600)).unwrap(), "600");
        assert!(string("greeting", &json!(["a"])).is_err());
    }
}
