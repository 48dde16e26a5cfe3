use crate::{Error, Result, model::FeatureSchema};
use serde_json::{Map, Value};

/// Accepts `application/json` and `application/*+json`, ignoring parameters
/// such as `charset`.
pub fn check_content_type(content_type: Option<&str>) -> Result<()> {
    let Some(raw) = content_type else {
        return Err(Error::malformed("missing content type, expected application/json"));
    };
    let mime = raw
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let is_json = mime == "application/json"
        || (mime.starts_with("application/") && mime.ends_with("+json"));
    if is_json {
        Ok(())
    } else {
        Err(Error::malformed(format!(
            "unsupported content type '{}', expected application/json",
            raw
        )))
    }
}

/// Parses a raw request body into a JSON object.
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>> {
    if body.is_empty() {
        return Err(Error::malformed("request body is empty"));
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::malformed(format!("request body is not valid JSON: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::malformed(format!(
            "request body must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Checks that every schema field is present and not null, stopping at the
/// first one that is not.
pub fn validate_required(body: &Map<String, Value>, schema: &FeatureSchema) -> Result<()> {
    for field in schema.field_names() {
        match body.get(field) {
            None | Some(Value::Null) => return Err(Error::validation(field)),
            Some(_) => {}
        }
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn valid_body() -> Map<String, Value> {
        match json!({
            "bathrooms": 2,
            "square_footage": 1500,
            "lot_size": 5000,
            "year_built": 1998,
            "bedrooms": 3
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_valid_body_passes() {
        assert!(validate_required(&valid_body(), &FeatureSchema::house_price()).is_ok());
    }

    #[rstest]
    #[case("bathrooms")]
    #[case("square_footage")]
    #[case("lot_size")]
    #[case("year_built")]
    #[case("bedrooms")]
    fn test_missing_field_is_named(#[case] field: &str) {
        let mut body = valid_body();
        body.remove(field);
        let err = validate_required(&body, &FeatureSchema::house_price()).unwrap_err();
        assert_eq!(err.to_string(), format!("'{}' is required", field));
    }

    #[rstest]
    #[case("bathrooms")]
    #[case("year_built")]
    fn test_null_field_is_missing(#[case] field: &str) {
        let mut body = valid_body();
        body.insert(field.to_string(), Value::Null);
        let err = validate_required(&body, &FeatureSchema::house_price()).unwrap_err();
        assert!(matches!(err, Error::Validation { field: f } if f == field));
    }

    #[test]
    fn test_first_missing_field_in_schema_order_wins() {
        let mut body = valid_body();
        body.remove("bedrooms");
        body.remove("square_footage");
        let err = validate_required(&body, &FeatureSchema::house_price()).unwrap_err();
        assert_eq!(err.to_string(), "'square_footage' is required");
    }

    #[test]
    fn test_presence_only_not_type() {
        let mut body = valid_body();
        body.insert("bathrooms".to_string(), json!("two"));
        assert!(validate_required(&body, &FeatureSchema::house_price()).is_ok());
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"not json".as_slice())]
    #[case(b"[1, 2, 3]".as_slice())]
    #[case(b"null".as_slice())]
    #[case(b"42".as_slice())]
    fn test_parse_body_rejects_non_objects(#[case] body: &[u8]) {
        let err = parse_body(body).unwrap_err();
        assert!(matches!(err, Error::MalformedRequest(_)));
    }

    #[rstest]
    #[case("application/json")]
    #[case("application/json; charset=utf-8")]
    #[case("Application/JSON")]
    #[case("application/merge-patch+json")]
    fn test_json_content_types_accepted(#[case] content_type: &str) {
        assert!(check_content_type(Some(content_type)).is_ok());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("text/plain"))]
    #[case(Some("application/x-www-form-urlencoded"))]
    #[case(Some("text/json+plain"))]
    fn test_non_json_content_types_rejected(#[case] content_type: Option<&str>) {
        let err = check_content_type(content_type).unwrap_err();
        assert!(matches!(err, Error::MalformedRequest(_)));
    }

    #[test]
    fn test_parse_body_object() {
        let map = parse_body(br#"{"bedrooms": 3, "garage": true}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["bedrooms"], json!(3));
    }
}
