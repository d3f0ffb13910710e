//! Normalizer — applies a [`Template`] to a decoded JSON document.
//!
//! Fields are processed in template order and the first failure ends the
//! run: the caller gets either a complete [`Record`] or exactly one error.
//!
//! - A template key missing from the document fails with
//!   [`NormalizeError::FieldNotFound`].
//! - Domain errors from a handler propagate unchanged.
//! - Handler errors of any other kind get the offending `{key: raw}` attached.

use crate::error::{NormalizeError, Result};
use crate::template::Template;
use crate::types::{FieldKey, Record};
use serde_json::{Map, Value as Json};

/// Parse `json_text` and normalise it against `template`.
pub fn normalize(json_text: &str, template: &Template) -> Result<Record> {
    let decoded: Json = serde_json::from_str(json_text)?;
    normalize_value(&decoded, template)
}

/// Byte-slice variant of [`normalize`].
pub fn normalize_slice(json: &[u8], template: &Template) -> Result<Record> {
    let decoded: Json = serde_json::from_slice(json)?;
    normalize_value(&decoded, template)
}

/// Normalise an already decoded document.
///
/// A document that is not an object has no fields, so the first template
/// key is reported as not found.
pub fn normalize_value(decoded: &Json, template: &Template) -> Result<Record> {
    let empty = Map::new();
    let object = decoded.as_object().unwrap_or(&empty);
    let record = normalize_object(object, template)?;
    tracing::debug!(fields = record.len(), "document normalised");
    Ok(record)
}

/// The per-field loop shared by documents and struct fields.
pub(crate) fn normalize_object(object: &Map<String, Json>, template: &Template) -> Result<Record> {
    let mut record = Record::with_capacity(template.len());

    for (name, handler) in template.iter() {
        let Some(raw) = object.get(name) else {
            tracing::debug!(key = name, ty = %handler.name(), "template field missing");
            return Err(NormalizeError::FieldNotFound {
                key: FieldKey::from(name),
                type_name: handler.name(),
            });
        };

        tracing::trace!(key = name, ty = %handler.name(), "normalising field");
        match handler.normalize(raw, &FieldKey::from(name)) {
            Ok(value) => record.push(name, value),
            Err(err) if err.is_domain() => return Err(err),
            Err(err) => return Err(err.with_field_context(name, raw)),
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;
    use crate::types::Value;

    fn foo_int() -> Template {
        Template::new().field("foo", field::int())
    }

    #[test]
    fn coerces_present_field() {
        let record = normalize(r#"{"foo": "123"}"#, &foo_int()).unwrap();
        assert_eq!(record["foo"], Value::Int(123));
    }

    #[test]
    fn missing_field_is_field_not_found() {
        let err = normalize(r#"{"boo": "123"}"#, &foo_int()).unwrap_err();
        assert!(matches!(err, NormalizeError::FieldNotFound { ref type_name, .. } if type_name == "int"));
    }

    #[test]
    fn uncastable_field_is_cast_error() {
        let err = normalize(r#"{"foo": "abc"}"#, &foo_int()).unwrap_err();
        assert!(matches!(err, NormalizeError::UnableCastDataToTemplate { .. }));
    }

    #[test]
    fn invalid_json_is_not_wrapped() {
        let err = normalize(r#"{"foo": "#, &foo_int()).unwrap_err();
        assert!(matches!(err, NormalizeError::Json(_)));
    }

    #[test]
    fn non_object_document_has_no_fields() {
        let err = normalize(r#"["foo"]"#, &foo_int()).unwrap_err();
        assert!(matches!(err, NormalizeError::FieldNotFound { .. }));
    }

    #[test]
    fn extra_input_fields_are_ignored() {
        let record = normalize_slice(br#"{"foo": 1, "bar": 2}"#, &foo_int()).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["foo"]);
    }

    #[test]
    fn first_failure_wins() {
        let template = Template::new()
            .field("a", field::int())
            .field("b", field::int())
            .field("c", field::int());
        let err = normalize(r#"{"a": "x", "c": "1"}"#, &template).unwrap_err();
        assert_eq!(err.key(), Some(&FieldKey::from("a")));
    }

    #[test]
    fn empty_template_yields_empty_record() {
        assert!(normalize("{}", &Template::new()).unwrap().is_empty());
    }

    /// Accepts only `"ok"`; anything else fails outside the coercion rules.
    #[derive(Debug)]
    struct Checksum;

    impl crate::Coerce for Checksum {
        fn name(&self) -> String {
            "checksum".to_string()
        }

        fn coerce(&self, value: &Json, _key: &FieldKey) -> anyhow::Result<Value> {
            match value.as_str() {
                Some("ok") => Ok(Value::Str("ok".to_string())),
                _ => anyhow::bail!("checksum mismatch"),
            }
        }
    }

    #[test]
    fn handler_error_gets_field_context() {
        let template = Template::new().field("id", field::int()).field("iban", field::custom(Checksum));
        let err = normalize(r#"{"id": 1, "iban": "DE00"}"#, &template).unwrap_err();
        assert!(matches!(err, NormalizeError::Handler { .. }));
        assert!(!err.is_domain());
        assert_eq!(err.to_string(), r#"checksum mismatch: {"iban": "DE00"}"#);
    }

    #[test]
    fn handler_error_inside_struct_keeps_its_kind() {
        let account = Template::new().field("iban", field::custom(Checksum));
        let template = Template::new().field("account", field::structure(account));
        let err = normalize(r#"{"account": {"iban": "DE00"}}"#, &template).unwrap_err();
        assert!(matches!(err, NormalizeError::Handler { .. }));
        assert_eq!(err.to_string(), r#"checksum mismatch: {"account": {"iban": "DE00"}}"#);
    }

    #[test]
    fn handler_error_inside_array_is_wrapped() {
        let template = Template::new().field("ibans", field::array(field::custom(Checksum)));
        let err = normalize(r#"{"ibans": ["ok", "DE00"]}"#, &template).unwrap_err();
        match &err {
            NormalizeError::UnableCastDataToTemplate { key, type_name, .. } => {
                assert_eq!(key, &FieldKey::from("ibans"));
                assert_eq!(type_name, "array<checksum>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(err.cause(), Some(NormalizeError::Handler { context: None, .. })));
    }
}
