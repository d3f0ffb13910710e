//! Domain-specific assertion macros for fieldcast harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* field failed and *how* the error was classified.

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert that a `Record` serializes to the given JSON.
///
/// ```rust
/// assert_record_json!(record, {"foo": 123});
/// ```
#[macro_export]
macro_rules! assert_record_json {
    ($record:expr, $expected:tt) => {{
        let record: &fieldcast::Record = &$record;
        let actual = serde_json::to_value(record).expect("record must serialize");
        pretty_assertions::assert_eq!(actual, serde_json::json!($expected));
    }};
}

/// Assert that a `Record` has exactly the given keys, in order.
#[macro_export]
macro_rules! assert_keys {
    ($record:expr, [$($key:expr),* $(,)?]) => {{
        let record: &fieldcast::Record = &$record;
        let actual: Vec<&str> = record.keys().collect();
        let expected: Vec<&str> = vec![$($key),*];
        pretty_assertions::assert_eq!(actual, expected, "record keys differ");
    }};
}

// ---------------------------------------------------------------------------
// Error assertions
// ---------------------------------------------------------------------------

/// Assert that a normalisation result failed with `UnableCastDataToTemplate`
/// for the given key and type name.
///
/// ```rust
/// assert_cast_error!(result, "foo", "int");
/// ```
#[macro_export]
macro_rules! assert_cast_error {
    ($result:expr, $key:expr, $type_name:expr) => {{
        match $result {
            Err(fieldcast::NormalizeError::UnableCastDataToTemplate { key, type_name, .. }) => {
                pretty_assertions::assert_eq!(key.to_string(), $key, "cast error key");
                pretty_assertions::assert_eq!(type_name, $type_name, "cast error type");
            }
            Err(other) => panic!(
                "assert_cast_error! failed: expected UnableCastDataToTemplate, got {:?}",
                other
            ),
            Ok(record) => panic!(
                "assert_cast_error! failed: expected an error, got record {:?}",
                record
            ),
        }
    }};
}

/// Assert that a normalisation result failed with `FieldNotFound` for `key`.
#[macro_export]
macro_rules! assert_field_not_found {
    ($result:expr, $key:expr) => {{
        match $result {
            Err(fieldcast::NormalizeError::FieldNotFound { key, .. }) => {
                pretty_assertions::assert_eq!(key.to_string(), $key, "missing key");
            }
            Err(other) => panic!(
                "assert_field_not_found! failed: expected FieldNotFound, got {:?}",
                other
            ),
            Ok(record) => panic!(
                "assert_field_not_found! failed: expected an error, got record {:?}",
                record
            ),
        }
    }};
}
