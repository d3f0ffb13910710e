//! fieldcast-core — schema-driven JSON field normalisation.
//!
//! A [`Template`] declares which fields a document must have and which type
//! each one is coerced to. [`normalize`] walks the template over a decoded
//! document and returns either a fully coerced [`Record`] or the first error.
//!
//! # Architecture
//!
//! ```text
//! JSON text ──► serde_json ──► Normalizer ──► TypeHandler (per field) ──► Record
//!                                                 │
//!                                                 ├─ scalars: none, int, float, str
//!                                                 ├─ phone   (grammar: digit runs)
//!                                                 ├─ array   (grammar: [a, b, c])
//!                                                 └─ struct  (recurses into Normalizer)
//! ```
//!
//! # Example
//!
//! ```
//! use fieldcast_core::{field, normalize, Template, Value};
//!
//! let template = Template::new()
//!     .field("id", field::int())
//!     .field("phone", field::phone());
//!
//! let record = normalize(r#"{"id": "42", "phone": "8 (902) 445 52 22"}"#, &template)?;
//! assert_eq!(record["id"], Value::Int(42));
//! assert_eq!(record["phone"], Value::Str("79024455222".into()));
//! # Ok::<(), fieldcast_core::NormalizeError>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod grammar;
pub mod handler;
pub mod normalizer;
pub mod template;
pub mod types;

pub use error::{NormalizeError, TemplateError};
pub use grammar::PhoneFormat;
pub use handler::{Coerce, TypeHandler};
pub use normalizer::{normalize, normalize_slice, normalize_value};
pub use template::Template;
pub use types::{FieldKey, Record, Value};
