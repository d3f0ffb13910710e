//! fieldcast — schema-driven JSON field normalizer.
//!
//! Coerces the fields of a JSON object to the types declared by a template,
//! or fails with a single descriptive error. The engine lives in
//! `fieldcast-core`; this crate re-exports it for the binary and the
//! integration harnesses.
//!
//! # Architecture
//!
//! ```text
//! template file ──► Template ──┐
//!                              ├──► normalize ──► Record ──► JSON on stdout
//! input document ──────────────┘
//! ```

pub use fieldcast_core::*;
