//! quizbank-storage — Validated JSON persistence.
//!
//! Maps the in-memory [`quizbank_core::model::QuestionBank`] to a flat
//! JSON file and back, re-validating every field and the no-duplicate
//! invariant on the way in. The file format has no uniqueness or
//! validity guarantees of its own.

pub mod json;

pub use json::{JsonBankStore, LoadError};
