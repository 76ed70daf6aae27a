//! JSON-adapted record types and the file-backed store.
//!
//! The on-disk shape is a container object with a `questionSets` array
//! of flat records: `name`, `phone`, `email`, `address` (the historical
//! key for the answer slot), and `tagged`. Inbound conversion validates
//! field by field in a fixed order and re-checks the no-duplicate
//! invariant; outbound conversion is total and lossless.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quizbank_core::field::{Answer, Email, Phone, Question, Tag};
use quizbank_core::model::{QuestionBank, QuestionSet};
use quizbank_core::store::BankStore;

const MESSAGE_DUPLICATE: &str = "Question sets list contains duplicate question set(s)";

/// A load failure. The whole load fails; no partial bank is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A record violated a data constraint: a missing field, an invalid
    /// value, or a duplicate identity.
    #[error("{0}")]
    IllegalValue(String),

    /// The file is not syntactically valid JSON.
    #[error("could not parse data file: {0}")]
    Json(#[from] serde_json::Error),

    /// The file exists but could not be read.
    #[error("could not read data file: {0}")]
    Io(#[from] io::Error),
}

fn missing_field(field: &str) -> LoadError {
    LoadError::IllegalValue(format!("Question set's {field} field is missing"))
}

/// Serde-facing flat record.
///
/// Every scalar field is an `Option` so that an absent key stays
/// distinguishable from an empty string; both fail conversion, with
/// different messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct JsonQuestionSet {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    // Historical key: the answer has always been persisted under
    // "address", and existing data files rely on it.
    address: Option<String>,
    #[serde(default)]
    tagged: Vec<String>,
}

impl JsonQuestionSet {
    pub(crate) fn from_model(set: &QuestionSet) -> Self {
        Self {
            name: Some(set.question().as_str().to_owned()),
            phone: Some(set.phone().as_str().to_owned()),
            email: Some(set.email().as_str().to_owned()),
            address: Some(set.answer().as_str().to_owned()),
            tagged: set.tags().iter().map(|t| t.as_str().to_owned()).collect(),
        }
    }

    /// Validates and converts into a model record.
    ///
    /// Field order is fixed: question, phone, email, answer, then tags.
    /// A `None` fails with the missing-field message naming the field; a
    /// present-but-invalid value fails with that type's constraint
    /// message.
    pub(crate) fn to_model(&self) -> Result<QuestionSet, LoadError> {
        let name = self.name.as_deref().ok_or_else(|| missing_field("Question"))?;
        let question =
            Question::new(name).map_err(|e| LoadError::IllegalValue(e.to_string()))?;

        let phone = self.phone.as_deref().ok_or_else(|| missing_field("Phone"))?;
        let phone = Phone::new(phone).map_err(|e| LoadError::IllegalValue(e.to_string()))?;

        let email = self.email.as_deref().ok_or_else(|| missing_field("Email"))?;
        let email = Email::new(email).map_err(|e| LoadError::IllegalValue(e.to_string()))?;

        let answer = self
            .address
            .as_deref()
            .ok_or_else(|| missing_field("Answer"))?;
        let answer = Answer::new(answer).map_err(|e| LoadError::IllegalValue(e.to_string()))?;

        let mut tags = std::collections::BTreeSet::new();
        for raw in &self.tagged {
            tags.insert(Tag::new(raw.clone()).map_err(|e| LoadError::IllegalValue(e.to_string()))?);
        }

        Ok(QuestionSet::new(question, phone, email, answer, tags))
    }
}

/// Serde-facing container mirroring the whole data file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct JsonQuestionBank {
    #[serde(rename = "questionSets", default)]
    question_sets: Vec<JsonQuestionSet>,
}

impl JsonQuestionBank {
    pub(crate) fn from_model(bank: &QuestionBank) -> Self {
        Self {
            question_sets: bank
                .question_sets()
                .iter()
                .map(JsonQuestionSet::from_model)
                .collect(),
        }
    }

    /// Converts every record in file order, then re-checks uniqueness:
    /// the file format enforces none of its own, so two records that
    /// differ in every other field may still collide on identity.
    pub(crate) fn to_model(&self) -> Result<QuestionBank, LoadError> {
        let mut bank = QuestionBank::default();
        for adapted in &self.question_sets {
            let set = adapted.to_model()?;
            bank.add(set)
                .map_err(|_| LoadError::IllegalValue(MESSAGE_DUPLICATE.to_owned()))?;
        }
        Ok(bank)
    }
}

/// File-backed store for the question bank.
///
/// Holds only the target path; the bank is borrowed for the duration of
/// a single load or save call and never retained.
#[derive(Debug, Clone)]
pub struct JsonBankStore {
    path: PathBuf,
}

impl JsonBankStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the data file.
    ///
    /// `Ok(None)` means the file does not exist yet and the caller should
    /// seed initial data. Any other failure is a real load error.
    pub fn load(&self) -> Result<Option<QuestionBank>, LoadError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let adapted: JsonQuestionBank = serde_json::from_str(&raw)?;
        let bank = adapted.to_model()?;
        tracing::info!(
            "loaded {} question sets from {}",
            bank.question_sets().len(),
            self.path.display()
        );
        Ok(Some(bank))
    }
}

impl BankStore for JsonBankStore {
    fn save(&self, bank: &QuestionBank) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let rendered = serde_json::to_string_pretty(&JsonQuestionBank::from_model(bank))
            .map_err(io::Error::from)?;
        fs::write(&self.path, rendered)
    }
}
