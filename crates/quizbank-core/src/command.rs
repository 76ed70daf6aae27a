//! Typed command objects and their outcomes.
//!
//! The command surface is closed: one enum variant per user intent,
//! dispatched exhaustively by the engine. Parsers build a command once,
//! the engine consumes it once.

use std::collections::BTreeSet;

use crate::field::{Answer, Email, Phone, Question, Tag};
use crate::model::QuestionSet;

/// Usage text for `add`, shown on malformed input.
pub const ADD_USAGE: &str = "add: Adds a question set to the bank.\n\
     Format: add q/QUESTION p/PHONE e/EMAIL a/ANSWER [t/TAG]...\n\
     Example: add q/What is the powerhouse of the cell p/94351253 e/bio@example.com a/The mitochondria t/biology";

/// Usage text for `edit`.
pub const EDIT_USAGE: &str = "edit: Edits the question set at the given display index. \
     At least one field must be supplied; t/ with no value clears all tags.\n\
     Format: edit INDEX [q/QUESTION] [p/PHONE] [e/EMAIL] [a/ANSWER] [t/TAG]...\n\
     Example: edit 2 p/91234567 e/quiz@example.com";

/// Usage text for `delete`.
pub const DELETE_USAGE: &str = "delete: Deletes the question set at the given display index.\n\
     Format: delete INDEX\n\
     Example: delete 1";

/// Usage text for `find`.
pub const FIND_USAGE: &str = "find: Lists question sets whose question contains any of the \
     given keywords (case-insensitive, whole words).\n\
     Format: find KEYWORD [KEYWORD]...\n\
     Example: find mitochondria nerves";

/// A 1-based display index into the currently filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    /// Accepts positive values only.
    pub fn from_one_based(value: usize) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    pub fn one_based(self) -> usize {
        self.0
    }

    pub fn zero_based(self) -> usize {
        self.0 - 1
    }
}

/// Sparse "which fields changed" patch applied by the edit command.
///
/// `None` means "leave unchanged". For tags, `Some` of an empty set is an
/// explicit clear-all, which the parser produces for a single bare `t/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDescriptor {
    pub question: Option<Question>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub answer: Option<Answer>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditDescriptor {
    /// False for the all-`None` descriptor, which the parser rejects.
    pub fn is_any_field_set(&self) -> bool {
        self.question.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.answer.is_some()
            || self.tags.is_some()
    }

    /// Builds the replacement record, carrying unspecified fields over
    /// from `existing`.
    pub fn apply(&self, existing: &QuestionSet) -> QuestionSet {
        QuestionSet::new(
            self.question.clone().unwrap_or_else(|| existing.question().clone()),
            self.phone.clone().unwrap_or_else(|| existing.phone().clone()),
            self.email.clone().unwrap_or_else(|| existing.email().clone()),
            self.answer.clone().unwrap_or_else(|| existing.answer().clone()),
            self.tags.clone().unwrap_or_else(|| existing.tags().clone()),
        )
    }
}

/// One parsed user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(QuestionSet),
    Edit {
        index: Index,
        edits: EditDescriptor,
    },
    Delete {
        index: Index,
    },
    Find {
        keywords: Vec<String>,
    },
    List,
    Clear,
    Help,
    Exit,
}

/// What the engine reports back for a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// User-facing feedback line(s).
    pub feedback: String,
    /// The presentation layer should terminate.
    pub exit: bool,
    /// The visible record list changed shape and is worth re-rendering.
    pub refresh_view: bool,
}

impl CommandOutcome {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: false,
            refresh_view: false,
        }
    }

    pub fn with_refresh(feedback: impl Into<String>) -> Self {
        Self {
            refresh_view: true,
            ..Self::new(feedback)
        }
    }

    pub fn with_exit(feedback: impl Into<String>) -> Self {
        Self {
            exit: true,
            ..Self::new(feedback)
        }
    }
}
