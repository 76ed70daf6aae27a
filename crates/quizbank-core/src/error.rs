//! Error types for the model, parser, and engine.
//!
//! Every failure here is recoverable: it terminates the single command or
//! load attempt that produced it and is rendered to the user as-is. The
//! `Display` impls are therefore the exact user-facing messages.

use thiserror::Error;

/// A raw field value failed its type's validity predicate.
///
/// Carries the fixed, type-specific constraint message (see the constants
/// in [`crate::field`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub(crate) &'static str);

impl ValidationError {
    /// The constraint message of the field type that rejected the value.
    pub fn message(&self) -> &'static str {
        self.0
    }
}

/// A raw command line could not be turned into a command object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The leading command word is not part of the command surface.
    #[error("Unknown command")]
    UnknownCommand,

    /// Malformed arguments: bad index, missing mandatory prefix, stray
    /// preamble. Carries the usage text of the offending command.
    #[error("Invalid command format!\n{usage}")]
    InvalidFormat { usage: &'static str },

    /// An edit command that specifies no field at all.
    #[error("At least one field to edit must be provided.")]
    NothingToEdit,

    /// A field value inside the command failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Invariant violations raised by [`crate::model::UniqueQuestionSetList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UniqueListError {
    /// The operation would leave two identity-equal question sets in the list.
    #[error("operation would result in duplicate question sets")]
    Duplicate,

    /// The referenced question set is not in the list.
    #[error("question set not found in the list")]
    NotFound,
}

/// The single user-facing failure type of [`crate::engine::Engine::execute`].
#[derive(Debug, Error)]
pub enum CommandError {
    /// The display index is outside the bounds of the filtered view.
    #[error("The question set index provided is invalid")]
    InvalidIndex,

    /// The command would create a second question set with the same question.
    #[error("This question set already exists in the question bank")]
    Duplicate,

    /// The post-mutation save failed. The in-memory mutation is retained.
    #[error("Could not save data to file: {source}")]
    Save {
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<UniqueListError> for CommandError {
    fn from(err: UniqueListError) -> Self {
        match err {
            UniqueListError::Duplicate => CommandError::Duplicate,
            // The engine only ever targets records it resolved from the
            // filtered view, so a missing target means a stale index.
            UniqueListError::NotFound => CommandError::InvalidIndex,
        }
    }
}
