//! Self-validating field value types.
//!
//! Each wrapper owns a total validity predicate and can only be
//! constructed from input that satisfies it, so holding an instance is
//! proof the value is well-formed. Construction failures carry the
//! type's fixed constraint message.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Constraint message for [`Question`].
pub const QUESTION_CONSTRAINTS: &str =
    "Questions should only contain alphanumeric characters and spaces, and should not be blank";

/// Constraint message for [`Phone`].
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain digits, and should be at least 3 digits long";

/// Constraint message for [`Email`].
pub const EMAIL_CONSTRAINTS: &str = "Emails should be of the form local-part@domain; \
     the local part is alphanumeric, optionally joined by '+', '_', '.' or '-', and the domain \
     is made of period-separated alphanumeric labels ending in a label at least 2 characters long";

/// Constraint message for [`Answer`].
pub const ANSWER_CONSTRAINTS: &str = "Answers can take any value, and should not be blank";

/// Constraint message for [`Tag`].
pub const TAG_CONSTRAINTS: &str = "Tag names should be alphanumeric";

static QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("question regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("phone regex"));

// Local part: alphanumeric runs joined by single special characters.
// Domain: hyphenated alphanumeric labels separated by periods, the last
// label at least 2 characters and starting/ending alphanumeric.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]+([+_.-][A-Za-z0-9]+)*@([A-Za-z0-9]+(-[A-Za-z0-9]+)*\.)*[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9]$",
    )
    .expect("email regex")
});

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("tag regex"));

/// The question text. Doubles as the identity key of a question set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question(String);

impl Question {
    /// Returns true when `raw` is alphanumeric words separated by single
    /// or repeated spaces, not starting with a space and not empty.
    pub fn is_valid(raw: &str) -> bool {
        QUESTION_RE.is_match(raw)
    }

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !Self::is_valid(&raw) {
            return Err(ValidationError(QUESTION_CONSTRAINTS));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact phone number of the question's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub fn is_valid(raw: &str) -> bool {
        PHONE_RE.is_match(raw)
    }

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !Self::is_valid(&raw) {
            return Err(ValidationError(PHONE_CONSTRAINTS));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact email of the question's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn is_valid(raw: &str) -> bool {
        EMAIL_RE.is_match(raw)
    }

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !Self::is_valid(&raw) {
            return Err(ValidationError(EMAIL_CONSTRAINTS));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The answer text. Free-form, must not be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer(String);

impl Answer {
    /// Any value is acceptable as long as the first character is not
    /// whitespace (which also rules out the empty string).
    pub fn is_valid(raw: &str) -> bool {
        raw.chars().next().is_some_and(|c| !c.is_whitespace())
    }

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !Self::is_valid(&raw) {
            return Err(ValidationError(ANSWER_CONSTRAINTS));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single alphanumeric label attached to a question set.
///
/// `Ord` is derived so tag sets iterate and serialize deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String);

impl Tag {
    pub fn is_valid(raw: &str) -> bool {
        TAG_RE.is_match(raw)
    }

    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !Self::is_valid(&raw) {
            return Err(ValidationError(TAG_CONSTRAINTS));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
