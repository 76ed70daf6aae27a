//! Text command parser.
//!
//! Turns one raw input line into a [`Command`] or a [`ParseError`]. The
//! first whitespace-delimited word selects the command; the remainder is
//! tokenized by the field prefix markers `q/`, `p/`, `e/`, `a/`, `t/`.

use std::collections::BTreeSet;

use crate::command::{
    Command, EditDescriptor, Index, ADD_USAGE, DELETE_USAGE, EDIT_USAGE, FIND_USAGE,
};
use crate::error::ParseError;
use crate::field::{Answer, Email, Phone, Question, Tag};
use crate::model::QuestionSet;

pub const QUESTION_PREFIX: &str = "q/";
pub const PHONE_PREFIX: &str = "p/";
pub const EMAIL_PREFIX: &str = "e/";
pub const ANSWER_PREFIX: &str = "a/";
pub const TAG_PREFIX: &str = "t/";

const PREFIXES: [&str; 5] = [
    QUESTION_PREFIX,
    PHONE_PREFIX,
    EMAIL_PREFIX,
    ANSWER_PREFIX,
    TAG_PREFIX,
];

/// Parses one raw input line.
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let (word, args) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    match word {
        "add" => parse_add(args),
        "edit" => parse_edit(args),
        "delete" => parse_delete(args),
        "find" => parse_find(args),
        // Trailing arguments to the argument-less commands are ignored.
        "list" => Ok(Command::List),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        _ => Err(ParseError::UnknownCommand),
    }
}

/// The argument string split at prefix markers.
///
/// `values` keeps (prefix, value) pairs in scan order so multi-valued
/// prefixes accumulate and single-valued lookups can take the last
/// occurrence.
#[derive(Debug)]
struct ArgTokens<'a> {
    preamble: &'a str,
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> ArgTokens<'a> {
    /// Last value of a single-valued prefix.
    fn last(&self, prefix: &str) -> Option<&'a str> {
        self.values
            .iter()
            .rev()
            .find(|(p, _)| *p == prefix)
            .map(|(_, v)| *v)
    }

    /// Every value of a multi-valued prefix, in order of appearance.
    fn all(&self, prefix: &str) -> Vec<&'a str> {
        self.values
            .iter()
            .filter(|(p, _)| *p == prefix)
            .map(|(_, v)| *v)
            .collect()
    }
}

/// Scans `args` for prefix markers. A marker only counts at the start of
/// the string or after whitespace; `aq/x` is plain preamble text. Each
/// value runs to the next marker and is trimmed.
fn tokenize(args: &str) -> ArgTokens<'_> {
    let mut marks: Vec<(usize, &'static str)> = Vec::new();
    for prefix in PREFIXES {
        let mut from = 0;
        while let Some(found) = args[from..].find(prefix) {
            let at = from + found;
            if at == 0 || args[..at].ends_with(char::is_whitespace) {
                marks.push((at, prefix));
            }
            from = at + prefix.len();
        }
    }
    marks.sort_unstable_by_key(|&(at, _)| at);

    let preamble_end = marks.first().map_or(args.len(), |&(at, _)| at);
    let values = marks
        .iter()
        .enumerate()
        .map(|(i, &(at, prefix))| {
            let end = marks.get(i + 1).map_or(args.len(), |&(next, _)| next);
            (prefix, args[at + prefix.len()..end].trim())
        })
        .collect();

    ArgTokens {
        preamble: args[..preamble_end].trim(),
        values,
    }
}

fn parse_add(args: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(args);
    let invalid = || ParseError::InvalidFormat { usage: ADD_USAGE };

    if !tokens.preamble.is_empty() {
        return Err(invalid());
    }
    let question = tokens.last(QUESTION_PREFIX).ok_or_else(invalid)?;
    let phone = tokens.last(PHONE_PREFIX).ok_or_else(invalid)?;
    let email = tokens.last(EMAIL_PREFIX).ok_or_else(invalid)?;
    let answer = tokens.last(ANSWER_PREFIX).ok_or_else(invalid)?;

    let mut tags = BTreeSet::new();
    for raw in tokens.all(TAG_PREFIX) {
        tags.insert(Tag::new(raw)?);
    }

    Ok(Command::Add(QuestionSet::new(
        Question::new(question)?,
        Phone::new(phone)?,
        Email::new(email)?,
        Answer::new(answer)?,
        tags,
    )))
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(args);
    let index = parse_index(tokens.preamble)
        .ok_or(ParseError::InvalidFormat { usage: EDIT_USAGE })?;

    let mut edits = EditDescriptor::default();
    if let Some(raw) = tokens.last(QUESTION_PREFIX) {
        edits.question = Some(Question::new(raw)?);
    }
    if let Some(raw) = tokens.last(PHONE_PREFIX) {
        edits.phone = Some(Phone::new(raw)?);
    }
    if let Some(raw) = tokens.last(EMAIL_PREFIX) {
        edits.email = Some(Email::new(raw)?);
    }
    if let Some(raw) = tokens.last(ANSWER_PREFIX) {
        edits.answer = Some(Answer::new(raw)?);
    }
    edits.tags = parse_tags_for_edit(&tokens.all(TAG_PREFIX))?;

    if !edits.is_any_field_set() {
        return Err(ParseError::NothingToEdit);
    }

    Ok(Command::Edit { index, edits })
}

/// Distinguishes the three tag shapes of an edit: no `t/` at all leaves
/// tags unset; exactly one empty `t/` is an explicit clear-all; anything
/// else must be valid tags.
fn parse_tags_for_edit(raws: &[&str]) -> Result<Option<BTreeSet<Tag>>, ParseError> {
    if raws.is_empty() {
        return Ok(None);
    }
    if raws == [""] {
        return Ok(Some(BTreeSet::new()));
    }
    let mut tags = BTreeSet::new();
    for raw in raws {
        tags.insert(Tag::new(*raw)?);
    }
    Ok(Some(tags))
}

fn parse_delete(args: &str) -> Result<Command, ParseError> {
    let index = parse_index(args).ok_or(ParseError::InvalidFormat {
        usage: DELETE_USAGE,
    })?;
    Ok(Command::Delete { index })
}

fn parse_find(args: &str) -> Result<Command, ParseError> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_owned).collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage: FIND_USAGE });
    }
    Ok(Command::Find { keywords })
}

/// A positive decimal integer; anything else (zero, signs, non-digits,
/// overflow, empty) is rejected alike.
fn parse_index(raw: &str) -> Option<Index> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<usize>().ok().and_then(Index::from_one_based)
}
