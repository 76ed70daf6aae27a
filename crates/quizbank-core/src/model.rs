//! Question-set record, unique list, and the owning bank.
//!
//! The list enforces the central invariant: no two stored question sets
//! share an identity key (the question text). Identity equality decides
//! add/replace conflicts; full value equality decides removal, so an
//! exact record can be deleted without touching near-duplicates.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::UniqueListError;
use crate::field::{Answer, Email, Phone, Question, Tag};

/// One stored record: a question, its source contact, an answer, and tags.
///
/// Immutable after construction; edits build a replacement record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    question: Question,
    phone: Phone,
    email: Email,
    answer: Answer,
    tags: BTreeSet<Tag>,
}

impl QuestionSet {
    pub fn new(
        question: Question,
        phone: Phone,
        email: Email,
        answer: Answer,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self {
            question,
            phone,
            email,
            answer,
            tags,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Identity equality: do the two records denote the same entry?
    ///
    /// Weaker than `==`; only the question text is compared.
    pub fn is_same(&self, other: &QuestionSet) -> bool {
        self.question == other.question
    }
}

impl fmt::Display for QuestionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Answer: {}",
            self.question, self.phone, self.email, self.answer
        )?;
        if !self.tags.is_empty() {
            write!(f, "; Tags: ")?;
            for tag in &self.tags {
                write!(f, "[{tag}]")?;
            }
        }
        Ok(())
    }
}

/// Ordered container of question sets with at most one record per
/// identity key. Insertion order is preserved and observable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniqueQuestionSetList {
    inner: Vec<QuestionSet>,
}

impl UniqueQuestionSetList {
    /// True iff some stored record is identity-equal to `candidate`.
    pub fn contains(&self, candidate: &QuestionSet) -> bool {
        self.inner.iter().any(|stored| stored.is_same(candidate))
    }

    /// Appends `set`, rejecting an identity clash with any stored record.
    pub fn add(&mut self, set: QuestionSet) -> Result<(), UniqueListError> {
        if self.contains(&set) {
            return Err(UniqueListError::Duplicate);
        }
        self.inner.push(set);
        Ok(())
    }

    /// Replaces `target` (located by value equality) with `replacement`,
    /// keeping its position.
    ///
    /// Fails with `NotFound` when `target` is absent, and with
    /// `Duplicate` when `replacement` is identity-equal to a stored
    /// record other than `target`.
    pub fn set(
        &mut self,
        target: &QuestionSet,
        replacement: QuestionSet,
    ) -> Result<(), UniqueListError> {
        let index = self
            .inner
            .iter()
            .position(|stored| stored == target)
            .ok_or(UniqueListError::NotFound)?;

        if !target.is_same(&replacement) && self.contains(&replacement) {
            return Err(UniqueListError::Duplicate);
        }

        self.inner[index] = replacement;
        Ok(())
    }

    /// Removes the record value-equal to `target`.
    pub fn remove(&mut self, target: &QuestionSet) -> Result<(), UniqueListError> {
        let index = self
            .inner
            .iter()
            .position(|stored| stored == target)
            .ok_or(UniqueListError::NotFound)?;
        self.inner.remove(index);
        Ok(())
    }

    /// Atomically adopts `sets` in the given order.
    ///
    /// Fails without modifying the list when any two inputs are
    /// identity-equal.
    pub fn replace_all(&mut self, sets: Vec<QuestionSet>) -> Result<(), UniqueListError> {
        for (i, a) in sets.iter().enumerate() {
            if sets[i + 1..].iter().any(|b| a.is_same(b)) {
                return Err(UniqueListError::Duplicate);
            }
        }
        self.inner = sets;
        Ok(())
    }

    /// Read-only, order-preserving view. Shared borrows cannot write
    /// through it, so no runtime mutation guard is needed.
    pub fn as_slice(&self) -> &[QuestionSet] {
        &self.inner
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionSet> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<'a> IntoIterator for &'a UniqueQuestionSetList {
    type Item = &'a QuestionSet;
    type IntoIter = std::slice::Iter<'a, QuestionSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// The whole in-memory collection. Thin owning wrapper around the unique
/// list; the engine is its only writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    sets: UniqueQuestionSetList,
}

impl QuestionBank {
    pub fn contains(&self, candidate: &QuestionSet) -> bool {
        self.sets.contains(candidate)
    }

    pub fn add(&mut self, set: QuestionSet) -> Result<(), UniqueListError> {
        self.sets.add(set)
    }

    pub fn set(
        &mut self,
        target: &QuestionSet,
        replacement: QuestionSet,
    ) -> Result<(), UniqueListError> {
        self.sets.set(target, replacement)
    }

    pub fn remove(&mut self, target: &QuestionSet) -> Result<(), UniqueListError> {
        self.sets.remove(target)
    }

    pub fn replace_all(&mut self, sets: Vec<QuestionSet>) -> Result<(), UniqueListError> {
        self.sets.replace_all(sets)
    }

    pub fn question_sets(&self) -> &UniqueQuestionSetList {
        &self.sets
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    /// Builds a question set from raw strings, panicking on invalid
    /// fixture data.
    pub fn question_set(
        question: &str,
        phone: &str,
        email: &str,
        answer: &str,
        tags: &[&str],
    ) -> QuestionSet {
        QuestionSet::new(
            Question::new(question).unwrap(),
            Phone::new(phone).unwrap(),
            Email::new(email).unwrap(),
            Answer::new(answer).unwrap(),
            tags.iter().map(|t| Tag::new(*t).unwrap()).collect(),
        )
    }

    pub fn alice() -> QuestionSet {
        question_set(
            "Alice Pauline",
            "94351253",
            "alice@example.com",
            "42",
            &["friends"],
        )
    }

    pub fn benson() -> QuestionSet {
        question_set(
            "Benson Meier",
            "98765432",
            "johnd@example.com",
            "311 Clementi Ave 2",
            &["owesMoney", "friends"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::{alice, benson, question_set};
    use super::*;

    #[test]
    fn is_same_compares_question_only() {
        let a = alice();
        let b = question_set("Alice Pauline", "87654321", "other@example.com", "43", &[]);
        assert!(a.is_same(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn duplicate_tags_collapse() {
        let a = question_set("Alice Pauline", "94351253", "a@bc.de", "42", &["x", "x"]);
        assert_eq!(a.tags().len(), 1);
    }

    #[test]
    fn add_rejects_identity_duplicate_with_different_fields() {
        let mut list = UniqueQuestionSetList::default();
        list.add(alice()).unwrap();
        let near = question_set("Alice Pauline", "11122233", "new@example.com", "7", &[]);
        assert_eq!(list.add(near), Err(UniqueListError::Duplicate));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut list = UniqueQuestionSetList::default();
        list.add(alice()).unwrap();
        list.add(benson()).unwrap();
        let questions: Vec<_> = list.iter().map(|s| s.question().as_str()).collect();
        assert_eq!(questions, ["Alice Pauline", "Benson Meier"]);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut list = UniqueQuestionSetList::default();
        list.add(alice()).unwrap();
        list.add(benson()).unwrap();

        let edited = question_set("Alice Cooper", "94351253", "alice@example.com", "42", &[]);
        list.set(&alice(), edited.clone()).unwrap();

        assert_eq!(list.as_slice()[0], edited);
        assert_eq!(list.as_slice()[1], benson());
    }

    #[test]
    fn set_requires_value_equal_target() {
        let mut list = UniqueQuestionSetList::default();
        list.add(alice()).unwrap();
        let not_stored = question_set("Alice Pauline", "00000000", "x@y.zz", "0", &[]);
        assert_eq!(
            list.set(&not_stored, benson()),
            Err(UniqueListError::NotFound)
        );
    }

    #[test]
    fn set_rejects_collision_with_other_record() {
        let mut list = UniqueQuestionSetList::default();
        list.add(alice()).unwrap();
        list.add(benson()).unwrap();

        let renamed_to_benson =
            question_set("Benson Meier", "94351253", "alice@example.com", "42", &[]);
        assert_eq!(
            list.set(&alice(), renamed_to_benson),
            Err(UniqueListError::Duplicate)
        );
    }

    #[test]
    fn set_allows_same_identity_replacement() {
        let mut list = UniqueQuestionSetList::default();
        list.add(alice()).unwrap();
        let retagged = question_set("Alice Pauline", "94351253", "alice@example.com", "42", &[]);
        list.set(&alice(), retagged.clone()).unwrap();
        assert_eq!(list.as_slice(), [retagged]);
    }

    #[test]
    fn remove_uses_value_equality() {
        let mut list = UniqueQuestionSetList::default();
        list.add(alice()).unwrap();
        let same_identity = question_set("Alice Pauline", "99999999", "a@bc.de", "1", &[]);
        assert_eq!(list.remove(&same_identity), Err(UniqueListError::NotFound));
        list.remove(&alice()).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn replace_all_rejects_pairwise_identity_duplicates() {
        let mut list = UniqueQuestionSetList::default();
        list.add(benson()).unwrap();

        let twin = question_set("Alice Pauline", "11111111", "p@q.rs", "9", &[]);
        let err = list.replace_all(vec![alice(), twin]);
        assert_eq!(err, Err(UniqueListError::Duplicate));
        // The old contents survive a failed bulk replace.
        assert_eq!(list.as_slice(), [benson()]);
    }

    #[test]
    fn replace_all_adopts_input_order() {
        let mut list = UniqueQuestionSetList::default();
        list.replace_all(vec![benson(), alice()]).unwrap();
        let questions: Vec<_> = list.iter().map(|s| s.question().as_str()).collect();
        assert_eq!(questions, ["Benson Meier", "Alice Pauline"]);
    }

    #[test]
    fn display_includes_tags_when_present() {
        let shown = alice().to_string();
        assert!(shown.starts_with("Alice Pauline; Phone: 94351253"));
        assert!(shown.ends_with("Tags: [friends]"));
        let untagged = question_set("Carl Kurz", "95352563", "heinz@example.com", "ok", &[]);
        assert!(!untagged.to_string().contains("Tags:"));
    }
}
