//! Built-in sample data, seeded on first launch and by `quizbank init`.

use std::collections::BTreeSet;

use quizbank_core::field::{Answer, Email, Phone, Question, Tag};
use quizbank_core::model::{QuestionBank, QuestionSet};

const SAMPLES: [(&str, &str, &str, &str, &[&str]); 3] = [
    (
        "What is the powerhouse of the cell",
        "94351253",
        "bio@example.com",
        "The mitochondria",
        &["biology"],
    ),
    (
        "How many cranial nerves are there",
        "98765432",
        "anatomy@example.com",
        "Twelve",
        &["anatomy", "nerves"],
    ),
    (
        "Which vitamin is produced in the skin",
        "87652533",
        "nutrition@example.com",
        "Vitamin D",
        &[],
    ),
];

/// A small starter bank. Sample values are compile-time constants, so
/// construction cannot fail at runtime.
pub fn sample_bank() -> QuestionBank {
    let mut bank = QuestionBank::default();
    for (question, phone, email, answer, tags) in SAMPLES {
        let tags: BTreeSet<Tag> = tags
            .iter()
            .map(|t| Tag::new(*t).expect("sample tag is valid"))
            .collect();
        let set = QuestionSet::new(
            Question::new(question).expect("sample question is valid"),
            Phone::new(phone).expect("sample phone is valid"),
            Email::new(email).expect("sample email is valid"),
            Answer::new(answer).expect("sample answer is valid"),
            tags,
        );
        bank.add(set).expect("sample questions are distinct");
    }
    bank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_bank_builds_and_is_unique() {
        assert_eq!(sample_bank().question_sets().len(), 3);
    }
}
