//! Table rendering of the filtered view.

use comfy_table::{Cell, Table};

use quizbank_core::model::QuestionSet;

/// Renders the filtered view with 1-based display indices, the same
/// indices edit and delete resolve against.
pub fn view_table(sets: &[&QuestionSet]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Phone", "Email", "Answer", "Tags"]);

    for (i, set) in sets.iter().enumerate() {
        let tags = set
            .tags()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(set.question()),
            Cell::new(set.phone()),
            Cell::new(set.email()),
            Cell::new(set.answer()),
            Cell::new(tags),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizbank_core::field::{Answer, Email, Phone, Question, Tag};
    use std::collections::BTreeSet;

    #[test]
    fn rows_carry_one_based_indices() {
        let set = QuestionSet::new(
            Question::new("Alice Pauline").unwrap(),
            Phone::new("94351253").unwrap(),
            Email::new("alice@example.com").unwrap(),
            Answer::new("42").unwrap(),
            BTreeSet::from([Tag::new("friends").unwrap()]),
        );
        let rendered = view_table(&[&set]).to_string();
        assert!(rendered.contains("Alice Pauline"));
        assert!(rendered.contains("friends"));
        assert!(rendered.contains('1'));
    }
}
