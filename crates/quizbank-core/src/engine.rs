//! Command execution engine.
//!
//! Owns the bank, the active find filter, and the persistence hook. All
//! writes to the bank go through [`Engine::execute`]; display indices
//! always resolve against the currently filtered view, so an index is
//! only stable until the next find or list.

use crate::command::{
    Command, CommandOutcome, EditDescriptor, Index, ADD_USAGE, DELETE_USAGE, EDIT_USAGE,
    FIND_USAGE,
};
use crate::error::CommandError;
use crate::model::{QuestionBank, QuestionSet};
use crate::parser::parse_command;
use crate::store::BankStore;

const LIST_SUCCESS: &str = "Listed all question sets";
const CLEAR_SUCCESS: &str = "Question bank has been cleared!";
const EXIT_MESSAGE: &str = "Exiting question bank as requested ...";

/// Active find predicate; `All` when no filter is set.
#[derive(Debug, Clone)]
enum Filter {
    All,
    Keywords(Vec<String>),
}

impl Filter {
    /// A record matches when any keyword equals (case-insensitively) any
    /// whitespace-delimited word of its question. Partial words do not
    /// match: "Meier" never matches "Meyer".
    fn matches(&self, set: &QuestionSet) -> bool {
        match self {
            Filter::All => true,
            Filter::Keywords(keywords) => set
                .question()
                .as_str()
                .split_whitespace()
                .any(|word| keywords.iter().any(|k| k.eq_ignore_ascii_case(word))),
        }
    }
}

/// The repository facade: parses, dispatches, mutates, persists.
pub struct Engine {
    bank: QuestionBank,
    filter: Filter,
    store: Box<dyn BankStore>,
}

impl Engine {
    pub fn new(bank: QuestionBank, store: Box<dyn BankStore>) -> Self {
        Self {
            bank,
            filter: Filter::All,
            store,
        }
    }

    /// Parses and applies one command line.
    ///
    /// Every successful mutation is saved through the store before this
    /// returns; a failed save surfaces as [`CommandError::Save`] with the
    /// in-memory mutation retained.
    pub fn execute(&mut self, line: &str) -> Result<CommandOutcome, CommandError> {
        let command = parse_command(line)?;
        self.apply(command)
    }

    /// The live filtered view, in bank order. Display indices are
    /// 1-based positions in this sequence.
    pub fn filtered(&self) -> Vec<&QuestionSet> {
        self.bank
            .question_sets()
            .iter()
            .filter(|set| self.filter.matches(set))
            .collect()
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    fn apply(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        match command {
            Command::Add(set) => {
                let summary = set.to_string();
                self.bank.add(set)?;
                self.persist()?;
                Ok(CommandOutcome::with_refresh(format!(
                    "New question set added: {summary}"
                )))
            }
            Command::Edit { index, edits } => self.edit(index, edits),
            Command::Delete { index } => {
                let target = self.resolve(index)?;
                self.bank.remove(&target)?;
                self.persist()?;
                Ok(CommandOutcome::with_refresh(format!(
                    "Deleted question set: {target}"
                )))
            }
            Command::Find { keywords } => {
                self.filter = Filter::Keywords(keywords);
                let count = self.filtered().len();
                Ok(CommandOutcome::with_refresh(format!(
                    "{count} question sets listed!"
                )))
            }
            Command::List => {
                self.filter = Filter::All;
                Ok(CommandOutcome::with_refresh(LIST_SUCCESS))
            }
            Command::Clear => {
                self.bank = QuestionBank::default();
                self.persist()?;
                Ok(CommandOutcome::with_refresh(CLEAR_SUCCESS))
            }
            Command::Help => Ok(CommandOutcome::new(format!(
                "{ADD_USAGE}\n\n{EDIT_USAGE}\n\n{DELETE_USAGE}\n\n{FIND_USAGE}\n\n\
                 list: Lists every question set.\n\
                 clear: Empties the whole bank.\n\
                 exit: Leaves the program."
            ))),
            Command::Exit => Ok(CommandOutcome::with_exit(EXIT_MESSAGE)),
        }
    }

    fn edit(&mut self, index: Index, edits: EditDescriptor) -> Result<CommandOutcome, CommandError> {
        let target = self.resolve(index)?;
        let edited = edits.apply(&target);

        // Re-keying onto another record's identity is a duplicate; the
        // unique list allows an in-place same-identity replacement.
        self.bank.set(&target, edited.clone())?;
        self.persist()?;
        Ok(CommandOutcome::with_refresh(format!(
            "Edited question set: {edited}"
        )))
    }

    /// Resolves a 1-based display index against the filtered view.
    fn resolve(&self, index: Index) -> Result<QuestionSet, CommandError> {
        self.filtered()
            .get(index.zero_based())
            .copied()
            .cloned()
            .ok_or(CommandError::InvalidIndex)
    }

    fn persist(&self) -> Result<(), CommandError> {
        self.store.save(&self.bank).map_err(|source| {
            tracing::warn!("post-mutation save failed: {source}");
            CommandError::Save { source }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    use super::*;
    use crate::model::testutil::{alice, benson, question_set};

    /// Counts saves so tests can assert exactly when persistence runs.
    struct CountingStore {
        saves: Rc<Cell<usize>>,
    }

    impl BankStore for CountingStore {
        fn save(&self, _bank: &QuestionBank) -> io::Result<()> {
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    struct FailingStore;

    impl BankStore for FailingStore {
        fn save(&self, _bank: &QuestionBank) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    fn engine_with(sets: Vec<QuestionSet>) -> (Engine, Rc<Cell<usize>>) {
        let saves = Rc::new(Cell::new(0));
        let mut bank = QuestionBank::default();
        bank.replace_all(sets).unwrap();
        let engine = Engine::new(
            bank,
            Box::new(CountingStore {
                saves: Rc::clone(&saves),
            }),
        );
        (engine, saves)
    }

    #[test]
    fn add_appends_and_saves() {
        let (mut engine, saves) = engine_with(vec![]);
        let outcome = engine
            .execute("add q/Alice Pauline p/94351253 e/alice@example.com a/42")
            .unwrap();
        assert!(outcome.feedback.starts_with("New question set added: Alice Pauline"));
        assert_eq!(engine.bank().question_sets().len(), 1);
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn add_duplicate_identity_is_rejected_and_not_saved() {
        let (mut engine, saves) = engine_with(vec![alice()]);
        let err = engine
            .execute("add q/Alice Pauline p/11122233 e/other@example.com a/7")
            .unwrap_err();
        assert!(matches!(err, CommandError::Duplicate));
        assert_eq!(engine.bank().question_sets().len(), 1);
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn find_matches_whole_tokens_case_insensitively() {
        let daniel = question_set("Daniel Meier", "87652533", "cornelia@example.com", "10", &[]);
        let elle = question_set("Elle Meyer", "9482224", "werner@example.com", "11", &[]);
        let (mut engine, _) = engine_with(vec![daniel.clone(), elle]);

        let outcome = engine.execute("find meier").unwrap();
        assert_eq!(outcome.feedback, "1 question sets listed!");
        assert_eq!(engine.filtered(), [&daniel]);
    }

    #[test]
    fn list_clears_the_active_filter() {
        let (mut engine, _) = engine_with(vec![alice(), benson()]);
        engine.execute("find nothing matches this").unwrap();
        assert!(engine.filtered().is_empty());

        let outcome = engine.execute("list").unwrap();
        assert_eq!(outcome.feedback, "Listed all question sets");
        assert_eq!(engine.filtered().len(), 2);
    }

    #[test]
    fn edit_resolves_index_against_filtered_view() {
        let (mut engine, saves) = engine_with(vec![alice(), benson()]);
        // Narrow the view to Benson, then edit "1": it must hit Benson,
        // not Alice.
        engine.execute("find Benson").unwrap();
        engine.execute("edit 1 p/10101010").unwrap();

        let bank = engine.bank().question_sets();
        assert_eq!(bank.as_slice()[0], alice());
        assert_eq!(bank.as_slice()[1].phone().as_str(), "10101010");
        assert_eq!(bank.as_slice()[1].question().as_str(), "Benson Meier");
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn edit_to_existing_identity_is_a_duplicate() {
        let (mut engine, saves) = engine_with(vec![alice(), benson()]);
        let err = engine.execute("edit 1 q/Benson Meier").unwrap_err();
        assert!(matches!(err, CommandError::Duplicate));
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn edit_same_record_keeping_identity_is_allowed() {
        let (mut engine, _) = engine_with(vec![alice()]);
        engine.execute("edit 1 a/new answer").unwrap();
        let bank = engine.bank().question_sets();
        assert_eq!(bank.as_slice()[0].answer().as_str(), "new answer");
        assert_eq!(bank.as_slice()[0].question().as_str(), "Alice Pauline");
    }

    #[test]
    fn edit_bare_tag_prefix_clears_tags() {
        let (mut engine, _) = engine_with(vec![alice()]);
        assert!(!engine.bank().question_sets().as_slice()[0].tags().is_empty());

        engine.execute("edit 1 t/").unwrap();
        assert!(engine.bank().question_sets().as_slice()[0].tags().is_empty());
    }

    #[test]
    fn edit_without_tag_prefix_leaves_tags_unchanged() {
        let (mut engine, _) = engine_with(vec![alice()]);
        engine.execute("edit 1 p/55555555").unwrap();
        let tags = engine.bank().question_sets().as_slice()[0].tags();
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn delete_out_of_range_index_changes_nothing() {
        let (mut engine, saves) = engine_with(vec![alice(), benson()]);
        let err = engine.execute("delete 9").unwrap_err();
        assert!(matches!(err, CommandError::InvalidIndex));
        assert_eq!(engine.bank().question_sets().len(), 2);
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn delete_resolves_index_against_filtered_view() {
        let (mut engine, _) = engine_with(vec![alice(), benson()]);
        engine.execute("find Benson").unwrap();
        engine.execute("delete 1").unwrap();

        let bank = engine.bank().question_sets();
        assert_eq!(bank.as_slice(), [alice()]);
    }

    #[test]
    fn clear_empties_the_bank_and_saves() {
        let (mut engine, saves) = engine_with(vec![alice(), benson()]);
        let outcome = engine.execute("clear").unwrap();
        assert_eq!(outcome.feedback, "Question bank has been cleared!");
        assert!(engine.bank().question_sets().is_empty());
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn save_failure_is_reported_but_mutation_is_kept() {
        let mut engine = Engine::new(QuestionBank::default(), Box::new(FailingStore));
        let err = engine
            .execute("add q/Alice Pauline p/94351253 e/alice@example.com a/42")
            .unwrap_err();
        assert!(err.to_string().starts_with("Could not save data to file:"));
        // Reported, not rolled back.
        assert_eq!(engine.bank().question_sets().len(), 1);
    }

    #[test]
    fn exit_sets_the_exit_flag_without_saving() {
        let (mut engine, saves) = engine_with(vec![alice()]);
        let outcome = engine.execute("exit").unwrap();
        assert!(outcome.exit);
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn parse_errors_pass_through_execute() {
        let (mut engine, _) = engine_with(vec![]);
        let err = engine.execute("bogus").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command");
    }
}
