//! Persistence seam between the engine and the storage backend.

use crate::model::QuestionBank;

/// Write-side persistence hook.
///
/// The engine calls [`BankStore::save`] once after every successful
/// mutation; implementations must not retain the bank beyond the call.
/// The JSON-backed implementation lives in the `quizbank-storage` crate.
pub trait BankStore {
    fn save(&self, bank: &QuestionBank) -> std::io::Result<()>;
}
