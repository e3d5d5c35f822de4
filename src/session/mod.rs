use std::collections::HashMap;

use uuid::Uuid;

use crate::catalog::{self, StepKey, StepSpec};
use crate::context::UserContext;

/// Last produced text per step. Entries are whole values: a regeneration or
/// user edit fully replaces the previous text, never appends to it.
pub type ResultsStore = HashMap<StepKey, String>;

/// All per-session state: the user's memo parameters, the results produced
/// so far, and the navigation cursor over the flattened step order. Owned by
/// the wizard loop and passed explicitly; nothing here is process-global.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub inputs: UserContext,
    pub results: ResultsStore,
    cursor: usize,
}

impl Session {
    pub fn new(inputs: UserContext) -> Self {
        Self { id: Uuid::new_v4(), inputs, results: ResultsStore::new(), cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &'static StepSpec {
        catalog::step_at(self.cursor).expect("cursor stays within the catalog")
    }

    /// Moves to the next step, staying on the last one once reached.
    pub fn advance(&mut self) {
        if self.cursor + 1 < catalog::step_count() {
            self.cursor += 1;
        }
    }

    /// Jumps anywhere. Prerequisites are not enforced; see
    /// [`Session::missing_references`] for the warning path.
    pub fn jump(&mut self, key: StepKey) {
        self.cursor = catalog::position_of(key);
    }

    pub fn record(&mut self, key: StepKey, text: String) {
        self.results.insert(key, text);
    }

    /// Drops a stored result so the step can be re-triggered.
    pub fn clear(&mut self, key: StepKey) {
        self.results.remove(&key);
    }

    pub fn result(&self, key: StepKey) -> Option<&str> {
        self.results.get(&key).map(String::as_str)
    }

    pub fn has(&self, key: StepKey) -> bool {
        self.results.contains_key(&key)
    }

    pub fn completed_count(&self) -> usize {
        self.results.len()
    }

    /// Clears every result and returns the cursor to the first step.
    pub fn reset(&mut self) {
        self.results.clear();
        self.cursor = 0;
    }

    /// Referenced prior steps with no stored text yet. Their template slots
    /// will interpolate as empty strings if the user proceeds anyway.
    pub fn missing_references(&self, key: StepKey) -> Vec<StepKey> {
        key.references().iter().copied().filter(|dep| !self.has(*dep)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(UserContext::default())
    }

    #[test]
    fn record_replaces_without_residue() {
        let mut s = session();
        s.record(StepKey::CoreIssue, "first draft".into());
        s.record(StepKey::CoreIssue, "second".into());
        assert_eq!(s.result(StepKey::CoreIssue), Some("second"));
        assert_eq!(s.completed_count(), 1);
    }

    #[test]
    fn clear_allows_regeneration() {
        let mut s = session();
        s.record(StepKey::Status, "old".into());
        s.clear(StepKey::Status);
        assert!(!s.has(StepKey::Status));
    }

    #[test]
    fn reset_empties_the_store_and_rewinds_the_cursor() {
        let mut s = session();
        s.record(StepKey::CoreIssue, "x".into());
        s.record(StepKey::FinalMemo, "y".into());
        s.jump(StepKey::FinalMemo);
        s.reset();
        assert_eq!(s.completed_count(), 0);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.current().key, StepKey::AudienceProfile);
    }

    #[test]
    fn advance_saturates_at_the_last_step() {
        let mut s = session();
        for _ in 0..100 {
            s.advance();
        }
        assert_eq!(s.cursor(), catalog::step_count() - 1);
        assert_eq!(s.current().key, StepKey::FinalMemo);
    }

    #[test]
    fn jump_is_unrestricted_but_reports_missing_references() {
        let mut s = session();
        s.jump(StepKey::FullMemoDraft);
        assert_eq!(s.current().key, StepKey::FullMemoDraft);
        let missing = s.missing_references(StepKey::FullMemoDraft);
        assert_eq!(missing.len(), 4);

        s.record(StepKey::Status, "status text".into());
        let missing = s.missing_references(StepKey::FullMemoDraft);
        assert!(!missing.contains(&StepKey::Status));
        assert!(missing.contains(&StepKey::ExecutiveSummary));
    }
}
