use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use fs_err as fs;

use crate::catalog::StepKey;
use crate::session::ResultsStore;

pub const CHECKLIST_HEADER: &str = "# VERIFICATION CHECKLIST";

/// The downloadable document: final memo, a separator, and the verification
/// checklist. None until the final memo has been generated; a missing
/// checklist renders as an empty section.
pub fn assemble(results: &ResultsStore) -> Option<String> {
    let memo = results.get(&StepKey::FinalMemo)?;
    let checklist = results.get(&StepKey::VerificationList).map(String::as_str).unwrap_or("");
    Some(format!("{memo}\n\n---\n\n{CHECKLIST_HEADER}\n\n{checklist}"))
}

pub fn write_document(path: &Path, results: &ResultsStore) -> Result<PathBuf> {
    let Some(doc) = assemble(results) else {
        bail!("the final memo has not been generated yet");
    };
    fs::write(path, doc)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_uses_the_exact_separator_and_header() {
        let mut results = ResultsStore::new();
        results.insert(StepKey::FinalMemo, "MEMO BODY".into());
        results.insert(StepKey::VerificationList, "LIST".into());
        assert_eq!(
            assemble(&results).unwrap(),
            "MEMO BODY\n\n---\n\n# VERIFICATION CHECKLIST\n\nLIST"
        );
    }

    #[test]
    fn missing_checklist_renders_empty_missing_memo_renders_nothing() {
        let mut results = ResultsStore::new();
        results.insert(StepKey::FinalMemo, "MEMO".into());
        assert_eq!(
            assemble(&results).unwrap(),
            "MEMO\n\n---\n\n# VERIFICATION CHECKLIST\n\n"
        );

        assert!(assemble(&ResultsStore::new()).is_none());
    }

    #[test]
    fn write_document_lands_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy_memo.md");

        let mut results = ResultsStore::new();
        assert!(write_document(&path, &results).is_err());

        results.insert(StepKey::FinalMemo, "MEMO BODY".into());
        results.insert(StepKey::VerificationList, "LIST".into());
        let written = write_document(&path, &results).unwrap();
        let on_disk = fs::read_to_string(written).unwrap();
        assert_eq!(on_disk, "MEMO BODY\n\n---\n\n# VERIFICATION CHECKLIST\n\nLIST");
    }
}
