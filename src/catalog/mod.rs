use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MemoError;

/// Identifier of one generation step. One variant per unit of work in the
/// drafting method; templates and prerequisite lookups match on this
/// exhaustively, so adding a step is a compile-time event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    AudienceProfile,
    PurposeClarity,
    PositionCredibility,
    CoreIssue,
    ScopeScale,
    Stakeholders,
    Status,
    Criteria,
    Interpretation,
    Outlook,
    LeveragePoint,
    Alternatives,
    Recommendation,
    ExecutiveSummary,
    FullMemoDraft,
    ToneAudit,
    BiasAudit,
    TraumaCheck,
    MacroRevision,
    MesoRevision,
    MicroRevision,
    FinalChecklist,
    VerificationList,
    FinalMemo,
}

impl StepKey {
    pub const fn key(self) -> &'static str {
        match self {
            StepKey::AudienceProfile => "audience_profile",
            StepKey::PurposeClarity => "purpose_clarity",
            StepKey::PositionCredibility => "position_credibility",
            StepKey::CoreIssue => "core_issue",
            StepKey::ScopeScale => "scope_scale",
            StepKey::Stakeholders => "stakeholders",
            StepKey::Status => "status",
            StepKey::Criteria => "criteria",
            StepKey::Interpretation => "interpretation",
            StepKey::Outlook => "outlook",
            StepKey::LeveragePoint => "leverage_point",
            StepKey::Alternatives => "alternatives",
            StepKey::Recommendation => "recommendation",
            StepKey::ExecutiveSummary => "executive_summary",
            StepKey::FullMemoDraft => "full_memo_draft",
            StepKey::ToneAudit => "tone_audit",
            StepKey::BiasAudit => "bias_audit",
            StepKey::TraumaCheck => "trauma_check",
            StepKey::MacroRevision => "macro_revision",
            StepKey::MesoRevision => "meso_revision",
            StepKey::MicroRevision => "micro_revision",
            StepKey::FinalChecklist => "final_checklist",
            StepKey::VerificationList => "verification_list",
            StepKey::FinalMemo => "final_memo",
        }
    }

    /// Prior steps this step's template interpolates. Used to warn (never
    /// block) when the user generates out of order.
    pub const fn references(self) -> &'static [StepKey] {
        match self {
            StepKey::PurposeClarity => &[StepKey::AudienceProfile],
            StepKey::ScopeScale => &[StepKey::CoreIssue],
            StepKey::Stakeholders => &[StepKey::CoreIssue],
            StepKey::Status => &[StepKey::CoreIssue],
            StepKey::Interpretation => &[StepKey::Status],
            StepKey::Outlook => &[StepKey::Status],
            StepKey::Alternatives => &[StepKey::Criteria],
            StepKey::Recommendation => &[StepKey::Alternatives],
            StepKey::ExecutiveSummary => &[StepKey::CoreIssue, StepKey::Recommendation],
            StepKey::FullMemoDraft => &[
                StepKey::ExecutiveSummary,
                StepKey::Status,
                StepKey::Interpretation,
                StepKey::Recommendation,
            ],
            StepKey::ToneAudit => &[StepKey::FullMemoDraft],
            StepKey::BiasAudit => &[StepKey::FullMemoDraft],
            StepKey::TraumaCheck => &[StepKey::FullMemoDraft],
            StepKey::VerificationList => &[StepKey::FullMemoDraft],
            StepKey::FinalMemo => &[StepKey::FullMemoDraft],
            _ => &[],
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StepKey {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        steps()
            .map(|spec| spec.key)
            .find(|k| k.key() == s)
            .ok_or_else(|| MemoError::InvalidInput(format!("unknown step key: {s}")))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub key: StepKey,
    pub name: &'static str,
    pub use_search: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct PhaseSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
    pub explanation: &'static str,
    pub steps: &'static [StepSpec],
}

static PHASES: [PhaseSpec; 9] = [
    PhaseSpec {
        id: "phase0",
        name: "Phase 0: Triangle of Persuasion",
        desc: "Define Audience, Purpose, and Position",
        explanation: "Before gathering data or drafting, define your three foundations. If any part is unclear, the memo's persuasiveness collapses.",
        steps: &[
            StepSpec { key: StepKey::AudienceProfile, name: "Define Your Audience", use_search: false },
            StepSpec { key: StepKey::PurposeClarity, name: "Clarify Your Purpose", use_search: false },
            StepSpec { key: StepKey::PositionCredibility, name: "Establish Your Position", use_search: false },
        ],
    },
    PhaseSpec {
        id: "phase1",
        name: "Phase 1: Frame the Policy Problem",
        desc: "Define a problem that is analytically rigorous",
        explanation: "We're not writing about broad topics. We're writing about a specific policy problem using real data.",
        steps: &[
            StepSpec { key: StepKey::CoreIssue, name: "Identify the Core Issue", use_search: true },
            StepSpec { key: StepKey::ScopeScale, name: "Determine Scope and Scale", use_search: true },
            StepSpec { key: StepKey::Stakeholders, name: "Define Stakeholders", use_search: true },
        ],
    },
    PhaseSpec {
        id: "phase2",
        name: "Phase 2: Build the Evidence Base",
        desc: "Status, Criteria, Interpretation, Outlook",
        explanation: "Shift from defining what's wrong to explaining why it matters and how we know using verified sources.",
        steps: &[
            StepSpec { key: StepKey::Status, name: "Status — What Is Happening", use_search: true },
            StepSpec { key: StepKey::Criteria, name: "Criteria — What Matters", use_search: false },
            StepSpec { key: StepKey::Interpretation, name: "Interpretation — Why This Is Happening", use_search: true },
            StepSpec { key: StepKey::Outlook, name: "Outlook — What Might Happen Next", use_search: true },
        ],
    },
    PhaseSpec {
        id: "phase3",
        name: "Phase 3: Develop Recommendation",
        desc: "Move from analysis to action",
        explanation: "A persuasive recommendation is specific, feasible, and proportionate to the evidence.",
        steps: &[
            StepSpec { key: StepKey::LeveragePoint, name: "Identify Leverage Points", use_search: true },
            StepSpec { key: StepKey::Alternatives, name: "Evaluate Alternatives", use_search: true },
            StepSpec { key: StepKey::Recommendation, name: "Articulate the Recommendation", use_search: false },
        ],
    },
    PhaseSpec {
        id: "phase4",
        name: "Phase 4: Draft Executive Summary",
        desc: "Signal purpose and trustworthiness",
        explanation: "Different audiences need different structures. Choose the type that fits your memo's purpose.",
        steps: &[
            StepSpec { key: StepKey::ExecutiveSummary, name: "Executive Summary", use_search: false },
        ],
    },
    PhaseSpec {
        id: "phase5",
        name: "Phase 5: Structure the Memo",
        desc: "Organize with clarity and flow",
        explanation: "Assemble all sections. Apply deductive paragraph structure and active voice.",
        steps: &[
            StepSpec { key: StepKey::FullMemoDraft, name: "Complete Memo Draft", use_search: false },
        ],
    },
    PhaseSpec {
        id: "phase6",
        name: "Phase 6: Tone & Bias Check",
        desc: "Ensure empathy, inclusion, and balance",
        explanation: "Review for professional yet empathetic tone. Check for implicit bias.",
        steps: &[
            StepSpec { key: StepKey::ToneAudit, name: "Tone Audit", use_search: false },
            StepSpec { key: StepKey::BiasAudit, name: "Bias Audit", use_search: false },
            StepSpec { key: StepKey::TraumaCheck, name: "Trauma-Informed Check", use_search: false },
        ],
    },
    PhaseSpec {
        id: "phase7",
        name: "Phase 7: Guided Revision",
        desc: "Systematic revision",
        explanation: "Move through revisions systematically: macro, meso, and micro levels.",
        steps: &[
            StepSpec { key: StepKey::MacroRevision, name: "Macro-Level Revision", use_search: false },
            StepSpec { key: StepKey::MesoRevision, name: "Meso-Level Revision", use_search: false },
            StepSpec { key: StepKey::MicroRevision, name: "Micro-Level Revision", use_search: false },
        ],
    },
    PhaseSpec {
        id: "phase8",
        name: "Phase 8: Final Polish",
        desc: "Quality assurance checklist",
        explanation: "Final pass before submission. Extract claims needing verification.",
        steps: &[
            StepSpec { key: StepKey::FinalChecklist, name: "Final Checklist", use_search: false },
            StepSpec { key: StepKey::VerificationList, name: "Verification List", use_search: false },
            StepSpec { key: StepKey::FinalMemo, name: "Final Polished Memo", use_search: false },
        ],
    },
];

pub fn phases() -> &'static [PhaseSpec] {
    &PHASES
}

/// Flattened step order across all phases; the navigation cursor indexes it.
pub fn steps() -> impl Iterator<Item = &'static StepSpec> {
    PHASES.iter().flat_map(|p| p.steps)
}

pub fn step_count() -> usize {
    PHASES.iter().map(|p| p.steps.len()).sum()
}

pub fn step_at(index: usize) -> Option<&'static StepSpec> {
    steps().nth(index)
}

pub fn position_of(key: StepKey) -> usize {
    steps().position(|s| s.key == key).expect("every key appears in the catalog")
}

pub fn spec_of(key: StepKey) -> &'static StepSpec {
    steps().find(|s| s.key == key).expect("every key appears in the catalog")
}

/// Phase a step belongs to, for display.
pub fn phase_of(key: StepKey) -> &'static PhaseSpec {
    PHASES
        .iter()
        .find(|p| p.steps.iter().any(|s| s.key == key))
        .expect("every key appears in exactly one phase")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_phases_and_unique_keys() {
        assert_eq!(phases().len(), 9);
        assert_eq!(step_count(), 24);
        let mut seen = std::collections::HashSet::new();
        for spec in steps() {
            assert!(seen.insert(spec.key), "duplicate key {}", spec.key);
        }
    }

    #[test]
    fn cursor_indexing_round_trips() {
        for (i, spec) in steps().enumerate() {
            assert_eq!(position_of(spec.key), i);
            assert_eq!(step_at(i).unwrap().key, spec.key);
        }
        assert!(step_at(step_count()).is_none());
    }

    #[test]
    fn key_strings_parse_back() {
        for spec in steps() {
            let parsed: StepKey = spec.key.key().parse().unwrap();
            assert_eq!(parsed, spec.key);
        }
        assert!("not_a_step".parse::<StepKey>().is_err());
    }

    #[test]
    fn references_point_at_earlier_or_known_steps() {
        for spec in steps() {
            for dep in spec.key.references() {
                // Every reference must exist in the catalog; ordering is a
                // convention of the method, not an enforced constraint.
                let _ = spec_of(*dep);
            }
        }
        assert!(StepKey::CoreIssue.references().is_empty());
        assert_eq!(StepKey::Interpretation.references(), &[StepKey::Status]);
    }

    #[test]
    fn grounded_steps_match_the_method() {
        let grounded: Vec<StepKey> =
            steps().filter(|s| s.use_search).map(|s| s.key).collect();
        assert_eq!(
            grounded,
            vec![
                StepKey::CoreIssue,
                StepKey::ScopeScale,
                StepKey::Stakeholders,
                StepKey::Status,
                StepKey::Interpretation,
                StepKey::Outlook,
                StepKey::LeveragePoint,
                StepKey::Alternatives,
            ]
        );
    }
}
