use crate::catalog::{self, StepKey};
use crate::context::UserContext;
use crate::session::ResultsStore;

/// Role framing sent with every generation call.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert Policy Analyst following David Chrisinger's workflow.
Key Rules:
1. USE REAL DATA when requested.
2. Cite sources (Name, Year).
3. Be specific, not generic.
4. Do not hallucinate. If data isn't found, say so.";

/// Appended to the prompt of every grounded step, and only those.
pub const GROUNDING_SUFFIX: &str = "\
**CRITICAL INSTRUCTION: USE GOOGLE SEARCH.** You MUST search for REAL, CURRENT data, statistics, and specific examples.
- Do not make up numbers.
- Cite your sources with names and years (e.g., U.S. Census Bureau, 2023).
- If you cannot find a specific number, state that data is unavailable rather than hallucinating.";

/// Builds the full prompt for one step. Pure: same inputs, same text.
/// Prior results that have not been generated interpolate as empty strings.
pub fn build(key: StepKey, ctx: &UserContext, results: &ResultsStore) -> String {
    let body = template(key, ctx, results);
    if catalog::spec_of(key).use_search {
        format!("{body}\n\n{GROUNDING_SUFFIX}")
    } else {
        body
    }
}

fn template(key: StepKey, ctx: &UserContext, results: &ResultsStore) -> String {
    let prior = |k: StepKey| results.get(&k).map(String::as_str).unwrap_or("");

    match key {
        StepKey::AudienceProfile => format!(
            "Profile the target audience.\n\
             Topic: {} | Policymaker: {} | Audience: {}\n\
             Answer: 1) Who is the primary reader? 2) What authority do they have? 3) What do they value most (efficiency, equity, etc.)?\n\
             Describe top 3 decision priorities.",
            ctx.topic, ctx.policymaker_type, ctx.audience
        ),
        StepKey::PurposeClarity => format!(
            "Clarify the memo's purpose.\n\
             Audience Profile: {}\n\
             Stated Purpose: {}\n\
             Suggest 3 distinct purposes (inform/evaluate/persuade) and how each affects tone and evidence.",
            prior(StepKey::AudienceProfile),
            ctx.purpose
        ),
        StepKey::PositionCredibility => format!(
            "Establish the writer's credibility.\n\
             Role: {} | Topic: {}\n\
             Draft 2 sentences establishing analytical credibility without overstating expertise.",
            ctx.writer_role, ctx.topic
        ),
        StepKey::CoreIssue => format!(
            "Frame the core policy issue using REAL DATA.\n\
             Topic: {} | Audience: {}\n\
             **Search for current stats.** Answer with REAL DATA:\n\
             1) What is happening? (Include stats)\n\
             2) Why does it matter NOW?\n\
             3) Who is affected?",
            ctx.topic, ctx.audience
        ),
        StepKey::ScopeScale => format!(
            "Determine scope and scale using REAL DATA.\n\
             Core Issue: {}\n\
             Policymaker: {}\n\
             **Search for jurisdiction info.**\n\
             Propose 3 ways to narrow this into a tractable problem. Identify which agency has jurisdiction.",
            prior(StepKey::CoreIssue),
            ctx.policymaker_type
        ),
        StepKey::Stakeholders => format!(
            "Define stakeholders with REAL information.\n\
             Issue: {}\n\
             **Search for actual stakeholder orgs.**\n\
             Create a map: Primary, Secondary, Decision-makers. Name actual organizations.",
            prior(StepKey::CoreIssue)
        ),
        StepKey::Status => format!(
            "Describe current STATUS using REAL, VERIFIED DATA.\n\
             Problem: {}\n\
             **Search for verified statistics.**\n\
             Find REAL DATA on: 1) Scope/Scale 2) Recent trends (last 3 years) 3) Policy environment.\n\
             Every number must have a source.",
            prior(StepKey::CoreIssue)
        ),
        StepKey::Criteria => format!(
            "Define evaluation CRITERIA.\n\
             Audience: {} | Purpose: {}\n\
             List 3-5 criteria defining \"success\" for this audience.",
            ctx.audience, ctx.purpose
        ),
        StepKey::Interpretation => format!(
            "Provide INTERPRETATION using RESEARCH.\n\
             Status: {}\n\
             **Search for research on root causes.**\n\
             Distinguish proximate from root causes. Cite think tanks or academic studies.",
            prior(StepKey::Status)
        ),
        StepKey::Outlook => format!(
            "Forecast OUTLOOK using PROJECTIONS.\n\
             Status: {}\n\
             **Search for credible forecasts.**\n\
             Scenario A (Status Quo) vs Scenario B (Reform).",
            prior(StepKey::Status)
        ),
        StepKey::LeveragePoint => format!(
            "Identify LEVERAGE POINTS.\n\
             Decision-Maker: {}\n\
             **Search for legal/admin authority.**\n\
             What mechanisms (law, funding, pilot) can they realistically use?",
            ctx.policymaker_type
        ),
        StepKey::Alternatives => format!(
            "EVALUATE ALTERNATIVES with CASE STUDIES.\n\
             Criteria: {}\n\
             **Search for actual implementations elsewhere.**\n\
             Compare 3 options. For each, find where it has been tried and what the outcomes were.",
            prior(StepKey::Criteria)
        ),
        StepKey::Recommendation => format!(
            "ARTICULATE RECOMMENDATION.\n\
             Alternatives: {}\n\
             Draft a concise recommendation that is specific, measurable, and tied to the evidence.",
            prior(StepKey::Alternatives)
        ),
        StepKey::ExecutiveSummary => format!(
            "Draft EXECUTIVE SUMMARY.\n\
             Problem: {} | Recommendation: {}\n\
             Choose the best structure (Recommendation-First, Criteria-Driven, etc.) based on Purpose: {}.",
            prior(StepKey::CoreIssue),
            prior(StepKey::Recommendation),
            ctx.purpose
        ),
        StepKey::FullMemoDraft => format!(
            "STRUCTURE THE COMPLETE MEMO.\n\
             Exec Summary: {}\n\
             Status: {}\n\
             Interpretation: {}\n\
             Recommendation: {}\n\
             \n\
             Write 800-1200 words. Sections:\n\
             1) Title & Exec Summary\n\
             2) Status/Background\n\
             3) Analysis\n\
             4) Recommendation\n\
             5) Implementation\n\
             6) Sources List.",
            prior(StepKey::ExecutiveSummary),
            prior(StepKey::Status),
            prior(StepKey::Interpretation),
            prior(StepKey::Recommendation)
        ),
        StepKey::ToneAudit => format!(
            "TONE AUDIT.\n\
             Memo: {}\n\
             Review for empathy, factualness, and lack of paternalism.",
            prior(StepKey::FullMemoDraft)
        ),
        StepKey::BiasAudit => format!(
            "BIAS AUDIT.\n\
             Memo: {}\n\
             Identify implicit assumptions or unfair framings.",
            prior(StepKey::FullMemoDraft)
        ),
        StepKey::TraumaCheck => format!(
            "TRAUMA-INFORMED CHECK.\n\
             Memo: {}\n\
             Ensure dignity and agency for affected groups.",
            prior(StepKey::FullMemoDraft)
        ),
        StepKey::MacroRevision => "MACRO-LEVEL REVISION.\n\
             Review structure and flow. Does every section advance the purpose?"
            .to_string(),
        StepKey::MesoRevision => "MESO-LEVEL REVISION.\n\
             Check data sources and balance of evidence."
            .to_string(),
        StepKey::MicroRevision => "MICRO-LEVEL REVISION.\n\
             Identify wordy sentences and passive voice. Suggest concise rewrites."
            .to_string(),
        StepKey::FinalChecklist => "FINAL CHECKLIST.\n\
             Evaluate Clarity, Concision, Evidence, and Tone."
            .to_string(),
        StepKey::VerificationList => format!(
            "VERIFICATION LIST.\n\
             Extract ALL factual statements from: {}\n\
             List numbers, dates, names. Indicate if source is cited.",
            prior(StepKey::FullMemoDraft)
        ),
        StepKey::FinalMemo => format!(
            "FINAL POLISHED MEMO.\n\
             Refine the draft: {}\n\
             Incorporate all audit feedback. Ensure professional formatting.\n\
             Add a 'Verification Notes' section at the end.",
            prior(StepKey::FullMemoDraft)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::session::ResultsStore;

    #[test]
    fn every_step_builds_a_prompt_from_an_empty_store() {
        let ctx = UserContext::default();
        let results = ResultsStore::new();
        for spec in catalog::steps() {
            let prompt = build(spec.key, &ctx, &results);
            assert!(!prompt.trim().is_empty(), "empty prompt for {}", spec.key);
        }
    }

    #[test]
    fn grounding_suffix_appears_iff_the_step_is_grounded() {
        let ctx = UserContext::sample();
        let results = ResultsStore::new();
        for spec in catalog::steps() {
            let prompt = build(spec.key, &ctx, &results);
            assert_eq!(
                prompt.contains(GROUNDING_SUFFIX),
                spec.use_search,
                "suffix mismatch for {}",
                spec.key
            );
        }
    }

    #[test]
    fn core_issue_interpolates_topic_and_audience() {
        let ctx = UserContext {
            topic: "Affordable housing reform in Chicago".into(),
            audience: "City Budget Director".into(),
            ..UserContext::default()
        };
        let prompt = build(StepKey::CoreIssue, &ctx, &ResultsStore::new());
        assert!(prompt.contains("Affordable housing reform in Chicago"));
        assert!(prompt.contains("City Budget Director"));
        assert!(prompt.contains(GROUNDING_SUFFIX));
    }

    #[test]
    fn prior_results_flow_into_dependent_templates() {
        let ctx = UserContext::default();
        let mut results = ResultsStore::new();
        results.insert(StepKey::AudienceProfile, "READER-PROFILE".into());
        let prompt = build(StepKey::PurposeClarity, &ctx, &results);
        assert!(prompt.contains("READER-PROFILE"));

        // Absent references degrade to empty slots, never an error.
        let bare = build(StepKey::PurposeClarity, &ctx, &ResultsStore::new());
        assert!(bare.contains("Audience Profile: \n"));
    }
}
