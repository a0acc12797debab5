//! Read-time repair of derived data, and the view served to clients.
//!
//! Older records may lack company intel or a round mapping. Both are pure
//! functions of persisted fields, so they are recomputed for display. The
//! repaired values are not written back.

use serde::Serialize;

use crate::analysis::company_intel::{
    build_round_mapping, classify_company, CompanyRules, InterviewRound,
};
use crate::analysis::scoring::ReadinessSummary;
use crate::history::schema::{AnalysisEntry, RoundFocus};

impl From<InterviewRound> for RoundFocus {
    fn from(round: InterviewRound) -> Self {
        RoundFocus {
            round_title: round.name,
            focus_areas: round.focus_areas,
            why_it_matters: round.why_matters,
        }
    }
}

pub fn repair_derived(mut entry: AnalysisEntry, rules: &CompanyRules) -> AnalysisEntry {
    if entry.company_intel.is_none() && !entry.company.trim().is_empty() {
        entry.company_intel = classify_company(&entry.company, &entry.jd_text, rules);
    }
    if entry.round_mapping.is_empty() {
        let extracted = entry.extracted_skills.to_extracted();
        entry.round_mapping = build_round_mapping(entry.company_intel.as_ref(), &extracted)
            .into_iter()
            .map(RoundFocus::from)
            .collect();
    }
    entry
}

/// A stored analysis as returned by the API: the repaired entry plus its
/// readiness summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    #[serde(flatten)]
    pub entry: AnalysisEntry,
    pub summary: ReadinessSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl AnalysisView {
    pub fn new(entry: AnalysisEntry, rules: &CompanyRules) -> Self {
        let entry = repair_derived(entry, rules);
        let summary = ReadinessSummary::compute(
            entry.base_score,
            &entry.skill_confidence_map,
            &entry.all_skills(),
        );
        AnalysisView {
            entry,
            summary,
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }
}
