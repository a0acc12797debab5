//! JD analysis pipeline: extraction, content generation, scoring and company intel.
//!
//! Everything here is a pure function of its inputs and the loaded heuristics.

pub mod checklist;
pub mod company_intel;
pub mod handlers;
pub mod heuristics;
pub mod plan;
pub mod questions;
pub mod scoring;
pub mod skills;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::analysis::checklist::{build_checklist, ChecklistRound};
use crate::analysis::company_intel::{
    build_round_mapping, classify_company, CompanyIntel, InterviewRound,
};
use crate::analysis::heuristics::Heuristics;
use crate::analysis::plan::{build_plan, PlanBlock};
use crate::analysis::questions::build_questions;
use crate::analysis::scoring::{compute_base_score, ScoreInput};
use crate::analysis::skills::ExtractedSkills;

/// JDs shorter than this (trimmed) still analyze, with a warning attached.
pub const JD_MIN_LENGTH_WARNING: usize = 200;

/// Freshly generated analysis, before normalization into the persisted shape.
///
/// Serializes with the field names the analyze flow has always written
/// (`plan`, round `name`/`whyMatters`, `extractedSkills.categories`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: ExtractedSkills,
    pub checklist: Vec<ChecklistRound>,
    pub plan: Vec<PlanBlock>,
    pub questions: Vec<String>,
    pub base_score: u32,
    pub company_intel: Option<CompanyIntel>,
    pub round_mapping: Vec<InterviewRound>,
}

impl RawAnalysis {
    /// The record handed to the history repository: final score starts at the
    /// base score and no skill has a confidence yet.
    pub fn into_record(self) -> Value {
        let mut record = serde_json::to_value(&self).unwrap_or_else(|_| json!({}));
        if let Value::Object(map) = &mut record {
            map.insert("finalScore".to_string(), json!(self.base_score));
            map.insert("skillConfidenceMap".to_string(), json!({}));
        }
        record
    }
}

/// Runs the full pipeline for one Analyze action.
pub fn run_full_analysis(
    heuristics: &Heuristics,
    company: &str,
    role: &str,
    jd_text: &str,
) -> RawAnalysis {
    let extracted = heuristics.catalog.extract(jd_text);
    let base_score = compute_base_score(&ScoreInput {
        company,
        role,
        jd_text,
        extracted: &extracted,
    });
    let company_intel = classify_company(company, jd_text, &heuristics.company);
    let round_mapping = build_round_mapping(company_intel.as_ref(), &extracted);

    debug!(
        categories = extracted.category_count(),
        base_score,
        "JD analyzed"
    );

    RawAnalysis {
        company: company.trim().to_string(),
        role: role.trim().to_string(),
        jd_text: jd_text.trim().to_string(),
        checklist: build_checklist(&extracted),
        plan: build_plan(&extracted),
        questions: build_questions(&extracted),
        extracted_skills: extracted,
        base_score,
        company_intel,
        round_mapping,
    }
}

/// Non-fatal warning for a short but non-empty JD.
pub fn jd_length_warning(jd_text: &str) -> Option<String> {
    let length = jd_text.trim().chars().count();
    if length > 0 && length < JD_MIN_LENGTH_WARNING {
        Some(format!(
            "This JD is short ({length} characters). Paste the full description for better results."
        ))
    } else {
        None
    }
}
