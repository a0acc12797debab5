//! Canonical persisted analysis record.
//!
//! This is the one shape code outside the normalizer may assume. Every field is
//! always present; empty collections stand in for missing data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::company_intel::CompanyIntel;
use crate::analysis::scoring::Confidence;
use crate::analysis::skills::{ExtractedSkills, SkillCategory};

/// Filled into `other` when a record carries no skills at all, so every
/// canonical entry has something to score against.
pub const DEFAULT_OTHER_SKILLS: [&str; 4] =
    ["Communication", "Problem solving", "Basic coding", "Projects"];

/// Seven-key skill mapping. Unlike [`ExtractedSkills`], every key is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(rename = "coreCS", default)]
    pub core_cs: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub web: Vec<String>,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default, alias = "cloudDevOps")]
    pub cloud: Vec<String>,
    #[serde(default)]
    pub testing: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl SkillSet {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::CoreCS => &self.core_cs,
            SkillCategory::Languages => &self.languages,
            SkillCategory::Web => &self.web,
            SkillCategory::Data => &self.data,
            SkillCategory::CloudDevOps => &self.cloud,
            SkillCategory::Testing => &self.testing,
            SkillCategory::Other => &self.other,
        }
    }

    pub fn get_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::CoreCS => &mut self.core_cs,
            SkillCategory::Languages => &mut self.languages,
            SkillCategory::Web => &mut self.web,
            SkillCategory::Data => &mut self.data,
            SkillCategory::CloudDevOps => &mut self.cloud,
            SkillCategory::Testing => &mut self.testing,
            SkillCategory::Other => &mut self.other,
        }
    }

    /// Per-category flattening in category order. A skill listed under two
    /// categories appears twice; live scoring depends on that.
    pub fn all_skills(&self) -> Vec<String> {
        SkillCategory::ALL
            .into_iter()
            .flat_map(|c| self.get(c).iter().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        SkillCategory::ALL.into_iter().all(|c| self.get(c).is_empty())
    }

    pub fn contains(&self, skill: &str) -> bool {
        SkillCategory::ALL
            .into_iter()
            .any(|c| self.get(c).iter().any(|s| s == skill))
    }

    pub fn from_extracted(extracted: &ExtractedSkills) -> Self {
        let mut set = SkillSet::default();
        for (category, skills) in &extracted.categories {
            set.get_mut(*category).extend(skills.iter().cloned());
        }
        set
    }

    /// Back to the sparse form the generators and round mapper consume.
    pub fn to_extracted(&self) -> ExtractedSkills {
        let categories = SkillCategory::ALL
            .into_iter()
            .map(|c| (c, self.get(c).to_vec()))
            .collect();
        ExtractedSkills::from_categories(categories)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundFocus {
    pub round_title: String,
    pub focus_areas: Vec<String>,
    pub why_it_matters: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSection {
    pub round_title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub day: String,
    pub focus: String,
    pub tasks: Vec<String>,
}

/// One saved analysis.
///
/// `jd_text`, `company`, `role` and `created_at` never change after creation.
/// Updates only touch `skill_confidence_map`, `final_score` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: SkillSet,
    pub round_mapping: Vec<RoundFocus>,
    pub checklist: Vec<ChecklistSection>,
    #[serde(rename = "plan7Days")]
    pub plan_7_days: Vec<PlanDay>,
    pub questions: Vec<String>,
    pub base_score: u32,
    pub final_score: u32,
    pub skill_confidence_map: BTreeMap<String, Confidence>,
    pub company_intel: Option<CompanyIntel>,
}

impl AnalysisEntry {
    pub fn all_skills(&self) -> Vec<String> {
        self.extracted_skills.all_skills()
    }
}
