//! Schema normalizer: reconciles every stored record shape into [`AnalysisEntry`].
//!
//! Three input shapes are accepted:
//! - canonical records as written by this service,
//! - legacy records whose skills sit under `extractedSkills.categories` keyed
//!   by display name ("Core CS", "Cloud/DevOps", ...),
//! - mixed records carrying older field names (`plan`, `readinessScore`,
//!   `baseReadinessScore`, round `name`/`whyMatters`) next to new ones.
//!
//! The shape is resolved once here. Normalization never fails loudly: a record
//! that cannot be repaired yields `None` and the caller counts it as skipped.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::analysis::company_intel::CompanyIntel;
use crate::analysis::scoring::{clamp_score, Confidence};
use crate::analysis::skills::SkillCategory;
use crate::history::schema::{
    AnalysisEntry, ChecklistSection, PlanDay, RoundFocus, SkillSet, DEFAULT_OTHER_SKILLS,
};

/// Keys of a legacy `extractedSkills` object that are not category lists.
const SKILL_METADATA_KEYS: &[&str] = &["categories", "allSkills", "hasAny", "displayStack"];

/// Top-level field names only older records use.
const LEGACY_FIELDS: &[&str] = &["plan", "readinessScore", "baseReadinessScore"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryShape {
    Canonical,
    LegacyCategories,
    Mixed,
}

/// Canonical skill arrays win over a `categories` map carried in the same object.
pub fn detect_shape(entry: &Map<String, Value>) -> EntryShape {
    let skills = entry.get("extractedSkills").and_then(Value::as_object);
    let legacy_categories = skills.map_or(false, |s| {
        s.get("categories").map_or(false, Value::is_object) && !has_canonical_arrays(s)
    });
    if legacy_categories {
        return EntryShape::LegacyCategories;
    }

    let has_legacy_field = LEGACY_FIELDS
        .iter()
        .any(|f| entry.get(*f).map_or(false, |v| !v.is_null()));
    let has_legacy_item = |field: &str, legacy_keys: &[&str]| {
        entry
            .get(field)
            .and_then(Value::as_array)
            .map_or(false, |items| {
                items
                    .iter()
                    .any(|item| legacy_keys.iter().any(|k| item.get(*k).is_some()))
            })
    };

    if has_legacy_field
        || has_legacy_item("roundMapping", &["name", "whyMatters"])
        || has_legacy_item("checklist", &["name"])
    {
        EntryShape::Mixed
    } else {
        EntryShape::Canonical
    }
}

fn has_canonical_arrays(skills: &Map<String, Value>) -> bool {
    SkillCategory::ALL
        .iter()
        .map(|c| c.key())
        .chain(["cloudDevOps"])
        .any(|key| skills.get(key).map_or(false, Value::is_array))
}

/// Produces the canonical form of `raw`, or `None` when it cannot be repaired.
///
/// `normalize_entry(&to_value(normalize_entry(x)))` equals `normalize_entry(x)`.
pub fn normalize_entry(raw: &Value) -> Option<AnalysisEntry> {
    let entry = raw.as_object()?;
    let shape = detect_shape(entry);

    let extracted_skills = match entry.get("extractedSkills") {
        None | Some(Value::Null) => SkillSet::default(),
        Some(Value::Object(skills)) => match shape {
            EntryShape::LegacyCategories => {
                let categories = skills.get("categories").and_then(Value::as_object)?;
                skills_from_display_names(categories)
            }
            EntryShape::Canonical | EntryShape::Mixed => skills_from_keys(skills),
        },
        Some(_) => return None,
    };
    let extracted_skills = with_default_skills(extracted_skills);

    let questions = match entry.get("questions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => strings(items),
        Some(_) => return None,
    };

    let base_score = base_score(entry)?;
    let final_score = final_score(entry, base_score);

    let created_at = timestamp(entry.get("createdAt")).unwrap_or_else(Utc::now);
    let updated_at = timestamp(entry.get("updatedAt")).unwrap_or(created_at);

    Some(AnalysisEntry {
        id: id_field(entry.get("id")),
        created_at,
        updated_at,
        company: string_field(entry, "company"),
        role: string_field(entry, "role"),
        jd_text: string_field(entry, "jdText"),
        extracted_skills,
        round_mapping: round_mapping(entry.get("roundMapping")),
        checklist: checklist(entry.get("checklist")),
        plan_7_days: plan_days(entry),
        questions,
        base_score,
        final_score,
        skill_confidence_map: confidence_map(entry.get("skillConfidenceMap")),
        company_intel: entry
            .get("companyIntel")
            .filter(|v| !v.is_null())
            .and_then(|v| serde_json::from_value::<CompanyIntel>(v.clone()).ok()),
    })
}

/// Structural check on a record, applied after normalization.
pub fn validate_entry(entry: &Value) -> bool {
    let Some(obj) = entry.as_object() else {
        return false;
    };
    if !is_truthy(obj.get("id")) {
        return false;
    }
    if !obj.get("jdText").map_or(false, Value::is_string) {
        return false;
    }
    if !obj.get("extractedSkills").map_or(false, Value::is_object) {
        return false;
    }
    if !obj.get("questions").map_or(false, Value::is_array) {
        return false;
    }
    match obj.get("baseScore") {
        None | Some(Value::Null) | Some(Value::Number(_)) => true,
        Some(_) => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

fn push_unique(bucket: &mut Vec<String>, skills: Vec<String>) {
    for skill in skills {
        if !bucket.contains(&skill) {
            bucket.push(skill);
        }
    }
}

/// Unknown display names fold into `other`, appended after anything already there.
fn skills_from_display_names(categories: &Map<String, Value>) -> SkillSet {
    let mut set = SkillSet::default();
    for (name, list) in categories {
        let Some(items) = list.as_array() else {
            continue;
        };
        let category = SkillCategory::parse(name).unwrap_or(SkillCategory::Other);
        push_unique(set.get_mut(category), strings(items));
    }
    set
}

fn skills_from_keys(skills: &Map<String, Value>) -> SkillSet {
    let mut set = SkillSet::default();
    for (key, list) in skills {
        if SKILL_METADATA_KEYS.contains(&key.as_str()) {
            continue;
        }
        let Some(items) = list.as_array() else {
            continue;
        };
        let category = SkillCategory::parse(key).unwrap_or(SkillCategory::Other);
        push_unique(set.get_mut(category), strings(items));
    }
    set
}

fn with_default_skills(mut set: SkillSet) -> SkillSet {
    if set.is_empty() {
        set.other = DEFAULT_OTHER_SKILLS.iter().map(|s| s.to_string()).collect();
    }
    set
}

// ────────────────────────────────────────────────────────────────────────────
// Scores
// ────────────────────────────────────────────────────────────────────────────

fn score(value: &Value) -> Option<u32> {
    let n = value.as_f64()?;
    if !n.is_finite() {
        return None;
    }
    Some(clamp_score(n.round() as i64))
}

/// `baseScore`, else the first present of `baseReadinessScore`/`readinessScore`,
/// else 0. A present fallback that is not numeric rejects the record.
fn base_score(entry: &Map<String, Value>) -> Option<u32> {
    if let Some(value) = entry.get("baseScore").filter(|v| v.is_number()) {
        return score(value);
    }
    let fallback = ["baseReadinessScore", "readinessScore"]
        .iter()
        .filter_map(|k| entry.get(*k))
        .find(|v| !v.is_null());
    match fallback {
        Some(value) => score(value),
        None => Some(0),
    }
}

fn final_score(entry: &Map<String, Value>, base_score: u32) -> u32 {
    ["finalScore", "readinessScore"]
        .iter()
        .filter_map(|k| entry.get(*k))
        .find_map(score)
        .unwrap_or(base_score)
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn round_mapping(value: Option<&Value>) -> Vec<RoundFocus> {
    objects(value)
        .map(|round| RoundFocus {
            round_title: first_str(round, &["roundTitle", "name"]).unwrap_or_default(),
            focus_areas: string_list(round.get("focusAreas")),
            why_it_matters: first_str(round, &["whyItMatters", "whyMatters"]).unwrap_or_default(),
        })
        .collect()
}

fn checklist(value: Option<&Value>) -> Vec<ChecklistSection> {
    objects(value)
        .map(|section| ChecklistSection {
            round_title: first_str(section, &["roundTitle", "name"]).unwrap_or_default(),
            items: string_list(section.get("items")),
        })
        .collect()
}

/// `plan` wins over `plan7Days` when both are present. A combined legacy
/// `label` ("Day 1–2: Basics + core CS") is split at the first ": ".
fn plan_days(entry: &Map<String, Value>) -> Vec<PlanDay> {
    let source = entry
        .get("plan")
        .filter(|v| !v.is_null())
        .or_else(|| entry.get("plan7Days"));
    let Some(items) = source.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let block = item.as_object()?;
            let label = block.get("label").and_then(Value::as_str);
            let (label_day, label_focus) = match label.and_then(|l| l.split_once(": ")) {
                Some((day, focus)) => (Some(day.to_string()), Some(focus.to_string())),
                None => (None, label.map(str::to_string)),
            };
            Some(PlanDay {
                day: first_str(block, &["day"])
                    .or(label_day)
                    .unwrap_or_else(|| format!("Day {}", i + 1)),
                focus: first_str(block, &["focus"])
                    .or(label_focus)
                    .unwrap_or_default(),
                tasks: string_list(block.get("tasks")),
            })
        })
        .collect()
}

fn confidence_map(value: Option<&Value>) -> BTreeMap<String, Confidence> {
    let Some(map) = value.and_then(Value::as_object) else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(skill, level)| {
            let level = match level.as_str()? {
                "know" => Confidence::Know,
                "practice" => Confidence::Practice,
                _ => return None,
            };
            Some((skill.clone(), level))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| strings(items))
        .unwrap_or_default()
}

fn first_str(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

fn string_field(entry: &Map<String, Value>, key: &str) -> String {
    first_str(entry, &[key]).unwrap_or_default()
}

fn id_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        _ => None,
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
        Some(_) => true,
    }
}
