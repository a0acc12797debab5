//! Analysis history over an opaque key-value store.
//!
//! The whole history is one JSON array under a single well-known key, rewritten
//! on every mutation. Reads never fail: a store error or a malformed document
//! reads as an empty history, and records that do not normalize are counted
//! as skipped. Writes report failure through `None`.
//!
//! There is no locking. Two concurrent writers race and the last write wins.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::scoring::{compute_live_score, Confidence};
use crate::history::normalize::{normalize_entry, validate_entry};
use crate::history::schema::AnalysisEntry;
use crate::history::store::{KeyValueStore, StoreError};

/// Fields a patch may not overwrite.
const IMMUTABLE_FIELDS: &[&str] = &["id", "jdText", "company", "role", "createdAt"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub entries: Vec<AnalysisEntry>,
    pub skipped_count: usize,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Analysis {0} not found")]
    NotFound(String),

    #[error("Skill '{0}' is not part of this analysis")]
    UnknownSkill(String),

    #[error("History could not be saved")]
    WriteFailed,
}

#[derive(Clone)]
pub struct HistoryRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl HistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Raw records as stored. A missing or malformed document is an empty list.
    async fn load_raw(&self) -> Result<Vec<Value>, StoreError> {
        let Some(document) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Value>(&document) {
            Ok(Value::Array(list)) => Ok(list),
            Ok(_) => {
                warn!(key = %self.key, "History document is not an array, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(key = %self.key, "History document is not valid JSON: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Read-path load: store failures degrade to an empty history.
    async fn load_or_empty(&self) -> Vec<Value> {
        match self.load_raw().await {
            Ok(list) => list,
            Err(e) => {
                warn!(key = %self.key, "History read failed: {e}");
                Vec::new()
            }
        }
    }

    async fn save_raw(&self, list: &[Value]) -> bool {
        let document = match serde_json::to_string(list) {
            Ok(document) => document,
            Err(e) => {
                warn!("History serialization failed: {e}");
                return false;
            }
        };
        match self.store.set(&self.key, &document).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, "History write failed: {e}");
                false
            }
        }
    }

    /// Normalizes, validates and prepends `raw`. An id is minted when absent.
    pub async fn save_analysis(&self, raw: Value) -> Option<AnalysisEntry> {
        let Value::Object(mut record) = raw else {
            return None;
        };
        let has_id = record
            .get("id")
            .and_then(Value::as_str)
            .map_or(false, |id| !id.is_empty());
        if !has_id {
            record.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
        }

        let mut entry = normalize_checked(&Value::Object(record))?;
        entry.updated_at = Utc::now();
        let value = serde_json::to_value(&entry).ok()?;

        let mut list = match self.load_raw().await {
            Ok(list) => list,
            Err(e) => {
                warn!(key = %self.key, "History read failed, analysis not saved: {e}");
                return None;
            }
        };
        list.insert(0, value);
        if !self.save_raw(&list).await {
            return None;
        }

        info!(id = %entry.id, entries = list.len(), "Analysis saved");
        Some(entry)
    }

    /// Every record that normalizes, newest first, plus how many did not.
    pub async fn history(&self) -> HistoryPage {
        let raw = self.load_or_empty().await;
        let total = raw.len();
        let entries: Vec<AnalysisEntry> = raw.iter().filter_map(normalize_checked).collect();
        let skipped_count = total - entries.len();
        if skipped_count > 0 {
            warn!(skipped_count, "Skipped history records that could not be normalized");
        }
        HistoryPage {
            entries,
            skipped_count,
        }
    }

    /// The first stored record with this id, if it normalizes.
    pub async fn get_by_id(&self, id: &str) -> Option<AnalysisEntry> {
        let raw = self.load_or_empty().await;
        let found = raw.iter().find(|r| raw_id(r) == Some(id))?;
        normalize_checked(found)
    }

    /// Newest record that normalizes.
    pub async fn latest(&self) -> Option<AnalysisEntry> {
        let raw = self.load_or_empty().await;
        raw.iter().find_map(normalize_checked)
    }

    /// Shallow-merges `patch` into the stored record and writes it back in
    /// canonical shape. Immutable fields in the patch are ignored.
    pub async fn update_by_id(&self, id: &str, patch: &Map<String, Value>) -> Option<AnalysisEntry> {
        let mut list = match self.load_raw().await {
            Ok(list) => list,
            Err(e) => {
                warn!(key = %self.key, "History read failed, update dropped: {e}");
                return None;
            }
        };
        let index = list.iter().position(|r| raw_id(r) == Some(id))?;

        let mut merged = list[index].as_object().cloned()?;
        for (field, value) in patch {
            if !IMMUTABLE_FIELDS.contains(&field.as_str()) {
                merged.insert(field.clone(), value.clone());
            }
        }

        let mut entry = normalize_checked(&Value::Object(merged))?;
        entry.updated_at = Utc::now();
        list[index] = serde_json::to_value(&entry).ok()?;
        if !self.save_raw(&list).await {
            return None;
        }

        info!(id = %entry.id, "Analysis updated");
        Some(entry)
    }

    /// Records a confidence level for one skill and recomputes the final score.
    pub async fn set_skill_confidence(
        &self,
        id: &str,
        skill: &str,
        confidence: Confidence,
    ) -> Result<AnalysisEntry, HistoryError> {
        let entry = self
            .get_by_id(id)
            .await
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        if !entry.extracted_skills.contains(skill) {
            return Err(HistoryError::UnknownSkill(skill.to_string()));
        }

        let mut confidence_map = entry.skill_confidence_map.clone();
        confidence_map.insert(skill.to_string(), confidence);
        let final_score = compute_live_score(entry.base_score, &confidence_map, &entry.all_skills());

        let patch = json!({
            "skillConfidenceMap": confidence_map,
            "finalScore": final_score,
        });
        let Value::Object(patch) = patch else {
            return Err(HistoryError::WriteFailed);
        };
        self.update_by_id(id, &patch)
            .await
            .ok_or(HistoryError::WriteFailed)
    }
}

fn raw_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn normalize_checked(raw: &Value) -> Option<AnalysisEntry> {
    let entry = normalize_entry(raw)?;
    let value = serde_json::to_value(&entry).ok()?;
    validate_entry(&value).then_some(entry)
}
