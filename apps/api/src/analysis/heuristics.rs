//! Versioned heuristic tables: skill keywords, synonyms and company rules.
//!
//! The tables are configuration data, not code: a JSON document is embedded
//! into the binary as the default and may be replaced at startup with a file
//! (`HEURISTICS_PATH`), so new technologies or company names need no rebuild.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::analysis::company_intel::CompanyRules;
use crate::analysis::skills::{CategoryTable, SkillCatalog};

const BUILTIN_HEURISTICS: &str = include_str!("../../data/heuristics.json");

/// On-disk shape of the heuristics document.
#[derive(Debug, Clone, Deserialize)]
pub struct HeuristicsFile {
    pub version: String,
    pub skills: Vec<CategoryTable>,
    pub company: CompanyRules,
}

/// Compiled heuristics shared by every analysis run.
#[derive(Debug, Clone)]
pub struct Heuristics {
    pub version: String,
    pub catalog: SkillCatalog,
    pub company: CompanyRules,
}

impl Heuristics {
    /// The tables shipped with the service.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_HEURISTICS).context("built-in heuristics table is invalid")
    }

    /// Loads `path` when given, otherwise the built-in tables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let heuristics = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin()?,
        };
        info!(
            "Heuristics tables loaded (version {})",
            heuristics.version
        );
        Ok(heuristics)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read heuristics file '{}'", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid heuristics file '{}'", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: HeuristicsFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    pub fn from_file(file: HeuristicsFile) -> Result<Self> {
        let catalog = SkillCatalog::compile(&file.skills)?;
        Ok(Heuristics {
            version: file.version,
            catalog,
            company: file.company.normalized(),
        })
    }
}
