//! Skill extraction: scans raw JD text for catalogued skill phrases per category.
//!
//! Matching is case-insensitive and boundary-safe: a phrase never fires inside a
//! larger token ("Java" inside "JavaScript", "C" inside "C++", "SQL" inside
//! "MySQL"), tolerates whitespace runs inside multi-word phrases, and accepts a
//! sentence-ending period directly after the phrase.
//!
//! Every alias of a skill collapses to the skill's canonical display name, so
//! "ReactJS", "React.js" and "React" all surface once as "React".

use std::collections::BTreeMap;
use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Shown instead of a skill list when nothing in the JD matched.
pub const DISPLAY_STACK_FALLBACK: &str = "General fresher stack";

// ────────────────────────────────────────────────────────────────────────────
// Categories
// ────────────────────────────────────────────────────────────────────────────

/// Closed set of skill categories. Declaration order is the display and
/// round-mapping precedence order, and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkillCategory {
    CoreCS,
    Languages,
    Web,
    Data,
    CloudDevOps,
    Testing,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::CoreCS,
        SkillCategory::Languages,
        SkillCategory::Web,
        SkillCategory::Data,
        SkillCategory::CloudDevOps,
        SkillCategory::Testing,
        SkillCategory::Other,
    ];

    /// Human-facing name, also the key used by legacy `categories` maps.
    pub fn display_name(self) -> &'static str {
        match self {
            SkillCategory::CoreCS => "Core CS",
            SkillCategory::Languages => "Languages",
            SkillCategory::Web => "Web",
            SkillCategory::Data => "Data",
            SkillCategory::CloudDevOps => "Cloud/DevOps",
            SkillCategory::Testing => "Testing",
            SkillCategory::Other => "Other",
        }
    }

    /// Key used by the canonical persisted `extractedSkills` object.
    pub fn key(self) -> &'static str {
        match self {
            SkillCategory::CoreCS => "coreCS",
            SkillCategory::Languages => "languages",
            SkillCategory::Web => "web",
            SkillCategory::Data => "data",
            SkillCategory::CloudDevOps => "cloud",
            SkillCategory::Testing => "testing",
            SkillCategory::Other => "other",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.display_name() == name)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        if key == "cloudDevOps" {
            return Some(SkillCategory::CloudDevOps);
        }
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Accepts either spelling.
    pub fn parse(label: &str) -> Option<Self> {
        Self::from_display_name(label).or_else(|| Self::from_key(label))
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for SkillCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for SkillCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        SkillCategory::parse(&label)
            .ok_or_else(|| de::Error::custom(format!("unknown skill category '{label}'")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction output
// ────────────────────────────────────────────────────────────────────────────

/// Result of scanning one JD. Only categories with at least one match are
/// present in `categories`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSkills {
    pub categories: BTreeMap<SkillCategory, Vec<String>>,
    /// Cross-category, first-seen, deduplicated. Display only.
    pub all_skills: Vec<String>,
    pub has_any: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_stack: Option<String>,
}

impl ExtractedSkills {
    pub fn empty() -> Self {
        Self::from_categories(BTreeMap::new())
    }

    /// Builds the derived fields; empty category lists are dropped.
    pub fn from_categories(mut categories: BTreeMap<SkillCategory, Vec<String>>) -> Self {
        categories.retain(|_, skills| !skills.is_empty());

        let mut all_skills: Vec<String> = Vec::new();
        for skill in categories.values().flatten() {
            if !all_skills.contains(skill) {
                all_skills.push(skill.clone());
            }
        }

        let has_any = !categories.is_empty();
        ExtractedSkills {
            categories,
            all_skills,
            has_any,
            display_stack: (!has_any).then(|| DISPLAY_STACK_FALLBACK.to_string()),
        }
    }

    pub fn skills_in(&self, category: SkillCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_category(&self, category: SkillCategory) -> bool {
        !self.skills_in(category).is_empty()
    }

    pub fn contains(&self, category: SkillCategory, skill: &str) -> bool {
        self.skills_in(category).iter().any(|s| s == skill)
    }

    /// Number of categories with at least one detected skill.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

#[cfg(test)]
impl ExtractedSkills {
    /// Test fixture: one `(category, skill)` pair per detected skill, in order.
    pub(crate) fn from_pairs(pairs: &[(SkillCategory, &str)]) -> Self {
        let mut categories: BTreeMap<SkillCategory, Vec<String>> = BTreeMap::new();
        for (category, skill) in pairs {
            categories.entry(*category).or_default().push(skill.to_string());
        }
        Self::from_categories(categories)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// One catalogued skill: its canonical display name plus alternate spellings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Ordered skill table for one category, as it appears in the heuristics file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTable {
    pub category: SkillCategory,
    pub skills: Vec<SkillDefinition>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("category '{0}' appears more than once in the skill table")]
    DuplicateCategory(SkillCategory),

    #[error("empty skill phrase in category '{0}'")]
    EmptyPhrase(SkillCategory),

    #[error("invalid skill phrase: {0}")]
    Regex(#[from] regex::Error),
}

/// A compiled phrase pattern with token-boundary checks applied per match.
#[derive(Debug, Clone)]
struct PhraseMatcher {
    regex: Regex,
}

impl PhraseMatcher {
    fn new(phrase: &str) -> Result<Self, regex::Error> {
        let pattern = phrase
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex
            .find_iter(text)
            .any(|m| has_token_boundaries(text, m.start(), m.end()))
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '#')
}

/// `text[start..end]` must not be glued to a neighbouring token. A trailing
/// period counts as a boundary only when it ends the sentence.
fn has_token_boundaries(text: &str, start: usize, end: usize) -> bool {
    if let Some(before) = text[..start].chars().next_back() {
        if is_token_char(before) || before == '.' {
            return false;
        }
    }

    let mut after = text[end..].chars();
    match after.next() {
        None => true,
        Some('.') => !matches!(after.next(), Some(c) if c.is_alphanumeric() || c == '_'),
        Some(c) => !is_token_char(c),
    }
}

#[derive(Debug, Clone)]
struct CompiledSkill {
    name: String,
    matchers: Vec<PhraseMatcher>,
}

impl CompiledSkill {
    fn compile(category: SkillCategory, definition: &SkillDefinition) -> Result<Self, CatalogError> {
        let mut matchers = Vec::with_capacity(definition.aliases.len() + 1);
        for phrase in std::iter::once(&definition.name).chain(definition.aliases.iter()) {
            if phrase.trim().is_empty() {
                return Err(CatalogError::EmptyPhrase(category));
            }
            matchers.push(PhraseMatcher::new(phrase)?);
        }
        Ok(Self {
            name: definition.name.trim().to_string(),
            matchers,
        })
    }

    fn matches(&self, text: &str) -> bool {
        self.matchers.iter().any(|m| m.is_match(text))
    }
}

/// Compiled, immutable keyword tables. Built once at startup and shared.
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    tables: BTreeMap<SkillCategory, Vec<CompiledSkill>>,
}

impl SkillCatalog {
    pub fn compile(tables: &[CategoryTable]) -> Result<Self, CatalogError> {
        let mut compiled = BTreeMap::new();
        for table in tables {
            if compiled.contains_key(&table.category) {
                return Err(CatalogError::DuplicateCategory(table.category));
            }
            let skills = table
                .skills
                .iter()
                .map(|def| CompiledSkill::compile(table.category, def))
                .collect::<Result<Vec<_>, _>>()?;
            compiled.insert(table.category, skills);
        }
        Ok(Self { tables: compiled })
    }

    /// Canonical skill names catalogued for `category`, in table order.
    pub fn skill_names(&self, category: SkillCategory) -> Vec<&str> {
        self.tables
            .get(&category)
            .map(|skills| skills.iter().map(|s| s.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Scans `jd_text` and returns the detected skills by category.
    ///
    /// Categories are visited in fixed category order and skills in table order,
    /// so the output is a pure function of the input text and the catalog.
    pub fn extract(&self, jd_text: &str) -> ExtractedSkills {
        let text = jd_text.trim();
        if text.is_empty() {
            return ExtractedSkills::empty();
        }

        let mut categories = BTreeMap::new();
        for (category, skills) in &self.tables {
            let mut found: Vec<String> = Vec::new();
            for skill in skills {
                if found.contains(&skill.name) {
                    continue;
                }
                if skill.matches(text) {
                    found.push(skill.name.clone());
                }
            }
            if !found.is_empty() {
                categories.insert(*category, found);
            }
        }

        ExtractedSkills::from_categories(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::heuristics::Heuristics;

    fn catalog() -> SkillCatalog {
        Heuristics::builtin().unwrap().catalog
    }

    #[test]
    fn test_empty_text_has_nothing() {
        let extracted = catalog().extract("   ");
        assert!(!extracted.has_any);
        assert!(extracted.categories.is_empty());
        assert!(extracted.all_skills.is_empty());
        assert_eq!(
            extracted.display_stack.as_deref(),
            Some(DISPLAY_STACK_FALLBACK)
        );
    }

    #[test]
    fn test_backend_jd_categories_in_order() {
        let extracted = catalog().extract(
            "We need a backend engineer skilled in Java, SQL, and DSA. Must know OOP and DBMS.",
        );
        assert!(extracted.has_any);
        assert_eq!(
            extracted.skills_in(SkillCategory::CoreCS),
            ["DSA", "OOP", "DBMS"]
        );
        assert_eq!(extracted.skills_in(SkillCategory::Languages), ["Java"]);
        assert_eq!(extracted.skills_in(SkillCategory::Data), ["SQL"]);
        assert_eq!(extracted.category_count(), 3);
        assert!(extracted.display_stack.is_none());
    }

    #[test]
    fn test_react_synonyms_collapse_to_one() {
        let extracted =
            catalog().extract("Experience with ReactJS, React.js, and React for our UI team.");
        assert_eq!(extracted.skills_in(SkillCategory::Web), ["React"]);
    }

    #[test]
    fn test_javascript_does_not_imply_java() {
        let extracted = catalog().extract("Strong JavaScript required");
        assert!(extracted.contains(SkillCategory::Languages, "JavaScript"));
        assert!(!extracted.contains(SkillCategory::Languages, "Java"));
    }

    #[test]
    fn test_java_does_not_imply_javascript() {
        let extracted = catalog().extract("Strong Java required");
        assert!(extracted.contains(SkillCategory::Languages, "Java"));
        assert!(!extracted.contains(SkillCategory::Languages, "JavaScript"));
    }

    #[test]
    fn test_symbol_phrases_match() {
        let extracted = catalog().extract("Stack: C++, C# and Next.js with Node.js");
        let languages = extracted.skills_in(SkillCategory::Languages);
        assert!(languages.contains(&"C++".to_string()));
        assert!(languages.contains(&"C#".to_string()));
        assert!(!languages.contains(&"C".to_string()), "C must not fire inside C++/C#");
        assert!(!languages.contains(&"JavaScript".to_string()), "js inside Node.js is not a match");
        assert_eq!(extracted.skills_in(SkillCategory::Web), ["Next.js", "Node.js"]);
    }

    #[test]
    fn test_sql_not_matched_inside_mysql() {
        let extracted = catalog().extract("Hands-on MySQL and PostgreSQL");
        assert_eq!(extracted.skills_in(SkillCategory::Data), ["PostgreSQL", "MySQL"]);
    }

    #[test]
    fn test_multi_word_alias_tolerates_whitespace_runs() {
        let extracted = catalog().extract("Solid   data\n structures knowledge");
        assert_eq!(extracted.skills_in(SkillCategory::CoreCS), ["DSA"]);
    }

    #[test]
    fn test_case_insensitive() {
        let extracted = catalog().extract("docker and KUBERNETES");
        assert_eq!(
            extracted.skills_in(SkillCategory::CloudDevOps),
            ["Docker", "Kubernetes"]
        );
    }

    #[test]
    fn test_all_skills_dedupes_across_categories() {
        let tables = vec![
            CategoryTable {
                category: SkillCategory::Data,
                skills: vec![SkillDefinition {
                    name: "Redis".to_string(),
                    aliases: vec![],
                }],
            },
            CategoryTable {
                category: SkillCategory::Other,
                skills: vec![SkillDefinition {
                    name: "Redis".to_string(),
                    aliases: vec![],
                }],
            },
        ];
        let extracted = SkillCatalog::compile(&tables).unwrap().extract("Redis");
        assert_eq!(extracted.category_count(), 2);
        assert_eq!(extracted.all_skills, ["Redis"]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let jd = "Python, AWS, Docker, Selenium, REST APIs and GraphQL";
        let c = catalog();
        assert_eq!(c.extract(jd), c.extract(jd));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let table = CategoryTable {
            category: SkillCategory::Web,
            skills: vec![],
        };
        let err = SkillCatalog::compile(&[table.clone(), table]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(SkillCategory::Web)));
    }

    #[test]
    fn test_category_parse_accepts_both_spellings() {
        assert_eq!(SkillCategory::parse("Cloud/DevOps"), Some(SkillCategory::CloudDevOps));
        assert_eq!(SkillCategory::parse("cloud"), Some(SkillCategory::CloudDevOps));
        assert_eq!(SkillCategory::parse("cloudDevOps"), Some(SkillCategory::CloudDevOps));
        assert_eq!(SkillCategory::parse("Frontend"), None);
    }

    #[test]
    fn test_extracted_serializes_with_display_names() {
        let extracted = catalog().extract("Java");
        let json = serde_json::to_value(&extracted).unwrap();
        assert_eq!(json["categories"]["Languages"][0], "Java");
        assert_eq!(json["hasAny"], true);
    }
}
