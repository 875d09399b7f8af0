//! Skill extraction: scans a job description against the catalog rules.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::{CategoryKey, COMPILED_RULES};
use crate::models::lenient;

/// Label shown when nothing in the JD matched the catalog.
pub const FALLBACK_LABEL: &str = "General fresher stack";

/// Matched skill names per category, each list in catalog order.
///
/// Every field defaults to empty so that persisted entries with a partial
/// (or missing) `categories` object still load. Unknown category names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategorySkills {
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub core_cs: Vec<String>,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub web: Vec<String>,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub data: Vec<String>,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub cloud_devops: Vec<String>,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub testing: Vec<String>,
}

impl CategorySkills {
    pub fn get(&self, key: CategoryKey) -> &[String] {
        match key {
            CategoryKey::CoreCs => &self.core_cs,
            CategoryKey::Languages => &self.languages,
            CategoryKey::Web => &self.web,
            CategoryKey::Data => &self.data,
            CategoryKey::CloudDevops => &self.cloud_devops,
            CategoryKey::Testing => &self.testing,
        }
    }

    fn get_mut(&mut self, key: CategoryKey) -> &mut Vec<String> {
        match key {
            CategoryKey::CoreCs => &mut self.core_cs,
            CategoryKey::Languages => &mut self.languages,
            CategoryKey::Web => &mut self.web,
            CategoryKey::Data => &mut self.data,
            CategoryKey::CloudDevops => &mut self.cloud_devops,
            CategoryKey::Testing => &mut self.testing,
        }
    }

    /// All matched skills, category-then-skill order.
    pub fn flatten(&self) -> impl Iterator<Item = &str> {
        CategoryKey::ALL
            .into_iter()
            .flat_map(move |key| self.get(key).iter().map(String::as_str))
    }
}

/// Output of `extract_skills`. Embedded in every history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionResult {
    #[serde(deserialize_with = "lenient::or_default")]
    pub categories: CategorySkills,
    /// Categories with at least one match, in catalog order.
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub categories_present: Vec<CategoryKey>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub has_any: bool,
    /// Set only when nothing matched.
    #[serde(deserialize_with = "lenient::or_default")]
    pub fallback_label: Option<String>,
}

impl ExtractionResult {
    pub fn has_category(&self, key: CategoryKey) -> bool {
        self.categories_present.contains(&key)
    }

    pub fn has_skill(&self, key: CategoryKey, skill: &str) -> bool {
        self.categories.get(key).iter().any(|s| s == skill)
    }
}

/// Detects catalog skills in `text`. Never fails; empty input yields an empty result
/// with the fallback label set.
pub fn extract_skills(text: &str) -> ExtractionResult {
    let mut categories = CategorySkills::default();

    for rule in COMPILED_RULES.iter() {
        if rule.matches(text) {
            categories.get_mut(rule.category).push(rule.skill.to_string());
        }
    }

    let categories_present: Vec<CategoryKey> = CategoryKey::ALL
        .into_iter()
        .filter(|&key| !categories.get(key).is_empty())
        .collect();
    let has_any = !categories_present.is_empty();

    ExtractionResult {
        categories,
        categories_present,
        has_any,
        fallback_label: (!has_any).then(|| FALLBACK_LABEL.to_string()),
    }
}
