//! Skill catalog: the six fixed categories and the keyword rules that detect each skill.
//!
//! The rule table is plain data. It is compiled once, on first use, into
//! `COMPILED_RULES` and never mutated afterwards.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Identifier of one of the six fixed skill categories. Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKey {
    CoreCs,
    Languages,
    Web,
    Data,
    CloudDevops,
    Testing,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::CoreCs,
        CategoryKey::Languages,
        CategoryKey::Web,
        CategoryKey::Data,
        CategoryKey::CloudDevops,
        CategoryKey::Testing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoryKey::CoreCs => "Core CS",
            CategoryKey::Languages => "Languages",
            CategoryKey::Web => "Web",
            CategoryKey::Data => "Data",
            CategoryKey::CloudDevops => "Cloud/DevOps",
            CategoryKey::Testing => "Testing",
        }
    }
}

/// Catalog entry as exposed to callers (e.g. the catalog endpoint).
#[derive(Debug, Clone, Serialize)]
pub struct SkillCategory {
    pub key: CategoryKey,
    pub label: &'static str,
    pub skills: Vec<&'static str>,
}

/// One row of the detection table: a skill, its category, and the rules that detect it.
#[derive(Debug)]
pub struct SkillRule {
    pub skill: &'static str,
    pub category: CategoryKey,
    pub patterns: &'static [&'static str],
}

/// Detection table, in catalog order (category, then skill).
///
/// Every pattern is compiled case-insensitively. `(?-i:...)` opts a pattern back
/// into case-sensitive matching.
pub const SKILL_RULES: &[SkillRule] = &[
    // Core CS
    SkillRule {
        skill: "DSA",
        category: CategoryKey::CoreCs,
        patterns: &[r"\bdsa\b", r"\bdata structures?\b", r"\balgorithms?\b"],
    },
    SkillRule {
        skill: "OOP",
        category: CategoryKey::CoreCs,
        patterns: &[r"\boop\b", r"\bobject[\s-]?oriented\b"],
    },
    SkillRule {
        skill: "DBMS",
        category: CategoryKey::CoreCs,
        patterns: &[r"\bdbms\b", r"\bdatabase management\b"],
    },
    SkillRule {
        skill: "OS",
        category: CategoryKey::CoreCs,
        patterns: &[r"\bos\b", r"\boperating systems?\b"],
    },
    SkillRule {
        skill: "Networks",
        category: CategoryKey::CoreCs,
        patterns: &[r"\bnetworks?\b", r"\bnetworking\b"],
    },
    // Languages
    SkillRule {
        skill: "Java",
        category: CategoryKey::Languages,
        patterns: &[r"\bjava\b"],
    },
    SkillRule {
        skill: "Python",
        category: CategoryKey::Languages,
        patterns: &[r"\bpython\b"],
    },
    SkillRule {
        skill: "JavaScript",
        category: CategoryKey::Languages,
        // A `.js` suffix (Node.js, Next.js) names a framework, not the language.
        patterns: &[r"\bjavascript\b", r"(?:^|[^\w.])js\b"],
    },
    SkillRule {
        skill: "TypeScript",
        category: CategoryKey::Languages,
        patterns: &[r"\btypescript\b", r"(?:^|[^\w.])ts\b"],
    },
    SkillRule {
        skill: "C",
        category: CategoryKey::Languages,
        patterns: &[r"\bc language\b", r"(?:^|[\s(])c(?:[\s),./]|$)"],
    },
    SkillRule {
        skill: "C++",
        category: CategoryKey::Languages,
        patterns: &[r"\bc\+\+"],
    },
    SkillRule {
        skill: "C#",
        category: CategoryKey::Languages,
        patterns: &[r"\bc#", r"\bc sharp\b"],
    },
    SkillRule {
        skill: "Go",
        category: CategoryKey::Languages,
        patterns: &[r"\bgolang\b", r"(?:^|[\s(])go(?:[\s),./]|$)"],
    },
    // Web
    SkillRule {
        skill: "React",
        category: CategoryKey::Web,
        patterns: &[r"\breact(?:\.js)?\b", r"(?-i:React)"],
    },
    SkillRule {
        skill: "Next.js",
        category: CategoryKey::Web,
        patterns: &[r"\bnext(?:\.js)?\b"],
    },
    SkillRule {
        skill: "Node.js",
        category: CategoryKey::Web,
        patterns: &[r"\bnode(?:\.js)?\b"],
    },
    SkillRule {
        skill: "Express",
        category: CategoryKey::Web,
        patterns: &[r"\bexpress(?:\.js)?\b"],
    },
    SkillRule {
        skill: "REST",
        category: CategoryKey::Web,
        patterns: &[r"\brest\b", r"\brestful\b", r"\brest api\b"],
    },
    SkillRule {
        skill: "GraphQL",
        category: CategoryKey::Web,
        patterns: &[r"\bgraphql\b"],
    },
    // Data
    SkillRule {
        skill: "SQL",
        category: CategoryKey::Data,
        patterns: &[r"\bsql\b", r"\bstructured query language\b"],
    },
    SkillRule {
        skill: "MongoDB",
        category: CategoryKey::Data,
        patterns: &[r"\bmongodb\b", r"\bmongo\b"],
    },
    SkillRule {
        skill: "PostgreSQL",
        category: CategoryKey::Data,
        patterns: &[r"\bpostgresql\b", r"\bpostgres\b"],
    },
    SkillRule {
        skill: "MySQL",
        category: CategoryKey::Data,
        patterns: &[r"\bmysql\b"],
    },
    SkillRule {
        skill: "Redis",
        category: CategoryKey::Data,
        patterns: &[r"\bredis\b"],
    },
    // Cloud/DevOps
    SkillRule {
        skill: "AWS",
        category: CategoryKey::CloudDevops,
        patterns: &[r"\baws\b", r"\bamazon web services\b"],
    },
    SkillRule {
        skill: "Azure",
        category: CategoryKey::CloudDevops,
        patterns: &[r"\bazure\b"],
    },
    SkillRule {
        skill: "GCP",
        category: CategoryKey::CloudDevops,
        patterns: &[r"\bgcp\b", r"\bgoogle cloud\b"],
    },
    SkillRule {
        skill: "Docker",
        category: CategoryKey::CloudDevops,
        patterns: &[r"\bdocker\b"],
    },
    SkillRule {
        skill: "Kubernetes",
        category: CategoryKey::CloudDevops,
        patterns: &[r"\bkubernetes\b", r"\bk8s\b"],
    },
    SkillRule {
        skill: "CI/CD",
        category: CategoryKey::CloudDevops,
        patterns: &[r"\bci/cd\b", r"\bcontinuous integration\b"],
    },
    SkillRule {
        skill: "Linux",
        category: CategoryKey::CloudDevops,
        patterns: &[r"\blinux\b"],
    },
    // Testing
    SkillRule {
        skill: "Selenium",
        category: CategoryKey::Testing,
        patterns: &[r"\bselenium\b"],
    },
    SkillRule {
        skill: "Cypress",
        category: CategoryKey::Testing,
        patterns: &[r"\bcypress\b"],
    },
    SkillRule {
        skill: "Playwright",
        category: CategoryKey::Testing,
        patterns: &[r"\bplaywright\b"],
    },
    SkillRule {
        skill: "JUnit",
        category: CategoryKey::Testing,
        patterns: &[r"\bjunit\b"],
    },
    SkillRule {
        skill: "PyTest",
        category: CategoryKey::Testing,
        patterns: &[r"\bpytest\b", r"\bpy\.?test\b"],
    },
];

/// A skill rule with its patterns compiled.
pub struct CompiledRule {
    pub skill: &'static str,
    pub category: CategoryKey,
    matchers: Vec<Regex>,
}

impl CompiledRule {
    /// True if any of the skill's patterns occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.matchers.iter().any(|re| re.is_match(text))
    }
}

pub static COMPILED_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    SKILL_RULES
        .iter()
        .map(|rule| CompiledRule {
            skill: rule.skill,
            category: rule.category,
            matchers: rule
                .patterns
                .iter()
                .filter_map(|pattern| compile_pattern(rule.skill, pattern))
                .collect(),
        })
        .collect()
});

fn compile_pattern(skill: &str, pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            error!("Skipping invalid pattern {pattern:?} for skill {skill}: {e}");
            None
        }
    }
}

/// Returns the six categories with their skills, in catalog order.
pub fn skill_categories() -> Vec<SkillCategory> {
    CategoryKey::ALL
        .iter()
        .map(|&key| SkillCategory {
            key,
            label: key.label(),
            skills: SKILL_RULES
                .iter()
                .filter(|rule| rule.category == key)
                .map(|rule| rule.skill)
                .collect(),
        })
        .collect()
}
