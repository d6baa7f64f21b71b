use serde::{Deserialize, Serialize};

use crate::validation::patterns::trim_text;

/// Skills offered as one-click toggles.
pub const PRESET_SKILLS: &[&str] = &[
    "JavaScript",
    "React",
    "Figma",
    "WordPress",
    "Node.js",
    "Flutter",
    "Kotlin",
    "Webflow",
    "SEO",
    "Vue.js",
    "Python",
    "TypeScript",
    "Adobe XD",
    "PHP",
    "Laravel",
    "Next.js",
    "Tailwind CSS",
    "MongoDB",
];

/// Insertion-ordered, case-sensitive set of selected skills.
///
/// Persisted as a plain JSON array under `draftSkills`; duplicates in a
/// persisted array collapse to their first occurrence on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `skill` if absent, removes it if present. Returns whether the
    /// skill is selected afterwards.
    pub fn toggle(&mut self, skill: &str) -> bool {
        if self.remove(skill) {
            false
        } else {
            self.skills.push(skill.to_string());
            true
        }
    }

    /// Adds a hand-typed skill. The input is trimmed; blank input and exact
    /// duplicates are ignored. Returns whether the set grew.
    pub fn add_custom(&mut self, raw: &str) -> bool {
        let skill = trim_text(raw);
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill);
        self.skills.len() != before
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(raw: Vec<String>) -> Self {
        let mut set = SkillSet::new();
        for skill in raw {
            if !set.contains(&skill) {
                set.skills.push(skill);
            }
        }
        set
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.skills
    }
}
