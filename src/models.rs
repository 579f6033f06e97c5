use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Skill buckets, in the order they are scanned, flattened, and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    CoreCs,
    Languages,
    Web,
    Data,
    Cloud,
    Testing,
    Other,
}

impl SkillCategory {
    /// Categories filled by pattern rules. `Other` is only ever a fallback.
    pub const EXTRACTED: [SkillCategory; 6] = [
        SkillCategory::CoreCs,
        SkillCategory::Languages,
        SkillCategory::Web,
        SkillCategory::Data,
        SkillCategory::Cloud,
        SkillCategory::Testing,
    ];

    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::CoreCs,
        SkillCategory::Languages,
        SkillCategory::Web,
        SkillCategory::Data,
        SkillCategory::Cloud,
        SkillCategory::Testing,
        SkillCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::CoreCs => "Core CS",
            SkillCategory::Languages => "Languages",
            SkillCategory::Web => "Web",
            SkillCategory::Data => "Data",
            SkillCategory::Cloud => "Cloud / DevOps",
            SkillCategory::Testing => "Testing",
            SkillCategory::Other => "General",
        }
    }
}

/// Skills found in a JD, grouped by category. Names are distinct within a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProfile {
    #[serde(rename = "coreCS", default)]
    pub core_cs: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub web: Vec<String>,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub cloud: Vec<String>,
    #[serde(default)]
    pub testing: Vec<String>,
    #[serde(default)]
    pub other: Vec<String>,
}

impl SkillProfile {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::CoreCs => &self.core_cs,
            SkillCategory::Languages => &self.languages,
            SkillCategory::Web => &self.web,
            SkillCategory::Data => &self.data,
            SkillCategory::Cloud => &self.cloud,
            SkillCategory::Testing => &self.testing,
            SkillCategory::Other => &self.other,
        }
    }

    pub fn get_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::CoreCs => &mut self.core_cs,
            SkillCategory::Languages => &mut self.languages,
            SkillCategory::Web => &mut self.web,
            SkillCategory::Data => &mut self.data,
            SkillCategory::Cloud => &mut self.cloud,
            SkillCategory::Testing => &mut self.testing,
            SkillCategory::Other => &mut self.other,
        }
    }

    pub fn has(&self, category: SkillCategory) -> bool {
        !self.get(category).is_empty()
    }

    /// True when no pattern rule matched (the `other` fallback was used).
    pub fn nothing_extracted(&self) -> bool {
        SkillCategory::EXTRACTED.iter().all(|c| !self.has(*c))
    }

    /// Every skill name, category order first, extraction order within a category.
    pub fn all_names(&self) -> Vec<&str> {
        SkillCategory::ALL
            .iter()
            .flat_map(|c| self.get(*c).iter().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCategory {
    Startup,
    #[serde(rename = "Mid-size")]
    MidSize,
    Enterprise,
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SizeCategory::Startup => "Startup",
            SizeCategory::MidSize => "Mid-size",
            SizeCategory::Enterprise => "Enterprise",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub industry: String,
    pub size_category: SizeCategory,
    pub hiring_focus: String,
}

/// What a round tests. Drives checklist generation instead of title matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundKind {
    OnlineTest,
    Technical,
    Projects,
    Behavioral,
    #[default]
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub round_title: String,
    pub focus_areas: Vec<String>,
    pub why_it_matters: String,
    #[serde(default)]
    pub kind: RoundKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistRound {
    pub round_title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String, // "Day 1" .. "Day 7"
    pub focus: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Know,
    Practice,
}

impl Confidence {
    pub fn toggled(self) -> Self {
        match self {
            Confidence::Know => Confidence::Practice,
            Confidence::Practice => Confidence::Know,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Know => f.write_str("know"),
            Confidence::Practice => f.write_str("practice"),
        }
    }
}

/// Ratings keyed by skill name. A name found in two categories is one entry.
pub type ConfidenceMap = BTreeMap<String, Confidence>;

/// One analyzed JD. Only `skill_confidence_map`, `final_score`, and
/// `updated_at` change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: SkillProfile,
    pub company_info: Option<CompanyProfile>,
    pub round_mapping: Vec<Round>,
    pub checklist: Vec<ChecklistRound>,
    #[serde(rename = "plan7Days")]
    pub plan_7_days: Vec<DayPlan>,
    pub questions: Vec<String>,
    pub base_score: u32,
    pub skill_confidence_map: ConfidenceMap,
    pub final_score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProofFooter {
    pub ui_built: bool,
    pub logic_working: bool,
    pub test_passed: bool,
    pub deployed: bool,
}

impl ProofFooter {
    pub fn all_set(&self) -> bool {
        self.ui_built && self.logic_working && self.test_passed && self.deployed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Submission {
    pub project_link: String,
    pub repository_link: String,
    pub deployed_link: String,
}

impl Submission {
    pub fn is_complete(&self) -> bool {
        !self.project_link.is_empty() && !self.repository_link.is_empty() && !self.deployed_link.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    Shipped,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Shipped => "Shipped",
        };
        f.write_str(label)
    }
}
