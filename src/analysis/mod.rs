//! JD analysis pipeline.
//!
//! Extraction, company inference, round mapping, checklist, plan, questions, scoring.
//! Every stage is a pure function; only `run_analysis` assigns ids and timestamps.

pub mod checklist;
pub mod company;
pub mod plan;
pub mod questions;
pub mod rounds;
pub mod scoring;
pub mod skills;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::{PrepError, Result};
use crate::models::{AnalysisEntry, Confidence, ConfidenceMap};

/// JDs shorter than this still run, with a warning.
pub const SHORT_JD_CHARS: usize = 200;

pub const SHORT_JD_WARNING: &str =
    "This JD is too short to analyze deeply. Paste full JD for better output.";

/// Checks a JD before analysis. Blank text is rejected; short text passes
/// with a warning message.
pub fn validate_jd(jd_text: &str) -> Result<Option<&'static str>> {
    let trimmed = jd_text.trim();
    if trimmed.is_empty() {
        return Err(PrepError::Validation("Job description is required.".to_string()));
    }
    if trimmed.chars().count() < SHORT_JD_CHARS {
        return Ok(Some(SHORT_JD_WARNING));
    }
    Ok(None)
}

/// Runs the full pipeline over already-validated input.
pub fn run_analysis(company: &str, role: &str, jd_text: &str) -> AnalysisEntry {
    let extracted_skills = skills::extract_skills(jd_text);
    let company_info = company::infer_company(company);
    let round_mapping = rounds::map_rounds(&extracted_skills, company_info.as_ref());
    let checklist = checklist::build_checklist(&extracted_skills, &round_mapping);
    let plan_7_days = plan::build_plan(&extracted_skills);
    let questions = questions::select_questions(&extracted_skills);
    let base_score = scoring::base_score(&extracted_skills, company, role, jd_text);

    let skill_confidence_map: ConfidenceMap = extracted_skills
        .all_names()
        .into_iter()
        .map(|name| (name.to_string(), Confidence::Practice))
        .collect();
    let final_score = scoring::final_score(base_score, &skill_confidence_map);

    let now = Utc::now();
    let entry = AnalysisEntry {
        id: Uuid::new_v4().to_string(),
        created_at: now,
        updated_at: now,
        company: company.to_string(),
        role: role.to_string(),
        jd_text: jd_text.to_string(),
        extracted_skills,
        company_info,
        round_mapping,
        checklist,
        plan_7_days,
        questions,
        base_score,
        skill_confidence_map,
        final_score,
    };
    info!(id = %entry.id, base_score, final_score, "analysis created");
    entry
}

impl AnalysisEntry {
    pub fn confidence(&self, skill: &str) -> Option<Confidence> {
        self.skill_confidence_map.get(skill).copied()
    }

    /// Flips one rating and recomputes the final score. Returns the new rating.
    pub fn toggle_confidence(&mut self, skill: &str) -> Result<Confidence> {
        let current = self
            .confidence(skill)
            .ok_or_else(|| PrepError::NotFound(format!("skill '{skill}' in analysis {}", self.id)))?;
        self.set_confidence(skill, current.toggled())?;
        Ok(current.toggled())
    }

    pub fn set_confidence(&mut self, skill: &str, rating: Confidence) -> Result<()> {
        let slot = self
            .skill_confidence_map
            .get_mut(skill)
            .ok_or_else(|| PrepError::NotFound(format!("skill '{skill}' in analysis {}", self.id)))?;
        *slot = rating;
        self.final_score = scoring::final_score(self.base_score, &self.skill_confidence_map);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Skills still rated "practice", in profile order.
    pub fn weak_skills(&self, limit: usize) -> Vec<&str> {
        self.extracted_skills
            .all_names()
            .into_iter()
            .filter(|s| self.confidence(s) == Some(Confidence::Practice))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeCategory;

    const SCENARIO_JD: &str = "We need a Java developer with strong DSA and React experience at Google";

    #[test]
    fn test_validate_rejects_blank() {
        assert!(matches!(validate_jd(""), Err(PrepError::Validation(_))));
        assert!(matches!(validate_jd("   \n\t"), Err(PrepError::Validation(_))));
    }

    #[test]
    fn test_validate_warns_on_short_jd() {
        assert_eq!(validate_jd("React").unwrap(), Some(SHORT_JD_WARNING));
        assert_eq!(validate_jd(&"a".repeat(200)).unwrap(), None);
    }

    #[test]
    fn test_scenario_enterprise() {
        let entry = run_analysis("Google", "SDE", SCENARIO_JD);
        assert!(entry.extracted_skills.languages.contains(&"Java".to_string()));
        assert!(entry.extracted_skills.core_cs.contains(&"DSA".to_string()));
        assert!(entry.extracted_skills.web.contains(&"React".to_string()));
        assert_eq!(entry.company_info.as_ref().unwrap().size_category, SizeCategory::Enterprise);
        assert_eq!(entry.round_mapping.len(), 4);
        assert_eq!(entry.round_mapping[0].round_title, "Round 1: Online Test");
    }

    #[test]
    fn test_scenario_startup_web() {
        let entry = run_analysis("acme", "", "Frontend work in React.");
        assert_eq!(entry.company_info.as_ref().unwrap().size_category, SizeCategory::Startup);
        assert_eq!(entry.round_mapping.len(), 3);
        assert!(entry.round_mapping[0].round_title.contains("Practical Coding"));
    }

    #[test]
    fn test_deterministic_except_identity() {
        let a = run_analysis("acme", "SDE", SCENARIO_JD);
        let b = run_analysis("acme", "SDE", SCENARIO_JD);
        assert_ne!(a.id, b.id);
        assert_eq!(a.extracted_skills, b.extracted_skills);
        assert_eq!(a.round_mapping, b.round_mapping);
        assert_eq!(a.checklist, b.checklist);
        assert_eq!(a.plan_7_days, b.plan_7_days);
        assert_eq!(a.questions, b.questions);
        assert_eq!(a.base_score, b.base_score);
    }

    #[test]
    fn test_all_skills_start_as_practice() {
        let entry = run_analysis("", "", SCENARIO_JD);
        assert_eq!(entry.skill_confidence_map.len(), 3);
        assert!(entry.skill_confidence_map.values().all(|c| *c == Confidence::Practice));
        assert_eq!(entry.final_score, entry.base_score - 6);
    }

    #[test]
    fn test_toggle_round_trip_restores_score() {
        let mut entry = run_analysis("Google", "SDE", SCENARIO_JD);
        let before = entry.final_score;
        let created = entry.updated_at;

        assert_eq!(entry.toggle_confidence("Java").unwrap(), Confidence::Know);
        assert_eq!(entry.final_score, before + 4);
        assert!(entry.updated_at >= created);

        assert_eq!(entry.toggle_confidence("Java").unwrap(), Confidence::Practice);
        assert_eq!(entry.final_score, before);
    }

    #[test]
    fn test_toggle_unknown_skill_is_not_found() {
        let mut entry = run_analysis("", "", SCENARIO_JD);
        assert!(matches!(entry.toggle_confidence("Rust"), Err(PrepError::NotFound(_))));
    }

    #[test]
    fn test_weak_skills_in_profile_order() {
        let mut entry = run_analysis("", "", "DSA, OOP, Java, Python, React");
        entry.set_confidence("DSA", Confidence::Know).unwrap();
        assert_eq!(entry.weak_skills(3), vec!["OOP", "Java", "Python"]);
    }

    #[test]
    fn test_scores_within_bounds() {
        for jd in ["", "React", SCENARIO_JD, "DSA Java React SQL AWS Selenium ".repeat(40).as_str()] {
            let entry = run_analysis("Google", "SDE", jd);
            assert!(entry.base_score <= 100);
            assert!(entry.final_score <= 100);
        }
    }
}
