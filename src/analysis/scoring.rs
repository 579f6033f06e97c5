use tracing::debug;

use crate::models::{Confidence, ConfidenceMap, SkillCategory, SkillProfile};

const BASE: i64 = 35;
const PER_CATEGORY: i64 = 5;
const COMPANY_BONUS: i64 = 10;
const ROLE_BONUS: i64 = 10;
const LONG_JD_BONUS: i64 = 10;
const LONG_JD_CHARS: usize = 800;
const CONFIDENCE_STEP: i64 = 2;

/// Readiness before self-ratings: 35, +5 per populated category, +10 each for
/// company, role, and a JD over 800 characters. Pure.
pub fn base_score(profile: &SkillProfile, company: &str, role: &str, jd_text: &str) -> u32 {
    let mut score = BASE;
    score += SkillCategory::EXTRACTED
        .iter()
        .filter(|c| profile.has(**c))
        .count() as i64
        * PER_CATEGORY;
    if !company.trim().is_empty() {
        score += COMPANY_BONUS;
    }
    if !role.trim().is_empty() {
        score += ROLE_BONUS;
    }
    if jd_text.chars().count() > LONG_JD_CHARS {
        score += LONG_JD_BONUS;
    }
    debug!(score, "base score computed");
    clamp_score(score)
}

/// Base score adjusted +2 per "know" and -2 per "practice" rating.
pub fn final_score(base: u32, confidence: &ConfidenceMap) -> u32 {
    let adjustment: i64 = confidence
        .values()
        .map(|c| match c {
            Confidence::Know => CONFIDENCE_STEP,
            Confidence::Practice => -CONFIDENCE_STEP,
        })
        .sum();
    clamp_score(base as i64 + adjustment)
}

fn clamp_score(score: i64) -> u32 {
    score.clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::extract_skills;

    fn full_profile() -> SkillProfile {
        extract_skills("DSA, Java, React, SQL, AWS, Selenium")
    }

    #[test]
    fn test_base_minimum() {
        let profile = extract_skills("nothing relevant");
        assert_eq!(base_score(&profile, "", "", "nothing relevant"), 35);
    }

    #[test]
    fn test_base_all_bonuses() {
        let jd = "x".repeat(801);
        assert_eq!(base_score(&full_profile(), "Google", "SDE", &jd), 95);
    }

    #[test]
    fn test_blank_company_and_role_do_not_count() {
        let profile = extract_skills("React");
        assert_eq!(base_score(&profile, "   ", "\t", "React"), 40);
        assert_eq!(base_score(&profile, "Acme", "Dev", "React"), 60);
    }

    #[test]
    fn test_long_jd_threshold_is_exclusive() {
        let profile = SkillProfile::default();
        assert_eq!(base_score(&profile, "", "", &"a".repeat(800)), 35);
        assert_eq!(base_score(&profile, "", "", &"a".repeat(801)), 45);
    }

    #[test]
    fn test_base_is_deterministic() {
        let profile = full_profile();
        let a = base_score(&profile, "Acme", "SDE", "jd");
        let b = base_score(&profile, "Acme", "SDE", "jd");
        assert_eq!(a, b);
    }

    #[test]
    fn test_final_adjusts_per_rating() {
        let mut map = ConfidenceMap::new();
        map.insert("Java".to_string(), Confidence::Practice);
        map.insert("React".to_string(), Confidence::Practice);
        assert_eq!(final_score(60, &map), 56);

        map.insert("Java".to_string(), Confidence::Know);
        assert_eq!(final_score(60, &map), 60);
    }

    #[test]
    fn test_final_clamped_to_bounds() {
        let mut map = ConfidenceMap::new();
        for i in 0..40 {
            map.insert(format!("s{i}"), Confidence::Practice);
        }
        assert_eq!(final_score(35, &map), 0);

        for v in map.values_mut() {
            *v = Confidence::Know;
        }
        assert_eq!(final_score(95, &map), 100);
    }

    #[test]
    fn test_toggle_to_know_never_decreases_and_back_restores() {
        let mut map = ConfidenceMap::new();
        for s in ["DSA", "Java", "React"] {
            map.insert(s.to_string(), Confidence::Practice);
        }
        let before = final_score(70, &map);
        map.insert("Java".to_string(), Confidence::Know);
        let after = final_score(70, &map);
        assert!(after >= before);
        map.insert("Java".to_string(), Confidence::Practice);
        assert_eq!(final_score(70, &map), before);
    }
}
