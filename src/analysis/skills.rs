//! Skill extraction: fixed per-category pattern rules scanned over the raw JD.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{SkillCategory, SkillProfile};

/// Filled into `other` when no rule matches anywhere in the JD.
pub const FALLBACK_SKILLS: [&str; 4] = ["Communication", "Problem solving", "Basic coding", "Projects"];

// (skill name, case-insensitive pattern). Order within a category is output order.
// `\b` is compiled as an ASCII word boundary, so "Java開発者" still matches Java.
const RULE_TABLE: &[(SkillCategory, &[(&str, &str)])] = &[
    (
        SkillCategory::CoreCs,
        &[
            ("DSA", r"\b(dsa|data\s*structure|algorithm)\b"),
            ("OOP", r"\b(oop|object[\s-]oriented)\b"),
            ("DBMS", r"\bdbms\b"),
            ("OS", r"\boperating\s*system\b"),
            ("Networks", r"\b(computer\s*network|networking)\b"),
        ],
    ),
    (
        SkillCategory::Languages,
        &[
            // the trailing boundary already rejects "javascript"
            ("Java", r"\bjava\b"),
            ("Python", r"\bpython\b"),
            ("JavaScript", r"\bjavascript\b"),
            ("TypeScript", r"\btypescript\b"),
            // no trailing `\b`: after `+` or `#` it would reject "C++ developer"
            ("C++", r"\bc\+\+"),
            ("C#", r"\bc#"),
            ("Go", r"\bgolang\b|\bgo\s+(language|programming)\b"),
        ],
    ),
    (
        SkillCategory::Web,
        &[
            ("React", r"\breact\b"),
            ("Next.js", r"\bnext\.?js\b"),
            ("Node.js", r"\bnode\.?js\b"),
            ("Express", r"\bexpress(\.js)?\b"),
            ("REST", r"\brest(\s*api|ful)\b"),
            ("GraphQL", r"\bgraphql\b"),
        ],
    ),
    (
        SkillCategory::Data,
        &[
            ("SQL", r"\bsql\b"),
            ("MongoDB", r"\bmongodb\b"),
            ("PostgreSQL", r"\bpostgres(ql)?\b"),
            ("MySQL", r"\bmysql\b"),
            ("Redis", r"\bredis\b"),
        ],
    ),
    (
        SkillCategory::Cloud,
        &[
            ("AWS", r"\baws\b"),
            ("Azure", r"\bazure\b"),
            ("GCP", r"\b(gcp|google\s*cloud)\b"),
            ("Docker", r"\bdocker\b"),
            ("Kubernetes", r"\b(kubernetes|k8s)\b"),
            ("CI/CD", r"\bci/?cd\b"),
            ("Linux", r"\blinux\b"),
        ],
    ),
    (
        SkillCategory::Testing,
        &[
            ("Selenium", r"\bselenium\b"),
            ("Cypress", r"\bcypress\b"),
            ("Playwright", r"\bplaywright\b"),
            ("JUnit", r"\bjunit\b"),
            ("PyTest", r"\bpytest\b"),
        ],
    ),
];

struct SkillRule {
    name: &'static str,
    pattern: Regex,
}

static SKILL_RULES: LazyLock<Vec<(SkillCategory, Vec<SkillRule>)>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|(category, rules)| {
            let compiled = rules
                .iter()
                .map(|(name, pattern)| SkillRule {
                    name,
                    pattern: Regex::new(&ascii_boundaries(pattern))
                        .unwrap_or_else(|e| panic!("invalid skill pattern for {name}: {e}")),
                })
                .collect();
            (*category, compiled)
        })
        .collect()
});

/// Case-insensitive, with every `\b` restricted to ASCII word characters.
fn ascii_boundaries(pattern: &str) -> String {
    format!("(?i){}", pattern.replace(r"\b", r"(?-u:\b)"))
}

/// Scans `jd_text` against every rule independently. Never fails; an empty
/// result is reported through the `other` fallback.
pub fn extract_skills(jd_text: &str) -> SkillProfile {
    let mut profile = SkillProfile::default();

    for (category, rules) in SKILL_RULES.iter() {
        let bucket = profile.get_mut(*category);
        for rule in rules {
            if rule.pattern.is_match(jd_text) && !bucket.iter().any(|s| s == rule.name) {
                debug!(skill = rule.name, ?category, "skill rule matched");
                bucket.push(rule.name.to_string());
            }
        }
    }

    if profile.nothing_extracted() {
        profile.other = FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect();
    }

    profile
}
