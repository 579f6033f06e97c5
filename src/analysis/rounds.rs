use crate::models::{CompanyProfile, Round, RoundKind, SizeCategory, SkillProfile};

fn round(title: &str, kind: RoundKind, focus_areas: Vec<String>, why: &str) -> Round {
    Round {
        round_title: title.to_string(),
        focus_areas,
        why_it_matters: why.to_string(),
        kind,
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Interview sequence for a profile. Startups hiring for web skills get the
/// short practical loop; everyone else the standard four rounds.
pub fn map_rounds(skills: &SkillProfile, company: Option<&CompanyProfile>) -> Vec<Round> {
    let is_startup = company.is_some_and(|c| c.size_category == SizeCategory::Startup);
    let top_web = skills.web.iter().take(2).cloned();

    if is_startup && !skills.web.is_empty() {
        let mut practical = labels(&["Build a small feature", "Code quality"]);
        practical.extend(top_web);
        return vec![
            round(
                "Round 1: Practical Coding",
                RoundKind::Technical,
                practical,
                "Startups assess your ability to ship working code quickly.",
            ),
            round(
                "Round 2: System Discussion",
                RoundKind::Projects,
                labels(&["Architecture decisions", "Trade-offs", "Scalability basics"]),
                "They want to see how you think about building real products.",
            ),
            round(
                "Round 3: Culture Fit",
                RoundKind::Behavioral,
                labels(&["Ownership", "Communication", "Learning mindset"]),
                "Small teams need people who align with their pace and values.",
            ),
        ];
    }

    let has_dsa = skills.core_cs.iter().any(|s| s == "DSA");
    let mut projects = labels(&["Project walkthroughs"]);
    projects.extend(top_web);
    projects.extend(skills.languages.iter().take(1).cloned());

    vec![
        round(
            "Round 1: Online Test",
            RoundKind::OnlineTest,
            labels(&["Aptitude", "Basic DSA", "MCQs on core CS"]),
            "Filters candidates on fundamentals. Speed and accuracy matter.",
        ),
        round(
            "Round 2: Technical Interview",
            RoundKind::Technical,
            labels(&[
                if has_dsa { "DSA problem solving" } else { "Coding" },
                "Core CS concepts",
                "Time complexity",
            ]),
            "Deep assessment of your problem-solving approach and CS depth.",
        ),
        round(
            "Round 3: Tech + Projects",
            RoundKind::Projects,
            projects,
            "Validates hands-on experience and your ability to explain technical decisions.",
        ),
        round(
            "Round 4: HR / Managerial",
            RoundKind::Behavioral,
            labels(&["Behavioral questions", "Conflict resolution", "Career goals"]),
            "Assesses your communication, maturity, and cultural alignment.",
        ),
    ]
}
