use crate::models::{ChecklistRound, Round, RoundKind, SkillProfile};

const ONLINE_TEST_ITEMS: &[&str] = &[
    "Practice 20 aptitude questions",
    "Solve 10 easy DSA problems",
    "Review basic data structures",
    "Time yourself on MCQs",
    "Revise OS and DBMS basics",
];

const BEHAVIORAL_ITEMS: &[&str] = &[
    "Prepare STAR method answers",
    "Research company values and mission",
    "Prepare 'Tell me about yourself'",
    "Think about your strengths/weaknesses",
    "Have questions ready for the interviewer",
];

const GENERAL_ITEMS: &[&str] = &[
    "Review fundamentals",
    "Practice common questions",
    "Prepare project explanations",
    "Research the company",
    "Rest well before the round",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn items_for(kind: RoundKind, skills: &SkillProfile) -> Vec<String> {
    match kind {
        RoundKind::OnlineTest => owned(ONLINE_TEST_ITEMS),
        RoundKind::Technical => {
            let mut items = owned(&[
                "Solve 5 medium DSA problems",
                "Review sorting and searching algorithms",
                "Practice explaining your approach aloud",
            ]);
            if let Some(lang) = skills.languages.first() {
                items.push(format!("Revise {lang} syntax and idioms"));
            }
            if !skills.core_cs.is_empty() {
                items.push(format!("Review {} concepts", skills.core_cs.join(", ")));
            }
            items.extend(owned(&["Practice whiteboard coding", "Study time/space complexity analysis"]));
            items
        }
        RoundKind::Projects => {
            let mut items = owned(&[
                "Prepare 2-minute project walkthrough",
                "Know your tech stack trade-offs",
                "Be ready for 'Why did you choose X?' questions",
            ]);
            if !skills.web.is_empty() {
                items.push(format!("Review {} concepts", skills.web.join(", ")));
            }
            items.extend(owned(&[
                "Draw a simple system diagram for your main project",
                "Prepare for follow-up questions on scale",
            ]));
            items
        }
        RoundKind::Behavioral => owned(BEHAVIORAL_ITEMS),
        RoundKind::General => owned(GENERAL_ITEMS),
    }
}

/// One checklist per round, same order and titles as `rounds`.
pub fn build_checklist(skills: &SkillProfile, rounds: &[Round]) -> Vec<ChecklistRound> {
    rounds
        .iter()
        .map(|round| ChecklistRound {
            round_title: round.round_title.clone(),
            items: items_for(round.kind, skills),
        })
        .collect()
}
