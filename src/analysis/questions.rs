use crate::models::SkillProfile;

pub const MAX_QUESTIONS: usize = 10;

const QUESTION_BANK: &[(&str, [&str; 2])] = &[
    (
        "DSA",
        [
            "How would you optimize search in sorted data?",
            "Explain the difference between BFS and DFS with use cases.",
        ],
    ),
    (
        "OOP",
        [
            "Explain SOLID principles with examples.",
            "What is the difference between composition and inheritance?",
        ],
    ),
    (
        "DBMS",
        [
            "What is normalization? Explain up to 3NF.",
            "When would you choose NoSQL over SQL?",
        ],
    ),
    (
        "OS",
        [
            "Explain process vs thread with real examples.",
            "What is deadlock and how can it be prevented?",
        ],
    ),
    (
        "Networks",
        [
            "Explain TCP/IP vs UDP with use cases.",
            "What happens when you type a URL in a browser?",
        ],
    ),
    (
        "Java",
        [
            "Explain JVM architecture briefly.",
            "What are the differences between HashMap and ConcurrentHashMap?",
        ],
    ),
    (
        "Python",
        [
            "How does Python handle memory management?",
            "Explain generators and when to use them.",
        ],
    ),
    (
        "JavaScript",
        [
            "Explain closures with a practical example.",
            "What is the event loop in JavaScript?",
        ],
    ),
    (
        "TypeScript",
        [
            "How do generics improve type safety?",
            "Explain union vs intersection types.",
        ],
    ),
    (
        "React",
        [
            "Explain state management options in React.",
            "How does the virtual DOM work?",
        ],
    ),
    (
        "Node.js",
        [
            "How does Node.js handle concurrent requests?",
            "Explain middleware in Express.",
        ],
    ),
    (
        "SQL",
        [
            "Explain indexing and when it helps.",
            "Write a query to find the second highest salary.",
        ],
    ),
    (
        "MongoDB",
        [
            "When would you embed vs reference documents?",
            "Explain aggregation pipeline stages.",
        ],
    ),
    (
        "AWS",
        [
            "Explain the difference between EC2 and Lambda.",
            "How would you set up a basic CI/CD pipeline on AWS?",
        ],
    ),
    (
        "Docker",
        [
            "What is the difference between an image and a container?",
            "Explain multi-stage Docker builds.",
        ],
    ),
    (
        "Communication",
        [
            "How do you explain a technical concept to a non-technical person?",
            "Describe a time you resolved a team conflict.",
        ],
    ),
    (
        "Problem solving",
        [
            "Walk through your approach to solving a new problem.",
            "How do you handle ambiguous requirements?",
        ],
    ),
];

pub const GENERIC_QUESTIONS: [&str; 5] = [
    "Tell me about yourself and your technical background.",
    "Walk through a project you're most proud of.",
    "How do you approach learning a new technology?",
    "Describe a bug you spent a long time debugging.",
    "What is your understanding of version control?",
];

fn bank_for(skill: &str) -> Option<&'static [&'static str; 2]> {
    QUESTION_BANK.iter().find(|(name, _)| *name == skill).map(|(_, qs)| qs)
}

/// Bank questions for every skill in flattened order, capped at ten. Falls
/// back to the generic set only when no skill has a bank entry.
pub fn select_questions(skills: &SkillProfile) -> Vec<String> {
    let mut questions: Vec<String> = skills
        .all_names()
        .into_iter()
        .filter_map(bank_for)
        .flat_map(|qs| qs.iter().map(|q| q.to_string()))
        .take(MAX_QUESTIONS)
        .collect();

    if questions.is_empty() {
        questions = GENERIC_QUESTIONS.iter().map(|q| q.to_string()).collect();
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::extract_skills;

    #[test]
    fn test_questions_follow_skill_order() {
        let questions = select_questions(&extract_skills("Java developer with DSA and React"));
        assert_eq!(questions.len(), 6);
        assert_eq!(questions[0], "How would you optimize search in sorted data?");
        assert_eq!(questions[2], "Explain JVM architecture briefly.");
        assert_eq!(questions[4], "Explain state management options in React.");
    }

    #[test]
    fn test_capped_at_ten() {
        let questions = select_questions(&extract_skills(
            "DSA, OOP, DBMS, operating system, networking, Java, Python, React, SQL, AWS, Docker",
        ));
        assert_eq!(questions.len(), MAX_QUESTIONS);
        assert_eq!(questions[9], "What happens when you type a URL in a browser?");
    }

    #[test]
    fn test_skills_without_bank_fall_back_to_generic() {
        let questions = select_questions(&extract_skills("Selenium and Kubernetes"));
        assert_eq!(questions, GENERIC_QUESTIONS.map(String::from).to_vec());
    }

    #[test]
    fn test_fallback_profile_uses_soft_skill_bank() {
        let questions = select_questions(&extract_skills("a motivated team player"));
        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0], "How do you explain a technical concept to a non-technical person?");
    }

    #[test]
    fn test_skill_without_bank_contributes_nothing() {
        let questions = select_questions(&extract_skills("Redis and Docker"));
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.contains("image") || q.contains("Docker")));
    }
}
