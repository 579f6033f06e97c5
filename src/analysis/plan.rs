use crate::models::{DayPlan, SkillProfile};

fn day(n: u8, focus: &str, tasks: Vec<String>) -> DayPlan {
    DayPlan {
        day: format!("Day {n}"),
        focus: focus.to_string(),
        tasks,
    }
}

fn fixed(tasks: &[&str]) -> Vec<String> {
    tasks.iter().map(|s| s.to_string()).collect()
}

/// Seven days, always. Days 5 and 6 swap in stack-specific tasks.
pub fn build_plan(skills: &SkillProfile) -> Vec<DayPlan> {
    let stack_task = if skills.web.is_empty() {
        "Review your tech stack deeply".to_string()
    } else {
        format!("Review {} fundamentals", skills.web.join(", "))
    };
    let deploy_task = if skills.cloud.is_empty() {
        "Document your project architecture"
    } else {
        "Review cloud/deployment concepts"
    };
    let quality_task = if skills.testing.is_empty() {
        "Review code quality practices"
    } else {
        "Review testing fundamentals"
    };

    vec![
        day(1, "Foundations", fixed(&[
            "Review OOP concepts",
            "Brush up on DBMS normalization",
            "Revise OS scheduling basics",
            "Read about networking layers",
        ])),
        day(2, "Core CS Deep Dive", fixed(&[
            "Solve 5 easy DSA problems",
            "Study arrays, strings, linked lists",
            "Review time complexity",
            "Practice explaining solutions aloud",
        ])),
        day(3, "DSA Practice", fixed(&[
            "Solve 5 medium problems (trees, graphs)",
            "Study recursion and backtracking",
            "Practice stack and queue problems",
            "Analyze space complexity",
        ])),
        day(4, "Advanced Coding", fixed(&[
            "Solve 3 medium-hard problems",
            "Practice dynamic programming basics",
            "Review greedy algorithms",
            "Timed coding session (45 min)",
        ])),
        day(5, "Projects & Stack", vec![
            "Polish project descriptions for resume".to_string(),
            stack_task,
            "Prepare 2-min project pitch".to_string(),
            deploy_task.to_string(),
        ]),
        day(6, "Mock Interview", fixed(&[
            "Do 1 full mock coding interview",
            "Practice behavioral questions (STAR)",
            quality_task,
            "Record yourself and review",
        ])),
        day(7, "Revision & Rest", fixed(&[
            "Review weak areas from practice",
            "Re-solve 3 problems you struggled with",
            "Light reading on company/role",
            "Rest well — confidence matters",
        ])),
    ]
}
