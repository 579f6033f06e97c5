//! Plain-text renderings of an analysis, for copying or saving to a file.

use crate::models::AnalysisEntry;

pub fn format_plan(entry: &AnalysisEntry) -> String {
    entry
        .plan_7_days
        .iter()
        .map(|d| {
            let tasks: Vec<String> = d.tasks.iter().map(|t| format!("  - {t}")).collect();
            format!("{}: {}\n{}", d.day, d.focus, tasks.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn format_checklist(entry: &AnalysisEntry) -> String {
    entry
        .checklist
        .iter()
        .map(|r| {
            let items: Vec<String> = r.items.iter().map(|i| format!("  □ {i}")).collect();
            format!("{}\n{}", r.round_title, items.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn format_questions(entry: &AnalysisEntry) -> String {
    entry
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {q}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { "N/A" } else { value }
}

/// Header plus all three sections.
pub fn format_report(entry: &AnalysisEntry) -> String {
    [
        format!("Placement Readiness Analysis — {}", or_na(&entry.company)),
        format!("Role: {}", or_na(&entry.role)),
        format!("Score: {}/100", entry.final_score),
        format!("Date: {}", entry.created_at.format("%Y-%m-%d")),
        String::new(),
        "=== 7-Day Plan ===".to_string(),
        format_plan(entry),
        String::new(),
        "=== Round Checklist ===".to_string(),
        format_checklist(entry),
        String::new(),
        "=== Interview Questions ===".to_string(),
        format_questions(entry),
    ]
    .join("\n")
}

/// Suggested file name for a saved report.
pub fn report_file_name(entry: &AnalysisEntry) -> String {
    let stem = if entry.company.is_empty() { "report" } else { entry.company.as_str() };
    format!("analysis-{stem}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;

    fn entry() -> AnalysisEntry {
        run_analysis("Google", "SDE", "We need a Java developer with strong DSA and React")
    }

    #[test]
    fn test_plan_format() {
        let text = format_plan(&entry());
        assert!(text.starts_with("Day 1: Foundations\n  - Review OOP concepts\n"));
        assert_eq!(text.matches("\n\n").count(), 6);
        assert!(text.ends_with("  - Rest well — confidence matters"));
    }

    #[test]
    fn test_checklist_format() {
        let text = format_checklist(&entry());
        assert!(text.starts_with("Round 1: Online Test\n  □ Practice 20 aptitude questions"));
        assert!(text.contains("\n\nRound 4: HR / Managerial\n"));
    }

    #[test]
    fn test_questions_numbered() {
        let text = format_questions(&entry());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "1. How would you optimize search in sorted data?");
        assert!(lines[5].starts_with("6. "));
    }

    #[test]
    fn test_report_header_and_sections() {
        let report = format_report(&entry());
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("Placement Readiness Analysis — Google"));
        assert_eq!(lines.next(), Some("Role: SDE"));
        assert!(report.contains("=== 7-Day Plan ===\nDay 1: Foundations"));
        assert!(report.contains("=== Round Checklist ===\nRound 1: Online Test"));
        assert!(report.contains("=== Interview Questions ===\n1. "));
    }

    #[test]
    fn test_report_placeholders_without_company_or_role() {
        let entry = run_analysis("", "", "React");
        let report = format_report(&entry);
        assert!(report.starts_with("Placement Readiness Analysis — N/A\nRole: N/A\n"));
        assert_eq!(report_file_name(&entry), "analysis-report.txt");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let e = entry();
        assert_eq!(format_report(&e), format_report(&e.clone()));
    }
}
