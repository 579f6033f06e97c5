use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::models::{AnalysisEntry, Confidence, SkillCategory};
use crate::storage::{KvStore, Storage};

struct AppState {
    entries: Vec<AnalysisEntry>,
    selected: usize,
    skill_cursor: usize,
    scroll_offset: u16,
    status_line: Option<String>,
}

impl AppState {
    fn new(entries: Vec<AnalysisEntry>) -> Self {
        Self {
            entries,
            selected: 0,
            skill_cursor: 0,
            scroll_offset: 0,
            status_line: None,
        }
    }

    fn current_entry(&self) -> Option<&AnalysisEntry> {
        self.entries.get(self.selected)
    }

    fn skill_names(&self) -> Vec<String> {
        self.current_entry()
            .map(|e| e.extracted_skills.all_names().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }

    fn next(&mut self) {
        if !self.entries.is_empty() && self.selected < self.entries.len() - 1 {
            self.selected += 1;
            self.reset_cursor();
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.reset_cursor();
        }
    }

    fn reset_cursor(&mut self) {
        self.skill_cursor = 0;
        self.scroll_offset = 0;
        self.status_line = None;
    }

    fn next_skill(&mut self) {
        let count = self.skill_names().len();
        if count > 0 && self.skill_cursor < count - 1 {
            self.skill_cursor += 1;
        }
    }

    fn prev_skill(&mut self) {
        self.skill_cursor = self.skill_cursor.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }

    /// Flips the skill under the cursor and writes the entry back in place.
    fn toggle_selected_skill<S: KvStore>(&mut self, storage: &Storage<S>) {
        let names = self.skill_names();
        let Some(skill) = names.get(self.skill_cursor) else { return };
        let Some(entry) = self.entries.get_mut(self.selected) else { return };

        let message = match entry.toggle_confidence(skill) {
            Ok(rating) => match storage.save_to_history(entry) {
                Ok(()) => format!("{skill} -> {rating}, score {}", entry.final_score),
                Err(e) => format!("save failed: {e}"),
            },
            Err(e) => e.to_string(),
        };
        self.status_line = Some(message);
    }
}

pub fn run_browse<S: KvStore>(storage: &Storage<S>) -> Result<()> {
    let entries = storage.history();
    if entries.is_empty() {
        println!("No analyses yet. Run 'prep analyze' first.");
        return Ok(());
    }

    let mut state = AppState::new(entries);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, storage);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop<S: KvStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    storage: &Storage<S>,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Right | KeyCode::Char('l') => state.next_skill(),
                KeyCode::Left | KeyCode::Char('h') => state.prev_skill(),
                KeyCode::Char(' ') => state.toggle_selected_skill(storage),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                KeyCode::Enter => {
                    if let Some(entry) = state.current_entry() {
                        let id = entry.id.clone();
                        state.status_line = Some(match storage.set_current_analysis_id(&id) {
                            Ok(()) => "set as current analysis".to_string(),
                            Err(e) => format!("save failed: {e}"),
                        });
                    }
                }
                _ => {}
            }
            list_state.select(Some(state.selected));
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(frame.area());

    let items: Vec<ListItem> = state
        .entries
        .iter()
        .map(|entry| {
            let company = if entry.company.is_empty() { "No company" } else { entry.company.as_str() };
            ListItem::new(format!(
                "{:>3} {} | {}",
                entry.final_score,
                truncate(company, 18),
                entry.created_at.format("%Y-%m-%d")
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" History ({}) ", state.entries.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    let detail = Paragraph::new(build_detail(state))
        .block(Block::default().borders(Borders::ALL).title(" Analysis "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));
    frame.render_widget(detail, chunks[1]);

    let help_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let help = Paragraph::new(
        " j/k:entry  h/l:skill  space:know/practice  enter:set current  J/K:scroll  q:quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area[1]);
}

fn build_detail(state: &AppState) -> Text<'_> {
    let Some(entry) = state.current_entry() else {
        return Text::raw("No analysis selected");
    };

    let mut lines: Vec<Line> = Vec::new();

    let heading = match (entry.company.is_empty(), entry.role.is_empty()) {
        (false, false) => format!("{} - {}", entry.company, entry.role),
        (false, true) => entry.company.clone(),
        (true, false) => entry.role.clone(),
        (true, true) => "Untitled analysis".to_string(),
    };
    lines.push(Line::from(Span::styled(heading, Style::default().add_modifier(Modifier::BOLD))));
    lines.push(Line::from(format!(
        "Readiness: {}/100 (base {})",
        entry.final_score, entry.base_score
    )));
    if let Some(status) = &state.status_line {
        lines.push(Line::from(Span::styled(status.clone(), Style::default().fg(Color::Yellow))));
    }
    lines.push(Line::from(""));

    let mut index = 0;
    for category in SkillCategory::ALL {
        let skills = entry.extracted_skills.get(category);
        if skills.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            format!("  {}", category.label().to_uppercase()),
            Style::default().fg(Color::Cyan),
        )));
        for skill in skills {
            let know = entry.confidence(skill) == Some(Confidence::Know);
            let marker = if know { "[x]" } else { "[ ]" };
            let mut style = if know {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            if index == state.skill_cursor {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            lines.push(Line::from(Span::styled(format!("    {marker} {skill}"), style)));
            index += 1;
        }
    }
    lines.push(Line::from(""));

    if let Some(info) = &entry.company_info {
        lines.push(Line::from(Span::styled(
            format!("COMPANY: {} ({})", info.name, info.size_category),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for line in textwrap::fill(&info.hiring_focus, 70).lines() {
            lines.push(Line::from(format!("  {line}")));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("ROUNDS", Style::default().add_modifier(Modifier::BOLD))));
    for round in &entry.round_mapping {
        lines.push(Line::from(format!("  {}", round.round_title)));
        lines.push(Line::from(Span::styled(
            format!("    {}", round.focus_areas.join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    Text::from(lines)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_analysis;
    use crate::storage::MemoryStore;

    #[test]
    fn test_skill_cursor_stays_in_bounds() {
        let mut state = AppState::new(vec![run_analysis("", "", "React and Java")]);
        for _ in 0..5 {
            state.next_skill();
        }
        assert_eq!(state.skill_cursor, 1);
        for _ in 0..5 {
            state.prev_skill();
        }
        assert_eq!(state.skill_cursor, 0);
    }

    #[test]
    fn test_toggle_persists_entry() {
        let storage = Storage::new(MemoryStore::default());
        let entry = run_analysis("acme", "", "React and Java");
        storage.save_to_history(&entry).unwrap();

        let mut state = AppState::new(storage.history());
        state.toggle_selected_skill(&storage);

        let stored = storage.entry_by_id(&entry.id).unwrap();
        assert_eq!(stored.confidence("Java"), Some(Confidence::Know));
        assert_eq!(stored.final_score, entry.final_score + 4);
        assert!(state.status_line.unwrap().starts_with("Java -> know"));
    }

    #[test]
    fn test_changing_entry_resets_cursor() {
        let mut state = AppState::new(vec![
            run_analysis("", "", "React and Java"),
            run_analysis("", "", "Python"),
        ]);
        state.next_skill();
        state.next();
        assert_eq!(state.selected, 1);
        assert_eq!(state.skill_cursor, 0);
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Tech Mahindra Limited", 10), "Tech Ma...");
        assert_eq!(truncate("ééééééééééééé", 5), "éé...");
    }
}
