mod analysis;
mod config;
mod db;
mod errors;
mod export;
mod models;
mod storage;
mod tui;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::db::SqliteStore;
use crate::models::{AnalysisEntry, Confidence, SkillCategory};
use crate::storage::{Storage, STEPS, TEST_CHECKLIST, TEST_CHECKLIST_LEN};

#[derive(Parser)]
#[command(name = "prep")]
#[command(about = "Placement prep - analyze job descriptions into interview plans and readiness scores")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the store
    Init,

    /// Analyze a job description
    Analyze {
        /// Company name (optional)
        #[arg(short, long, default_value = "")]
        company: String,

        /// Role name (optional)
        #[arg(short, long, default_value = "")]
        role: String,

        /// Read the JD from a file instead of the argument
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// JD text
        text: Option<String>,
    },

    /// List past analyses
    History,

    /// Show an analysis (defaults to the current one)
    Show {
        /// Analysis ID or unique prefix
        id: Option<String>,
    },

    /// Set the current analysis
    Use {
        /// Analysis ID or unique prefix
        id: String,
    },

    /// Toggle or set the confidence rating of one skill
    Skill {
        /// Analysis ID or unique prefix
        id: String,

        /// Skill name, as shown by `show`
        skill: String,

        /// Mark as known
        #[arg(long, conflicts_with = "practice")]
        know: bool,

        /// Mark as needing practice
        #[arg(long)]
        practice: bool,
    },

    /// Export an analysis as plain text
    Export {
        /// Analysis ID or unique prefix (defaults to the current one)
        id: Option<String>,

        /// Only the 7-day plan
        #[arg(long, group = "section")]
        plan: bool,

        /// Only the round checklist
        #[arg(long, group = "section")]
        checklist: bool,

        /// Only the interview questions
        #[arg(long, group = "section")]
        questions: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Shipping test checklist
    Checklist {
        #[command(subcommand)]
        command: Option<ChecklistCommands>,
    },

    /// Set proof-of-work flags
    Proof {
        #[arg(long)]
        ui_built: Option<bool>,

        #[arg(long)]
        logic_working: Option<bool>,

        #[arg(long)]
        test_passed: Option<bool>,

        #[arg(long)]
        deployed: Option<bool>,
    },

    /// Record submission links
    Submit {
        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        repository: Option<String>,

        #[arg(long)]
        deployed: Option<String>,
    },

    /// Show overall project status
    Status,

    /// Browse history interactively
    Browse,
}

#[derive(Subcommand)]
enum ChecklistCommands {
    /// Show all items
    Show,

    /// Toggle item N (1-10)
    Toggle { number: usize },

    /// Clear every item
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.init_logging();

    let db = SqliteStore::open(&config.db_path)?;
    if !matches!(cli.command, Commands::Init) {
        db.ensure_initialized()?;
    }
    let storage = Storage::new(db);

    match cli.command {
        Commands::Init => {
            storage.backend().init()?;
            println!("Store initialized at {}", storage.backend().path().display());
        }

        Commands::Analyze { company, role, file, text } => {
            let raw = match (file, text) {
                (Some(path), _) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read JD file: {}", path.display()))?,
                (None, Some(text)) => text,
                (None, None) => String::new(),
            };
            let (entry, warning) = storage.submit_analysis(&company, &role, &raw)?;

            println!("Analysis complete: {}", entry.id);
            if let Some(warning) = warning {
                println!("Warning: {warning}");
            }
            print_entry(&entry);
        }

        Commands::History => {
            let history = storage.history();
            if history.is_empty() {
                println!("No analyses yet.");
            } else {
                let current = storage.current_analysis_id();
                println!(
                    "{:<2}{:<10} {:<20} {:<20} {:<12} {:>6}",
                    "", "ID", "COMPANY", "ROLE", "CREATED", "SCORE"
                );
                println!("{}", "-".repeat(72));
                for entry in history {
                    let marker = if current.as_deref() == Some(entry.id.as_str()) { "*" } else { "" };
                    let company = if entry.company.is_empty() { "No company" } else { entry.company.as_str() };
                    println!(
                        "{:<2}{:<10} {:<20} {:<20} {:<12} {:>6}",
                        marker,
                        entry.id.chars().take(8).collect::<String>(),
                        truncate(company, 18),
                        truncate(&entry.role, 18),
                        entry.created_at.format("%Y-%m-%d"),
                        entry.final_score
                    );
                }
            }
        }

        Commands::Show { id } => {
            let entry = resolve_entry(&storage, id.as_deref())?;
            print_entry(&entry);
        }

        Commands::Use { id } => {
            let entry = resolve_entry(&storage, Some(&id))?;
            storage.set_current_analysis_id(&entry.id)?;
            println!("Current analysis set to {}", entry.id);
        }

        Commands::Skill { id, skill, know, practice } => {
            let mut entry = resolve_entry(&storage, Some(&id))?;
            let rating = if know {
                entry.set_confidence(&skill, Confidence::Know)?;
                Confidence::Know
            } else if practice {
                entry.set_confidence(&skill, Confidence::Practice)?;
                Confidence::Practice
            } else {
                entry.toggle_confidence(&skill)?
            };
            storage.save_to_history(&entry)?;
            println!("{skill}: {rating} (score {}/100)", entry.final_score);
        }

        Commands::Export { id, plan, checklist, questions, output } => {
            let entry = resolve_entry(&storage, id.as_deref())?;
            let text = if plan {
                export::format_plan(&entry)
            } else if checklist {
                export::format_checklist(&entry)
            } else if questions {
                export::format_questions(&entry)
            } else {
                export::format_report(&entry)
            };

            match output {
                Some(path) => {
                    let path = if path.is_dir() { path.join(export::report_file_name(&entry)) } else { path };
                    std::fs::write(&path, &text)
                        .with_context(|| format!("Failed to write to {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{text}"),
            }
        }

        Commands::Checklist { command } => {
            let mut flags = storage.test_checklist();
            match command.unwrap_or(ChecklistCommands::Show) {
                ChecklistCommands::Show => {}
                ChecklistCommands::Toggle { number } => {
                    if !(1..=TEST_CHECKLIST_LEN).contains(&number) {
                        bail!("Checklist item must be between 1 and {TEST_CHECKLIST_LEN}");
                    }
                    flags[number - 1] = !flags[number - 1];
                    storage.save_test_checklist(&flags)?;
                }
                ChecklistCommands::Reset => {
                    flags = vec![false; TEST_CHECKLIST_LEN];
                    storage.save_test_checklist(&flags)?;
                }
            }
            let passed = flags.iter().filter(|f| **f).count();
            println!("Tests passed: {passed} / {TEST_CHECKLIST_LEN}");
            for (i, ((label, hint), done)) in TEST_CHECKLIST.iter().zip(&flags).enumerate() {
                println!("{:>3}. [{}] {}", i + 1, if *done { "x" } else { " " }, label);
                println!("        {hint}");
            }
            if passed < TEST_CHECKLIST_LEN {
                println!("\nFix issues before shipping.");
            }
        }

        Commands::Proof { ui_built, logic_working, test_passed, deployed } => {
            let mut footer = storage.proof_footer();
            if let Some(v) = ui_built {
                footer.ui_built = v;
            }
            if let Some(v) = logic_working {
                footer.logic_working = v;
            }
            if let Some(v) = test_passed {
                footer.test_passed = v;
            }
            if let Some(v) = deployed {
                footer.deployed = v;
            }
            storage.save_proof_footer(&footer)?;
            println!("UI built:      {}", footer.ui_built);
            println!("Logic working: {}", footer.logic_working);
            println!("Tests passed:  {}", footer.test_passed);
            println!("Deployed:      {}", footer.deployed);
        }

        Commands::Submit { project, repository, deployed } => {
            let mut submission = storage.submission();
            if let Some(v) = project {
                submission.project_link = v.trim().to_string();
            }
            if let Some(v) = repository {
                submission.repository_link = v.trim().to_string();
            }
            if let Some(v) = deployed {
                submission.deployed_link = v.trim().to_string();
            }
            storage.save_submission(&submission)?;
            println!("Project:    {}", or_dash(&submission.project_link));
            println!("Repository: {}", or_dash(&submission.repository_link));
            println!("Deployed:   {}", or_dash(&submission.deployed_link));
        }

        Commands::Status => {
            let completed = storage.completed_steps();
            println!("Status: {}", storage.project_status());
            println!("Steps:  {completed} / {}", STEPS.len());
            for (i, step) in STEPS.iter().enumerate() {
                let mark = if i < completed { "x" } else { " " };
                println!("  [{mark}] Step {}: {step}", i + 1);
            }
        }

        Commands::Browse => {
            tui::run_browse(&storage)?;
        }
    }

    Ok(())
}

/// Looks up an entry by full id or unique prefix; `None` means the current analysis.
fn resolve_entry<S: storage::KvStore>(storage: &Storage<S>, id: Option<&str>) -> Result<AnalysisEntry> {
    let id = match id {
        Some(id) => id.to_string(),
        None => storage
            .current_analysis_id()
            .ok_or_else(|| anyhow!("No current analysis. Run 'prep analyze' or 'prep use <id>'."))?,
    };

    if let Some(entry) = storage.entry_by_id(&id) {
        return Ok(entry);
    }

    let mut matches: Vec<AnalysisEntry> = storage
        .history()
        .into_iter()
        .filter(|e| e.id.starts_with(&id))
        .collect();
    debug!(prefix = %id, matches = matches.len(), "resolving analysis prefix");
    match matches.len() {
        0 => Err(anyhow!("Analysis '{}' not found", id)),
        1 => Ok(matches.remove(0)),
        n => Err(anyhow!("Prefix '{}' matches {} analyses; use more characters", id, n)),
    }
}

fn print_entry(entry: &AnalysisEntry) {
    println!();
    match (entry.company.is_empty(), entry.role.is_empty()) {
        (false, false) => println!("{} - {}", entry.company, entry.role),
        (false, true) => println!("{}", entry.company),
        (true, false) => println!("{}", entry.role),
        (true, true) => {}
    }
    println!("Readiness: {}/100 (base {})", entry.final_score, entry.base_score);
    println!("Created:   {}", entry.created_at.format("%Y-%m-%d %H:%M"));

    println!("\nSkills:");
    for category in SkillCategory::ALL {
        let skills = entry.extracted_skills.get(category);
        if skills.is_empty() {
            continue;
        }
        let rendered: Vec<String> = skills
            .iter()
            .map(|s| match entry.confidence(s) {
                Some(Confidence::Know) => format!("{s} (know)"),
                _ => s.clone(),
            })
            .collect();
        println!("  {:<15} {}", category.label(), rendered.join(", "));
    }

    if let Some(info) = &entry.company_info {
        println!("\nCompany: {} ({}, {})", info.name, info.size_category, info.industry);
        for line in textwrap::fill(&info.hiring_focus, 72).lines() {
            println!("  {line}");
        }
    }

    println!("\nRounds:");
    for round in &entry.round_mapping {
        println!("  {}", round.round_title);
        println!("    Focus: {}", round.focus_areas.join(", "));
        for line in textwrap::fill(&round.why_it_matters, 68).lines() {
            println!("    {line}");
        }
    }

    let weak = entry.weak_skills(3);
    if !weak.is_empty() {
        println!("\nAction next:");
        for skill in weak {
            println!("  -> {skill}");
        }
        println!("  Start Day 1 plan now.");
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
