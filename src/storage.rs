//! Typed persistence over any key-value document store.
//!
//! Reads never fail: missing or malformed documents come back as the
//! documented default and the problem is logged. Writes propagate errors.

use serde::de::DeserializeOwned;
use serde::Serialize;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use tracing::warn;

use crate::analysis::{run_analysis, validate_jd};
use crate::errors::Result;
use crate::models::{AnalysisEntry, Confidence, ProjectStatus, ProofFooter, Submission};

pub const HISTORY_KEY: &str = "prp_history";
pub const CURRENT_KEY: &str = "prp_current_analysis_id";
pub const CHECKLIST_KEY: &str = "prp_test_checklist";
pub const PROOF_FOOTER_KEY: &str = "prp_proof_footer";
pub const SUBMISSION_KEY: &str = "prp_final_submission";

pub const TEST_CHECKLIST_LEN: usize = 10;

/// Shipping checklist: (label, how to verify).
pub const TEST_CHECKLIST: [(&str, &str); TEST_CHECKLIST_LEN] = [
    ("JD required validation works", "Try submitting with an empty JD."),
    ("Short JD warning shows for <200 chars", "Analyze less than 200 characters of text."),
    ("Skills extraction groups correctly", "Use a JD mentioning React, Python, SQL and check the groups."),
    ("Round mapping changes based on company + skills", "Try 'Google' vs an unknown startup name."),
    ("Score calculation is deterministic", "Analyze the same JD twice; scores should match."),
    ("Skill toggles update score live", "Toggle skills and watch the score change."),
    ("Changes persist after refresh", "Toggle skills, restart, reopen from history."),
    ("History saves and loads correctly", "Analyze multiple JDs, check history."),
    ("Export buttons copy the correct content", "Export each section and compare."),
    ("No console errors on core pages", "Run every command once and watch stderr."),
];

pub const STEPS: [&str; 8] = [
    "Design System",
    "Landing Page",
    "Dashboard",
    "Analysis Engine",
    "Interactive Results",
    "Company Intel",
    "Test Checklist",
    "Ship",
];

/// Minimal get/set-by-key capability the core depends on.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct Storage<S: KvStore> {
    kv: S,
}

impl<S: KvStore> Storage<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.kv.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "store read failed, using default");
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "malformed stored document, using default");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(key, &raw)
    }

    // --- History ---

    /// Stored analyses, newest first. Unreadable elements are skipped.
    pub fn history(&self) -> Vec<AnalysisEntry> {
        let Some(items) = self.read_json::<Vec<serde_json::Value>>(HISTORY_KEY) else {
            return Vec::new();
        };
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<AnalysisEntry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping malformed history entry");
                    None
                }
            })
            .collect()
    }

    /// Replaces the entry with the same id in place, or prepends a new one.
    pub fn save_to_history(&self, entry: &AnalysisEntry) -> Result<()> {
        let mut history = self.history();
        match history.iter_mut().find(|h| h.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => history.insert(0, entry.clone()),
        }
        self.write_json(HISTORY_KEY, &history)
    }

    /// Validates, analyzes, saves, and makes the new entry current. A rejected
    /// JD leaves history and the current pointer untouched.
    pub fn submit_analysis(
        &self,
        company: &str,
        role: &str,
        jd_text: &str,
    ) -> Result<(AnalysisEntry, Option<&'static str>)> {
        let warning = validate_jd(jd_text)?;
        let entry = run_analysis(company.trim(), role.trim(), jd_text.trim());
        self.save_to_history(&entry)?;
        self.set_current_analysis_id(&entry.id)?;
        Ok((entry, warning))
    }

    pub fn entry_by_id(&self, id: &str) -> Option<AnalysisEntry> {
        self.history().into_iter().find(|h| h.id == id)
    }

    pub fn set_current_analysis_id(&self, id: &str) -> Result<()> {
        self.kv.set(CURRENT_KEY, id)
    }

    pub fn current_analysis_id(&self) -> Option<String> {
        self.read_raw(CURRENT_KEY).filter(|id| !id.is_empty())
    }

    // --- Test checklist ---

    /// Exactly ten flags; anything else stored is replaced by all-false.
    pub fn test_checklist(&self) -> Vec<bool> {
        match self.read_json::<Vec<bool>>(CHECKLIST_KEY) {
            Some(flags) if flags.len() == TEST_CHECKLIST_LEN => flags,
            Some(flags) => {
                warn!(len = flags.len(), "test checklist has wrong length, resetting");
                vec![false; TEST_CHECKLIST_LEN]
            }
            None => vec![false; TEST_CHECKLIST_LEN],
        }
    }

    pub fn save_test_checklist(&self, flags: &[bool]) -> Result<()> {
        self.write_json(CHECKLIST_KEY, flags)
    }

    // --- Proof footer and submission ---

    pub fn proof_footer(&self) -> ProofFooter {
        self.read_json(PROOF_FOOTER_KEY).unwrap_or_default()
    }

    pub fn save_proof_footer(&self, footer: &ProofFooter) -> Result<()> {
        self.write_json(PROOF_FOOTER_KEY, footer)
    }

    pub fn submission(&self) -> Submission {
        self.read_json(SUBMISSION_KEY).unwrap_or_default()
    }

    pub fn save_submission(&self, submission: &Submission) -> Result<()> {
        self.write_json(SUBMISSION_KEY, submission)
    }

    // --- Derived status ---

    pub fn project_status(&self) -> ProjectStatus {
        if self.history().is_empty() {
            return ProjectStatus::NotStarted;
        }
        let checklist_done = self.test_checklist().iter().all(|b| *b);
        if checklist_done && self.submission().is_complete() && self.proof_footer().all_set() {
            ProjectStatus::Shipped
        } else {
            ProjectStatus::InProgress
        }
    }

    /// How many of `STEPS` are complete. The first three are always done.
    pub fn completed_steps(&self) -> usize {
        let history = self.history();
        let mut steps = 3;
        if !history.is_empty() {
            steps += 1;
        }
        if history
            .iter()
            .any(|e| e.skill_confidence_map.values().any(|c| *c == Confidence::Know))
        {
            steps += 1;
        }
        if history.iter().any(|e| !e.company.trim().is_empty()) {
            steps += 1;
        }
        if self.test_checklist().iter().all(|b| *b) {
            steps += 1;
        }
        if self.project_status() == ProjectStatus::Shipped {
            steps += 1;
        }
        steps
    }
}
