//! CLI integration tests for create-task
//!
//! These tests drive the binary against a temporary vault, from `init`
//! through settings and task creation, and check what ends up in the notes.

use std::fs;

use chrono::{Local, NaiveDate};
use predicates::prelude::*;
use tempfile::TempDir;

/// A temporary vault plus an isolated global config directory
struct TestVault {
    dir: TempDir,
    config: TempDir,
}

impl TestVault {
    /// Creates and initializes a vault
    fn new() -> Self {
        let vault = Self::uninitialized();
        vault.cmd().arg("init").assert().success();
        vault
    }

    fn uninitialized() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            config: TempDir::new().unwrap(),
        }
    }

    /// Get a command instance for the create-task binary, run inside the vault
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("create-task"));
        cmd.current_dir(self.dir.path())
            .env("CREATE_TASK_CONFIG_DIR", self.config.path())
            .env_remove("CREATE_TASK_VAULT")
            .env_remove("RUST_LOG");
        cmd
    }

    fn write_note(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, content).unwrap();
    }

    fn read_note(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    /// Vault with `Inbox.md` as default note
    fn with_inbox() -> Self {
        let vault = Self::new();
        vault.write_note("Inbox.md", "");
        vault
            .cmd()
            .args(["config", "default-note", "Inbox.md"])
            .assert()
            .success();
        vault
    }
}

/// Creation dates the binary may stamp: the local date when the command
/// started, or the one after it if the run crossed midnight
struct Clock {
    start: NaiveDate,
}

impl Clock {
    fn start() -> Self {
        Self {
            start: Local::now().date_naive(),
        }
    }

    fn assert_stamped(&self, actual: &str, expected: impl Fn(&str) -> String) {
        let end = Local::now().date_naive();
        let candidates: Vec<String> = [self.start, end]
            .iter()
            .map(|day| expected(&day.format("%Y-%m-%d").to_string()))
            .collect();

        assert!(
            candidates.iter().any(|c| c == actual),
            "unexpected output {:?}, expected one of {:?}",
            actual,
            candidates
        );
    }
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let vault = TestVault::uninitialized();

    vault
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized vault"))
        .stdout(predicate::str::contains("config default-note"));

    assert!(vault.dir.path().join(".create-task").is_dir());
    assert!(vault.dir.path().join(".create-task/config.toml").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let vault = TestVault::new();
    vault.cmd().arg("init").assert().success();
}

#[test]
fn test_commands_outside_vault_fail() {
    let vault = TestVault::uninitialized();

    vault
        .cmd()
        .args(["add", "Lost task"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a create-task vault"));
}

// =============================================================================
// Task Creation Tests
// =============================================================================

#[test]
fn test_add_requires_default_note() {
    let vault = TestVault::new();

    vault
        .cmd()
        .args(["add", "Ship report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No default note configured"));
}

#[test]
fn test_add_appends_to_default_note() {
    let vault = TestVault::with_inbox();
    vault
        .cmd()
        .args(["config", "default-tag", "inbox"])
        .assert()
        .success();

    let clock = Clock::start();
    vault
        .cmd()
        .args(["add", "Ship report", "--tags", "work", "--due", "2030-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task created in Inbox.md"));

    clock.assert_stamped(&vault.read_note("Inbox.md"), |day| {
        format!("- [ ] #inbox #work Ship report ➕ {} @due(2030-01-15)\n", day)
    });
}

#[test]
fn test_add_defaults_due_to_today() {
    let vault = TestVault::with_inbox();

    let clock = Clock::start();
    vault.cmd().args(["add", "Water plants"]).assert().success();

    clock.assert_stamped(&vault.read_note("Inbox.md"), |day| {
        format!("- [ ] Water plants ➕ {0} @due({0})\n", day)
    });
}

#[test]
fn test_add_with_details_and_no_due() {
    let vault = TestVault::with_inbox();
    vault.write_note("Inbox.md", "# Inbox\n");

    let clock = Clock::start();
    vault
        .cmd()
        .args(["add", "Plan trip", "--no-due", "--details", "book hotel\nrent car"])
        .assert()
        .success();

    clock.assert_stamped(&vault.read_note("Inbox.md"), |day| {
        format!("# Inbox\n- [ ] Plan trip ➕ {}\n\t- book hotel\n\t- rent car\n", day)
    });
}

#[test]
fn test_add_requires_description() {
    let vault = TestVault::with_inbox();

    vault
        .cmd()
        .args(["add", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task description is required"));

    assert_eq!(vault.read_note("Inbox.md"), "");
}

#[test]
fn test_add_to_missing_note_fails() {
    let vault = TestVault::with_inbox();

    vault
        .cmd()
        .args(["add", "X", "--to", "Nowhere.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Note not found: Nowhere.md"));
}

#[test]
fn test_add_to_unknown_custom_index_fails() {
    let vault = TestVault::with_inbox();

    vault
        .cmd()
        .args(["add", "X", "--to", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Custom note #5 does not exist"));

    assert_eq!(vault.read_note("Inbox.md"), "");
}

#[test]
fn test_add_json_output() {
    let vault = TestVault::with_inbox();

    let clock = Clock::start();
    let output = vault
        .cmd()
        .args(["add", "Call Bob", "--no-due", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["path"], "Inbox.md");
    clock.assert_stamped(json["line"].as_str().unwrap(), |day| {
        format!("- [ ] Call Bob ➕ {}", day)
    });
}

#[test]
fn test_dry_run_does_not_write() {
    let vault = TestVault::with_inbox();

    vault
        .cmd()
        .args(["add", "Maybe later", "--no-due", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview (Inbox.md)"))
        .stdout(predicate::str::contains("- [ ] Maybe later"));

    assert_eq!(vault.read_note("Inbox.md"), "");
}

#[test]
fn test_preview_reports_unknown_due_date() {
    let vault = TestVault::with_inbox();

    let clock = Clock::start();
    let output = vault
        .cmd()
        .args(["preview", "X", "--due", "when pigs fly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@due").not())
        .stdout(predicate::str::contains("was not understood"));

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let line = stdout.lines().find(|l| l.starts_with("- [ ]")).unwrap();
    clock.assert_stamped(line, |day| format!("- [ ] X ➕ {}", day));
}

#[test]
fn test_preview_without_description_uses_placeholder() {
    let vault = TestVault::with_inbox();

    vault
        .cmd()
        .args(["preview", "--no-due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] My task"));
}

#[test]
fn test_custom_date_format() {
    let vault = TestVault::with_inbox();

    vault
        .cmd()
        .args(["config", "date-format", "no token here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must contain YYYY-MM-DD"));

    vault
        .cmd()
        .args(["config", "date-format", "📅 YYYY-MM-DD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    let clock = Clock::start();
    vault
        .cmd()
        .args(["add", "Pay rent", "--due", "2031-02-01"])
        .assert()
        .success();

    clock.assert_stamped(&vault.read_note("Inbox.md"), |day| {
        format!("- [ ] Pay rent ➕ {} 📅 2031-02-01\n", day)
    });
}

#[test]
fn test_hidden_details_field() {
    let vault = TestVault::with_inbox();

    vault
        .cmd()
        .args(["config", "hide-details", "true"])
        .assert()
        .success();

    vault
        .cmd()
        .args(["add", "X", "--details", "more"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("details field is hidden"));

    vault.cmd().args(["add", "X"]).assert().success();
}

#[test]
fn test_explicit_vault_flag() {
    let vault = TestVault::with_inbox();
    let elsewhere = TempDir::new().unwrap();

    vault
        .cmd()
        .current_dir(elsewhere.path())
        .arg("--vault")
        .arg(vault.dir.path())
        .args(["add", "From afar", "--no-due"])
        .assert()
        .success();

    assert!(vault.read_note("Inbox.md").contains("From afar"));
}

#[test]
fn test_global_default_vault() {
    let vault = TestVault::with_inbox();
    let elsewhere = TempDir::new().unwrap();

    vault
        .cmd()
        .arg("config")
        .arg("default-vault")
        .arg(vault.dir.path())
        .assert()
        .success();

    vault
        .cmd()
        .current_dir(elsewhere.path())
        .args(["add", "Via global config", "--no-due"])
        .assert()
        .success();

    assert!(vault.read_note("Inbox.md").contains("Via global config"));
}

// =============================================================================
// Custom Note Tests
// =============================================================================

#[test]
fn test_custom_note_tag_is_merged() {
    let vault = TestVault::with_inbox();
    vault.write_note("Projects/Work.md", "");

    vault
        .cmd()
        .args(["notes", "add", "Projects/Work.md", "Work", "--tag", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added custom note 'Work'"));

    let clock = Clock::start();
    vault
        .cmd()
        .args(["add", "Review PR", "--to", "Work", "--tags", "urgent", "--no-due"])
        .assert()
        .success();

    clock.assert_stamped(&vault.read_note("Projects/Work.md"), |day| {
        format!("- [ ] #work #urgent Review PR ➕ {}\n", day)
    });
    assert_eq!(vault.read_note("Inbox.md"), "");
}

#[test]
fn test_custom_note_must_exist() {
    let vault = TestVault::new();

    vault
        .cmd()
        .args(["notes", "add", "Missing.md", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("This file doesn't exist"));
}

#[test]
fn test_notes_list_and_remove() {
    let vault = TestVault::with_inbox();
    vault.write_note("Home.md", "");

    vault
        .cmd()
        .args(["notes", "add", "Home.md", "Home"])
        .assert()
        .success();

    let output = vault
        .cmd()
        .args(["notes", "list", "--format", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["default"]["path"], "Inbox.md");
    assert_eq!(json["custom"][0]["name"], "Home");

    vault
        .cmd()
        .args(["notes", "remove", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed custom note 'Home'"));

    vault
        .cmd()
        .args(["notes", "remove", "Home"])
        .assert()
        .failure();
}

// =============================================================================
// URL Handler Tests
// =============================================================================

#[test]
fn test_url_creates_task_directly() {
    let vault = TestVault::with_inbox();
    vault.write_note("Later.md", "");

    let clock = Clock::start();
    vault
        .cmd()
        .args([
            "url",
            "obsidian://create-task?create=true&note-path=Later.md&task-description=Read%20book&due-date=2030-05-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task created in Later.md"));

    clock.assert_stamped(&vault.read_note("Later.md"), |day| {
        format!("- [ ] Read book ➕ {} @due(2030-05-01)\n", day)
    });
}

#[test]
fn test_url_without_create_is_only_previewed() {
    let vault = TestVault::with_inbox();
    vault.write_note("Later.md", "");

    vault
        .cmd()
        .args([
            "url",
            "obsidian://create-task?note-path=Later.md&task-description=Read%20book",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not written"))
        .stdout(predicate::str::contains("Preview (Later.md)"))
        .stdout(predicate::str::contains("- [ ] Read book"));

    assert_eq!(vault.read_note("Later.md"), "");
}

#[test]
fn test_url_json_reports_whether_written() {
    let vault = TestVault::with_inbox();
    vault.write_note("Later.md", "");

    let url_json = |url: &str| -> serde_json::Value {
        let output = vault
            .cmd()
            .args(["url", url, "--format", "json"])
            .assert()
            .success();
        serde_json::from_slice(&output.get_output().stdout).unwrap()
    };

    let review = url_json("obsidian://create-task?note-path=Later.md&task-description=Read%20book");
    assert_eq!(review["written"], false);
    assert_eq!(review["path"], "Later.md");
    assert_eq!(vault.read_note("Later.md"), "");

    let created = url_json(
        "obsidian://create-task?create=true&note-path=Later.md&task-description=Read%20book",
    );
    assert_eq!(created["written"], true);
    assert_eq!(created["path"], "Later.md");
    assert!(vault.read_note("Later.md").contains("Read book"));
}

#[test]
fn test_url_with_unknown_action_fails() {
    let vault = TestVault::with_inbox();

    vault
        .cmd()
        .args(["url", "obsidian://open?file=Inbox"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported action"));
}

// =============================================================================
// Tag Tests
// =============================================================================

#[test]
fn test_tags_list_and_suggest() {
    let vault = TestVault::with_inbox();
    vault.write_note("Inbox.md", "- [ ] #work/project call\n- [ ] #personal gym\n");

    vault
        .cmd()
        .args(["tags", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#personal"))
        .stdout(predicate::str::contains("#work/project"));

    let output = vault
        .cmd()
        .args(["tags", "suggest", "urgent pro", "--format", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["tag"], "work/project");
    assert_eq!(json[0]["completed"], "urgent work/project");
}
