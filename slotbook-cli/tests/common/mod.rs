//! Common test utilities for CLI integration tests.
//!
//! Each `TestEnv` owns a temporary directory with its own data directory,
//! and every command it builds runs from that directory with the
//! `SLOTBOOK_*` environment cleared.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads.
const SLOTBOOK_ENV: &[&str] = &[
    "SLOTBOOK_DATA_DIR",
    "SLOTBOOK_BUSY_TIMEOUT",
    "SLOTBOOK_DISABLE_AUTOINIT",
    "SLOTBOOK_ROLE",
    "SLOTBOOK_LOG_MODE",
    "SLOTBOOK_BUSINESS_HOURS_START",
    "SLOTBOOK_BUSINESS_HOURS_END",
    "SLOTBOOK_DEFAULT_PAGE_SIZE",
    "SLOTBOOK_MAX_PAGE_SIZE",
    "SLOTBOOK_ATOMIC_REQUESTER",
    "SLOTBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "SLOTBOOK_OUTPUT_FORMAT",
];

/// A slot far enough ahead to never be in the past.
pub const SLOT: &str = "2030-01-07T10:00";

/// Test environment with an isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the slotbook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("slotbook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The slotbook binary with a clean environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("slotbook").expect("Failed to find slotbook binary");
        for var in SLOTBOOK_ENV {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// The slotbook binary pointed at this environment's data directory.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Like `command`, acting as a manager.
    pub fn manager(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("--role").arg("manager");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Initialize the data directory.
    pub fn init(&self) {
        self.command().arg("init").assert().success();
    }

    /// Book for one person and return the booking id and resource label.
    ///
    /// # Panics
    /// Panics if the booking is rejected.
    pub fn book_person(&self, room_type: &str, slot: &str, name: &str, age: i64) -> (i64, String) {
        let output = self
            .manager()
            .args(["book", "--room-type", room_type, "--slot", slot, "--name", name])
            .arg("--age")
            .arg(age.to_string())
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        parse_receipt(&String::from_utf8(output.stdout).expect("Invalid UTF-8 in output"))
    }

    /// Run `bookings --format json` as a manager and parse the result.
    pub fn bookings_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .manager()
            .args(["bookings", "--format", "json"])
            .output()
            .expect("Failed to run bookings command");

        assert!(
            output.status.success(),
            "Bookings failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("bookings output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Split the `ID<TAB>LABEL` line printed by `book`.
#[allow(dead_code)]
pub fn parse_receipt(output: &str) -> (i64, String) {
    let line = output.trim();
    let (id, label) = line
        .split_once('\t')
        .unwrap_or_else(|| panic!("unexpected book output: {line:?}"));
    (id.parse().expect("booking id is not a number"), label.to_string())
}
