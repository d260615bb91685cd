//! JSONL activity log, one file per run.
//!
//! Credentials never reach the log: only emails, paths, statuses and
//! durations are recorded.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct ActivityLog {
    pub path: PathBuf,
    run_id: String,
    file: Option<File>,
}

/// Print a warning when an activity log write failed. Returns whether it
/// succeeded.
pub fn warn_on_error(result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: failed to write activity log: {}", e);
            false
        }
    }
}

#[derive(Serialize)]
struct Event<'a> {
    ts: DateTime<Utc>,
    run_id: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    #[serde(flatten)]
    data: serde_json::Value,
}

impl ActivityLog {
    pub fn new(path: &Path, run_id: &str) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            run_id: run_id.to_string(),
            file: Some(file),
        })
    }

    /// A log that records nothing
    pub fn disabled(run_id: &str) -> Self {
        Self {
            path: PathBuf::new(),
            run_id: run_id.to_string(),
            file: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&mut self, event_type: &str, data: serde_json::Value) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        let event = Event {
            ts: Utc::now(),
            run_id: &self.run_id,
            event_type,
            data,
        };
        let line = serde_json::to_string(&event)?;
        writeln!(file, "{}", line)?;
        file.flush()?;
        Ok(())
    }

    pub fn run_start(&mut self, api_url: &str, auth_url: &str) -> Result<()> {
        self.log(
            "run_start",
            serde_json::json!({ "api_url": api_url, "auth_url": auth_url }),
        )
    }

    /// Log a route visit and the guard's decision
    pub fn navigate(&mut self, path: &str, redirected_to: Option<&str>) -> Result<()> {
        self.log(
            "navigate",
            serde_json::json!({
                "path": path,
                "granted": redirected_to.is_none(),
                "redirect": redirected_to,
            }),
        )
    }

    pub fn request(
        &mut self,
        action: &str,
        status: Option<u16>,
        duration_ms: u64,
        error: Option<&str>,
    ) -> Result<()> {
        self.log(
            "request",
            serde_json::json!({
                "action": action,
                "ok": error.is_none(),
                "status": status,
                "duration_ms": duration_ms,
                "error": error,
            }),
        )
    }

    pub fn login(&mut self, email: &str, ok: bool, role: Option<&str>) -> Result<()> {
        self.log(
            "login",
            serde_json::json!({ "email": email, "ok": ok, "role": role }),
        )
    }

    pub fn register(&mut self, email: &str, ok: bool) -> Result<()> {
        self.log("register", serde_json::json!({ "email": email, "ok": ok }))
    }

    pub fn logout(&mut self, reason: &str) -> Result<()> {
        self.log("logout", serde_json::json!({ "reason": reason }))
    }

    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.log("warning", serde_json::json!({ "message": message }))
    }
}
