// Debug logging module for per-step game state logging
//
// When enabled, each step appends one JSONL line describing a traced
// instance. Writes are synchronous and serialized behind a mutex; workers
// never log, only the facade thread does, so contention is not a concern.

use log::error;
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Arc;

use crate::buffer::InfoRecord;
use crate::game::GameSnapshot;

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry<'a> {
    env: usize,
    info: &'a InfoRecord,
    state: &'a GameSnapshot,
    timestamp: String,
}

/// Shared debug logger state
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new().create(true).write(true).truncate(true).open(log_file_path) {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger { file: Arc::new(Mutex::new(Some(file))), enabled: true }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { file: Arc::new(Mutex::new(None)), enabled: false }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Appends one step of a traced instance to the JSONL file
    pub fn log_step(&self, env: usize, info: &InfoRecord, state: &GameSnapshot) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry {
            env,
            info,
            state,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let mut guard = self.file.lock();
        if let Some(file) = guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    if let Err(e) = writeln!(file, "{}", json_line) {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush() {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
