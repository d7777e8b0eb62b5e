//! Logging setup and the shared in-memory event log.

use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::LoggingConfig;

/// Entries the in-memory event feed holds before the oldest fall off.
pub const EVENT_LOG_CAP: usize = 200;

/// Initialize the `log` facade with a fern dispatcher.
///
/// When file logging is enabled the dispatcher writes to
/// `<state_dir>/blockkit/blockkit.log`; otherwise only `warn` and above
/// go to stderr so an embedding host stays quiet.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let base = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "[{}] [{}] {}: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            message
        ))
    });

    let dispatch = if config.enabled {
        let log_dir = dirs::state_dir()
            .or_else(dirs::cache_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine state directory"))?
            .join("blockkit");
        std::fs::create_dir_all(&log_dir)?;

        base.level(log::LevelFilter::Debug)
            .chain(fern::log_file(log_dir.join("blockkit.log"))?)
    } else {
        base.level(log::LevelFilter::Warn).chain(std::io::stderr())
    };

    dispatch.apply()?;
    Ok(())
}

/// Bounded event feed a host debug panel can render.
///
/// The view model appends one line per fetch outcome; clones share the
/// same buffer, and entries past [`EVENT_LOG_CAP`] push the oldest out.
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a timestamped entry.
    pub fn log(&self, message: String) {
        let line = format!("[{}] {}", Utc::now().format("%H:%M:%S%.3f"), message);
        if let Ok(mut entries) = self.entries.lock() {
            entries.push_back(line);
            while entries.len() > EVENT_LOG_CAP {
                entries.pop_front();
            }
        }
    }

    /// Entries newest first, ready for a top-down panel.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        if let Ok(entries) = self.entries.lock() {
            entries.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Drop all entries.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}
