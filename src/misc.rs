use colored::*;
use log::kv::Key;
use log::{Level, LevelFilter, Metadata, Record};
use std::collections::HashSet;
use std::sync::Mutex;

/// Facing of the character, one per cell of the character sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
    #[default]
    Down,
    DownLeft,
    Left,
}

pub struct Logger {
    pub level: LevelFilter,
    pub once_only_logs: Mutex<HashSet<String>>,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level, once_only_logs: Mutex::new(HashSet::new()) }
    }

    pub fn install(self) -> anyhow::Result<()> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Records tagged `once = true` pass the first time their message is seen
    fn first_time(&self, record: &Record) -> bool {
        if let Some(true) = record.key_values().get(Key::from("once")).and_then(|v| v.to_bool()) {
            // A poisoned set only means another thread panicked mid-insert
            let mut onces = match self.once_only_logs.lock() {
                Ok(onces) => onces,
                Err(poisoned) => poisoned.into_inner(),
            };
            return onces.insert(record.args().to_string());
        }
        true
    }
}

impl log::Log for Logger {
    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) || !self.first_time(record) {
            return;
        }

        let colored_level = match record.level() {
            x @ Level::Error => x.as_str().red(),
            x @ Level::Warn => x.as_str().yellow(),
            x @ (Level::Debug | Level::Trace) => x.as_str().dimmed(),
            x => x.as_str().normal(),
        };

        println!("[{}] {}", colored_level, record.args());
    }

    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn flush(&self) {}
}
