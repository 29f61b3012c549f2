use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use flexi_logger::writers::LogWriter;

const MAX_LINES: usize = 500;

pub struct ArcStringLog {
    log: Arc<StringLog>,
}

impl ArcStringLog {
    pub fn new(log: Arc<StringLog>) -> Self {
        Self { log }
    }
}

/// Bounded in-memory log shown in the app's log panel.
pub struct StringLog {
    logs: Mutex<VecDeque<String>>,
}

impl StringLog {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push(&self, line: String) {
        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == MAX_LINES {
                logs.pop_front();
            }
            logs.push_back(line);
        }
    }

    pub fn for_each<F>(&self, func: F)
    where
        F: FnMut(&String),
    {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().for_each(func);
        }
    }

    pub fn len(&self) -> usize {
        self.logs.lock().map(|logs| logs.len()).unwrap_or(0)
    }
}

impl LogWriter for ArcStringLog {
    fn write(
        &self,
        now: &mut flexi_logger::DeferredNow,
        record: &log::Record,
    ) -> std::io::Result<()> {
        let line = format!(
            "[{}] {} - {}",
            record.level().as_str().to_uppercase(),
            now.format("%Y-%m-%d %H:%M:%S"),
            record.args()
        );
        if record.level() == log::Level::Error {
            eprintln!("{}", line);
        }
        self.log.push(line);
        Ok(())
    }

    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexi_logger::DeferredNow;

    #[test]
    fn test_writer_formats_level_and_message() {
        let log = Arc::new(StringLog::new());
        let writer = ArcStringLog::new(Arc::clone(&log));

        writer
            .write(
                &mut DeferredNow::new(),
                &log::Record::builder()
                    .args(format_args!("loaded cat.png"))
                    .level(log::Level::Warn)
                    .build(),
            )
            .unwrap();

        let mut lines = Vec::new();
        log.for_each(|line| lines.push(line.clone()));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[WARN]"));
        assert!(lines[0].ends_with("- loaded cat.png"));
    }

    #[test]
    fn test_oldest_lines_are_dropped() {
        let log = StringLog::new();

        for i in 0..MAX_LINES + 10 {
            log.push(format!("line {i}"));
        }

        let mut first = None;
        log.for_each(|line| {
            first.get_or_insert_with(|| line.clone());
        });
        assert_eq!(log.len(), MAX_LINES);
        assert_eq!(first.as_deref(), Some("line 10"));
    }
}
