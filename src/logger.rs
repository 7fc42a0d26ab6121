// stdout belongs to the game screen, so log lines go to an append-only file
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    prefix: Option<String>,
    sink: Option<Mutex<File>>,
}

impl Logger {
    fn new(prefix: Option<String>, sink: Option<File>) -> Self {
        Self {
            prefix,
            sink: sink.map(Mutex::new),
        }
    }

    pub fn format_line(&self, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}] {}", timestamp, prefix, message)
        } else {
            format!("[{}] {}", timestamp, message)
        }
    }

    pub fn log(&self, message: &str) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let line = self.format_line(message);
        if let Ok(mut file) = sink.lock() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

fn open_sink(path: &str) -> Result<File, String> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open log file {}: {}", path, e))
}

/// Installs the process-wide logger. Without a path the logger stays silent.
/// A log file that cannot be opened also leaves it silent, the error is
/// returned for the caller to report. Only the first call has an effect.
pub fn init_logger(prefix: Option<String>, path: Option<&str>) -> Result<(), String> {
    let (sink, result) = match path.map(open_sink) {
        Some(Ok(file)) => (Some(file), Ok(())),
        Some(Err(e)) => (None, Err(e)),
        None => (None, Ok(())),
    };
    LOGGER.get_or_init(|| Logger::new(prefix, sink));
    result
}

pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
