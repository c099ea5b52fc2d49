use std::io::{self, Write};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

/// Logger writing timestamped records to stderr, keeping stdout free for output
struct StderrLogger {
    level: LevelFilter,
    stream: Mutex<io::Stderr>,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut stream) = self.stream.lock() {
                let _ = writeln!(
                    stream,
                    "[{}] [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut stream) = self.stream.lock() {
            let _ = stream.flush();
        }
    }
}

/// Initialize the logger at the given level
pub fn init_logger(level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let logger = StderrLogger {
        level,
        stream: Mutex::new(io::stderr()),
    };

    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;

    Ok(())
}
