use std::fs::File;
use std::io::{Result as IoResult, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::{cell::RefCell, fmt::Display};

static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();
thread_local! {
    static LOG_PREFIX: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn current_prefix() -> Option<String> {
    LOG_PREFIX.with(|prefix| prefix.borrow().clone())
}

fn format_with_prefix(message: impl Display) -> String {
    current_prefix().map_or_else(|| message.to_string(), |p| format!("{p}: {message}"))
}

/// Mirrors record diagnostics into `path` in addition to stderr.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn set_log_file(path: &Path) -> IoResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    // First writer wins.
    let _ = LOG_FILE.set(Mutex::new(file));
    Ok(())
}

/// Sets a thread-local prefix for subsequent messages on this thread.
/// The previous prefix comes back when the guard drops.
pub fn set_log_prefix(prefix: impl Into<String>) -> LogPrefixGuard {
    let previous = LOG_PREFIX.with(|slot| slot.borrow_mut().replace(prefix.into()));
    LogPrefixGuard { previous }
}

#[must_use = "the prefix is cleared as soon as the guard is dropped"]
pub struct LogPrefixGuard {
    previous: Option<String>,
}

impl Drop for LogPrefixGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        LOG_PREFIX.with(|slot| {
            *slot.borrow_mut() = previous;
        });
    }
}

pub fn log_warn(message: &str) {
    let message = format_with_prefix(message);
    eprintln!("warning: {message}");
    if let Some(writer) = LOG_FILE.get()
        && let Ok(mut file) = writer.lock()
    {
        let _ = writeln!(file, "warning: {message}");
    }
}
