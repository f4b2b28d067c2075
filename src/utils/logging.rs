use std::sync::atomic::{AtomicBool, Ordering};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;
use once_cell::sync::Lazy;

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);
static LOG_TO_FILE: AtomicBool = AtomicBool::new(false);
static LOG_FILE: Lazy<Mutex<Option<std::fs::File>>> = Lazy::new(|| Mutex::new(None));

const DEFAULT_LOG_FILE: &str = "paynet.log";

/// Initializes logging based on environment variables:
/// - PAYNET_LOGGING: enables/disables logging (true/false)
/// - PAYNET_LOG_TO_FILE: write to a file instead of stdout (true/false, defaults to false)
/// - PAYNET_LOG_FILE: path of the log file (defaults to paynet.log)
///
/// An unrecognised PAYNET_LOGGING value leaves logging disabled and reports the value on stderr.
/// To enable logging in tests, run: PAYNET_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    match env::var("PAYNET_LOGGING").as_deref() {
        Ok("true") => {
            ENABLE_LOGGING.store(true, Ordering::SeqCst);
            if env::var("PAYNET_LOG_TO_FILE").as_deref() == Ok("true") {
                let path = env::var("PAYNET_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
                match OpenOptions::new().create(true).append(true).open(&path) {
                    Ok(file) => {
                        if let Ok(mut slot) = LOG_FILE.lock() {
                            *slot = Some(file);
                            LOG_TO_FILE.store(true, Ordering::SeqCst);
                        }
                    }
                    // fall back to stdout
                    Err(e) => eprintln!("Failed to open log file {}: {}", path, e),
                }
            }
        }
        Ok("false") | Err(_) => ENABLE_LOGGING.store(false, Ordering::SeqCst),
        Ok(other) => {
            eprintln!("PAYNET_LOGGING must be 'true' or 'false', got '{}'; logging stays disabled", other);
            ENABLE_LOGGING.store(false, Ordering::SeqCst);
        }
    }
}

/// Returns whether `log` currently emits anything.
pub fn is_enabled() -> bool {
    ENABLE_LOGGING.load(Ordering::SeqCst)
}

pub fn log(prefix: &str, message: &str) {
    if !ENABLE_LOGGING.load(Ordering::SeqCst) {
        return;
    }
    let log_message = format!("  [{}]   {}\n", prefix, message);

    if LOG_TO_FILE.load(Ordering::SeqCst) {
        if let Ok(mut slot) = LOG_FILE.lock() {
            if let Some(file) = slot.as_mut() {
                if let Err(e) = file.write_all(log_message.as_bytes()) {
                    eprintln!("Failed to write to log file: {}", e);
                }
                if let Err(e) = file.flush() {
                    eprintln!("Failed to flush log file: {}", e);
                }
            }
        }
    } else {
        print!("{}", log_message);
    }
}
