//! Log bridge: routes every `log::info!()` etc. to a debug log file.
//!
//! All output goes to /tmp/liftoff_debug.log on Unix/macOS, or
//! %TEMP%\liftoff_debug.log on Windows. When `RUST_LOG` is set the same
//! lines are mirrored to stderr.
//!
//! Level precedence: `--log-level` > `RUST_LOG` > config `log_level`
//! (applied after the config is loaded via [`apply_config_level`]).

use chrono::Local;
use liftoff_config::LogLevel;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

struct BridgeLogger {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl log::Log for BridgeLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<BridgeLogger> = OnceLock::new();

/// Set when the level came from the CLI or `RUST_LOG`; config must not override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/liftoff_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("liftoff_debug.log")
    }
}

fn level_from_env() -> Option<log::LevelFilter> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<log::LevelFilter>().ok())
}

/// Install the log bridge. Safe to call more than once; later calls only
/// adjust the level.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let env_level = level_from_env();
    let level = match (cli_level, env_level) {
        (Some(cli), _) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            cli.to_level_filter()
        }
        (None, Some(env)) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            env
        }
        (None, None) => LogLevel::default().to_level_filter(),
    };

    let logger = LOGGER.get_or_init(|| {
        // Silently run without a file if it can't be opened
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        BridgeLogger {
            file: Mutex::new(file),
            mirror_stderr: env_level.is_some(),
        }
    });

    // Fails only if another logger was installed first (e.g. by a test harness)
    let _ = log::set_logger(logger);
    log::set_max_level(level);
}

/// Apply the config file's log level unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LogLevel) {
    if LEVEL_PINNED.load(Ordering::Relaxed) {
        return;
    }
    log::set_max_level(level.to_level_filter());
}
