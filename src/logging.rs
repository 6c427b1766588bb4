use crate::config::{Config, DebugLogRotation};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "atlas-debug.log";
const SESSION_MARKER: &str = ".session-";
const DEFAULT_KEEP_DAILY: usize = 7;
const DEFAULT_KEEP_SESSIONS: usize = 20;

/// Keeps the background log writer alive; logs are flushed when dropped.
#[allow(dead_code)]
pub struct LogGuard(WorkerGuard);

/// Initialize debug logging.
///
/// The terminal belongs to the result browser, so logs only ever go to a file.
/// Nothing is set up unless `debug` is enabled.
pub fn init(config: &Config, config_path: &Path) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let plan = LogPlan::from_config(config, config_path)?;
    let (writer, guard, log_file) = plan.open()?;

    // ATLAS_LOG overrides; default is debug for this crate, warn for everything else.
    let filter = EnvFilter::try_from_env("ATLAS_LOG")
        .or_else(|_| EnvFilter::try_new("atlas=debug,warn"))
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // Already initialized (e.g. in tests) is fine.

    tracing::info!(
        log_file = %log_file.display(),
        rotation = ?plan.rotation,
        keep = plan.keep,
        "debug logging enabled"
    );

    Ok(Some(LogGuard(guard)))
}

/// Where the debug log lives and how many old files survive
#[derive(Debug, Clone, PartialEq)]
struct LogPlan {
    dir: PathBuf,
    file_name: String,
    rotation: DebugLogRotation,
    /// 0 keeps everything
    keep: usize,
}

impl LogPlan {
    fn from_config(config: &Config, config_path: &Path) -> Result<Self> {
        let target = log_target(config.debug_log_path.as_deref(), config_path);
        let file_name = target
            .file_name()
            .and_then(|name| name.to_str())
            .context("Invalid debug_log_path: not valid UTF-8")?
            .to_string();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let rotation = config.debug_log_rotation.unwrap_or(DebugLogRotation::Session);
        let keep = config.debug_log_keep.unwrap_or(match rotation {
            DebugLogRotation::Daily => DEFAULT_KEEP_DAILY,
            DebugLogRotation::Session => DEFAULT_KEEP_SESSIONS,
            DebugLogRotation::None => 0,
        });

        Ok(Self {
            dir,
            file_name,
            rotation,
            keep,
        })
    }

    /// Create the directory and the writer; returns the file being written
    fn open(&self) -> Result<(NonBlocking, WorkerGuard, PathBuf)> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create log directory: {}", self.dir.display()))?;

        match self.rotation {
            DebugLogRotation::None => {
                let path = self.dir.join(&self.file_name);
                let (writer, guard) = append_to(&path)?;
                Ok((writer, guard, path))
            }
            DebugLogRotation::Daily => {
                let mut builder = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(&self.file_name);
                if self.keep > 0 {
                    builder = builder.max_log_files(self.keep);
                }
                let appender = builder
                    .build(&self.dir)
                    .context("Failed to create daily log appender")?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                Ok((writer, guard, self.dir.join(&self.file_name)))
            }
            DebugLogRotation::Session => {
                // Make room for the file about to be created.
                self.prune_sessions(self.keep.saturating_sub(1))?;

                let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
                let path = self
                    .dir
                    .join(format!("{}{SESSION_MARKER}{stamp}", self.file_name));
                let (writer, guard) = append_to(&path)?;
                Ok((writer, guard, path))
            }
        }
    }

    /// Delete all but the newest `survivors` session logs
    fn prune_sessions(&self, survivors: usize) -> Result<()> {
        if self.keep == 0 {
            return Ok(());
        }

        let prefix = format!("{}{SESSION_MARKER}", self.file_name);
        let mut sessions: Vec<PathBuf> = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read log directory: {}", self.dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamps sort chronologically; newest first.
        sessions.sort_unstable_by(|a, b| b.cmp(a));

        for stale in sessions.iter().skip(survivors) {
            if let Err(e) = std::fs::remove_file(stale) {
                tracing::debug!(error = %e, file = %stale.display(), "failed to remove old session log");
            }
        }
        Ok(())
    }
}

fn append_to(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    Ok(tracing_appender::non_blocking(file))
}

/// The configured log file, or `atlas-debug.log` beside the config file.
///
/// A value naming a directory (existing, or ending in a separator) gets the
/// default file name inside it.
fn log_target(configured: Option<&str>, config_path: &Path) -> PathBuf {
    let Some(raw) = configured else {
        return config_path.with_file_name(LOG_FILE_NAME);
    };

    let path = home_relative(raw);
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        path.join(LOG_FILE_NAME)
    } else {
        path
    }
}

fn home_relative(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}
