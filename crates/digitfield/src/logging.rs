//! Log setup.
//!
//! The terminal belongs to the UI, so logs are written to a file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DIGITFIELD_LOG";

/// Default log file location in the platform cache directory.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "digitfield").map(|dirs| dirs.cache_dir().join("digitfield.log"))
}

/// Install the logger writing to `path`, or to the default location.
///
/// Logging stays disabled if no file can be opened.
pub fn init(path: Option<&Path>) {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_path) else {
        return;
    };
    let Some(file) = open_log_file(&path) else {
        return;
    };

    let _ = Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::options().create(true).append(true).open(path).ok()
}
