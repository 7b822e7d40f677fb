//! File logging. The terminal belongs to the UI, so records only go to disk.

use std::fs::{self, OpenOptions};
use std::path::Path;

use color_eyre::{Result, eyre::WrapErr};
use env_logger::{Builder, Env, Target};

/// Send `log` records to `path`, filtered by `RUST_LOG` (default `info`).
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .wrap_err("logger already initialised")
}
