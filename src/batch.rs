//! Directory processing.
//!
//! Files are collected with walkdir, filtered by supported extension and the
//! configured exclusions, then rendered in parallel. Results come back sorted
//! by path so output is stable across runs.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::ProcessError;
use crate::service::{render_content, ContentMode, RenderedContent};
use crate::source::FileKind;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", "vendor", "target", "__pycache__"];

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: ProcessError,
}

/// Everything produced by one batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<RenderedContent>,
    pub failures: Vec<FileFailure>,
}

impl BatchOutcome {
    pub fn processed(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Collect supported files under `root`.
pub fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if !config.include_hidden && name.starts_with('.') {
                return false;
            }
            if e.file_type().is_dir() && SKIPPED_DIRS.contains(&name.as_ref()) {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if FileKind::from_path(path).is_err() {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.is_path_excluded(relative) || config.is_path_excluded(path) {
            debug!(path = %path.display(), "excluded by config");
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Render every file in parallel.
pub fn run_batch(files: &[PathBuf], mode: ContentMode, show_progress: bool) -> BatchOutcome {
    let progress = if show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let rendered: Vec<(PathBuf, Result<RenderedContent, ProcessError>)> = files
        .par_iter()
        .map(|path| {
            let result = render_content(path, mode);
            progress.set_message(path.display().to_string());
            progress.inc(1);
            (path.clone(), result)
        })
        .collect();
    progress.finish_and_clear();

    let mut outcome = BatchOutcome::default();
    for (path, result) in rendered {
        match result {
            Ok(content) => outcome.results.push(content),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "failed to process file");
                outcome.failures.push(FileFailure { path, error });
            }
        }
    }
    outcome
}
