//! Diff digest use case.
//!
//! Turns a unified diff into a narrative report: the diff itself, the
//! current contents of every changed file and the commit message go into
//! one prompt, and the answer is written to a timestamped digest file.

use crate::prompts::{ChangedFile, PromptRenderer};
use chrono::Local;
use devlog_core::error::{DevlogError, Result};
use devlog_core::generator::TextGenerator;
use devlog_core::report::ReportRepository;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

/// Stamp format of digest file names.
pub const DIGEST_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

static DIFF_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*diff --git a/(\S+)").expect("diff header pattern is valid")
});

/// Paths named by `diff --git a/<path>` headers, in order, without repeats.
pub fn changed_files(diff: &str) -> Vec<String> {
    let mut files: Vec<String> = Vec::new();
    for caps in DIFF_FILE_REGEX.captures_iter(diff) {
        let path = &caps[1];
        if !files.iter().any(|seen| seen == path) {
            files.push(path.to_string());
        }
    }
    files
}

/// Whether a diff path stays inside the project root.
fn is_project_relative(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[derive(Debug, Clone)]
pub struct DigestOutcome {
    /// Where the digest was written.
    pub location: String,
    pub included: Vec<String>,
    /// Changed paths that were not read: deleted, renamed away, or
    /// pointing outside the project.
    pub skipped: Vec<String>,
    pub text: String,
}

pub struct DiffDigestUseCase {
    project_root: PathBuf,
    reports: Arc<dyn ReportRepository>,
    generator: Arc<dyn TextGenerator>,
    prompts: PromptRenderer,
}

impl DiffDigestUseCase {
    pub fn new(
        project_root: impl Into<PathBuf>,
        reports: Arc<dyn ReportRepository>,
        generator: Arc<dyn TextGenerator>,
        prompts: PromptRenderer,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            reports,
            generator,
            prompts,
        }
    }

    pub async fn digest(&self, commit_message: &str, diff: &str) -> Result<DigestOutcome> {
        let paths = changed_files(diff);
        if paths.is_empty() {
            warn!("Diff names no changed files");
        }

        let mut files = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();
        for path in paths {
            if !is_project_relative(&path) {
                warn!(path = %path, "Changed path leaves the project root, skipping");
                skipped.push(path);
                continue;
            }
            match tokio::fs::read_to_string(self.project_root.join(&path)).await {
                Ok(content) => files.push(ChangedFile { path, content }),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!(path = %path, "Changed file no longer exists, skipping");
                    skipped.push(path);
                }
                Err(e) => {
                    return Err(DevlogError::io(format!("failed to read {path}: {e}")));
                }
            }
        }

        let prompt = self.prompts.digest(diff, &files, commit_message)?;
        debug!(files = files.len(), prompt_chars = prompt.len(), "Requesting diff digest");
        let text = self.generator.generate(&prompt).await?;

        let stamp = Local::now().format(DIGEST_STAMP_FORMAT).to_string();
        let location = self.reports.write_digest(&stamp, &text).await?;
        info!(location = %location, "Digest written");

        Ok(DigestOutcome {
            location,
            included: files.into_iter().map(|file| file.path).collect(),
            skipped,
            text,
        })
    }
}
