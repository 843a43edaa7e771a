use crate::bootstrap::App;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

pub async fn run(app: &App, message: &str, diff_file: &Path) -> Result<()> {
    let diff_path = app.paths.root().join(diff_file);
    let diff = tokio::fs::read_to_string(&diff_path)
        .await
        .with_context(|| format!("Failed to read diff file {}", diff_path.display()))?;

    let usecase = app.diff_digest(app.generator().await?)?;
    let outcome = usecase
        .digest(message, &diff)
        .await
        .context("Failed to write the diff digest")?;

    for path in &outcome.skipped {
        println!("{}", format!("Skipped {path} (no longer exists)").yellow());
    }
    println!(
        "{}",
        format!(
            "Digest of {} file(s) written to {}",
            outcome.included.len(),
            outcome.location
        )
        .green()
    );
    Ok(())
}
