use crate::bootstrap::App;
use anyhow::{Context, Result};
use colored::Colorize;

pub async fn run(app: &App, message: &str) -> Result<()> {
    app.reader()
        .check_end()
        .await
        .context("Cannot end the journaling session")?;

    let journal = app.journal(app.generator().await?)?;
    let ended = journal
        .end(message)
        .await
        .context("Failed to end the journaling session")?;

    println!(
        "{}",
        format!(
            "Ending Journaling Session {} at: {}",
            ended.session,
            ended.ended_at.format(devlog_core::report::TIMESTAMP_FORMAT)
        )
        .green()
    );
    println!("{}", ended.conclusion.trim_end());
    Ok(())
}
