use crate::bootstrap::App;
use anyhow::{Context, Result};
use colored::Colorize;

pub async fn run(app: &App, message: &str) -> Result<()> {
    app.reader()
        .check_start()
        .await
        .context("Cannot start a journaling session")?;

    let journal = app.journal(app.generator().await?)?;
    let started = journal
        .start(message)
        .await
        .context("Failed to start a journaling session")?;

    println!(
        "{}",
        format!(
            "Starting Journaling Session {} at: {}",
            started.session,
            started.started_at.format(devlog_core::report::TIMESTAMP_FORMAT)
        )
        .green()
    );
    println!("{}", started.introduction.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use devlog_core::error::DevlogError;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_session_is_refused_before_credentials() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("reports")).unwrap();
        fs::write(temp_dir.path().join("reports/session_number"), "1").unwrap();
        let app = App::load(temp_dir.path(), None).unwrap();

        let err = run(&app, "again").await.unwrap_err();

        let cause = err.downcast_ref::<DevlogError>().unwrap();
        assert!(cause.is_protocol(), "unexpected error: {err:#}");
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("reports/session_number")).unwrap(),
            "1"
        );
    }
}
