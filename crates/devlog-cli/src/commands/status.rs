use crate::bootstrap::App;
use anyhow::{Context, Result};
use colored::Colorize;

pub async fn run(app: &App) -> Result<()> {
    let status = app
        .reader()
        .status()
        .await
        .context("Failed to read the session ledger")?;

    let state = status.state;
    if state.is_open() {
        println!("{}", format!("Session {} is open", state.last_session).yellow());
        if !status.report_exists {
            println!(
                "{}",
                format!(
                    "Report {} is missing; `devlog end` will fail until it is restored",
                    app.paths.report_file(state.last_session).display()
                )
                .red()
            );
        }
    } else if state.last_session == 0 {
        println!("No sessions yet; `devlog start` opens session 1");
    } else {
        match state.next_session() {
            Ok(next) => println!(
                "{}",
                format!("Session {} ended; next is {}", state.last_session, next).green()
            ),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
    println!("Ledger: {}", app.paths.ledger_file().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_status_needs_no_credential() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("reports")).unwrap();
        fs::write(temp_dir.path().join("reports/session_number"), "1 end\n2").unwrap();
        let app = App::load(temp_dir.path(), None).unwrap();

        run(&app).await.unwrap();

        let status = app.reader().status().await.unwrap();
        assert!(status.state.is_open());
        assert_eq!(status.state.last_session, 2);
        assert!(!status.report_exists);
    }
}
