use crate::bootstrap::{App, config_path};
use anyhow::{Context, Result};
use colored::Colorize;
use devlog_infrastructure::ConfigService;
use std::path::Path;

pub fn run(root: &Path, config: Option<&Path>) -> Result<()> {
    let service = ConfigService::new(config_path(root, config));
    let written = service
        .init()
        .with_context(|| format!("Failed to write {}", service.path().display()))?;

    if written {
        println!("{}", format!("Wrote {}", service.path().display()).green());
    } else {
        println!("{} already exists, left untouched", service.path().display());
    }

    let app = App::load(root, config)?;
    let reports_dir = app.paths.reports_dir();
    std::fs::create_dir_all(reports_dir)
        .with_context(|| format!("Failed to create {}", reports_dir.display()))?;
    println!("Reports go to {}", reports_dir.display());
    Ok(())
}
