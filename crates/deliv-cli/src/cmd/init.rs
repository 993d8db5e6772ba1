use crate::output::print_json;
use anyhow::Context;
use deliv_core::{config::Config, paths, DeliverableRepository, DeliverableStatus, FileRepository};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    if !json {
        println!("Initializing deliverable tracking in: {}", root.display());
    }

    let deliv_dir = paths::deliv_dir(root);
    std::fs::create_dir_all(&deliv_dir)
        .with_context(|| format!("failed to create {}", deliv_dir.display()))?;

    let config_created = if paths::config_path(root).exists() {
        false
    } else {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        true
    };
    report(json, config_created, paths::CONFIG_FILE);

    let config = Config::load(root).context("failed to load config")?;
    let repo = FileRepository::new(config.status_path(root));
    let status_created = if repo.exists()? {
        false
    } else {
        repo.save(&DeliverableStatus::new())
            .context("failed to write status file")?;
        true
    };
    report(json, status_created, &config.status_file);

    if json {
        print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config_created": config_created,
            "status_created": status_created,
            "status_file": repo.path().display().to_string(),
        }))?;
    }
    Ok(())
}

fn report(json: bool, created: bool, path: &str) {
    if json {
        return;
    }
    if created {
        println!("  created: {path}");
    } else {
        println!("  exists:  {path}");
    }
}
