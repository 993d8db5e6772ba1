use crate::output::{print_deliverables, print_json};
use anyhow::Context;
use deliv_core::{
    config::Config, Deliverable, DeliverableService, FileRepository, ListFilter, NewDeliverable,
    OperationResult, Status, StatusChange,
};
use std::io::Read;
use std::path::Path;

fn open(root: &Path) -> anyhow::Result<(Config, DeliverableService<FileRepository>)> {
    let config = Config::load(root).context("failed to load config")?;
    let repo = FileRepository::new(config.status_path(root));
    Ok((config, DeliverableService::new(repo)))
}

/// Print the outcome and turn a rejected command into a non-zero exit.
fn finish(result: &OperationResult, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(result)?;
    } else if result.success {
        println!("{}", result.message);
    }
    if !result.success {
        anyhow::bail!("{}", result.message);
    }
    Ok(())
}

fn read_batch(file: &Path) -> anyhow::Result<Vec<NewDeliverable>> {
    let data = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?
    };
    serde_json::from_str(&data)
        .context("expected a JSON array of {id, description, acceptanceCriteria}")
}

pub fn create(
    root: &Path,
    id: Option<String>,
    description: Option<String>,
    criteria: Vec<String>,
    file: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let batch = match (file, id) {
        (Some(file), _) => read_batch(file)?,
        (None, Some(id)) => vec![NewDeliverable {
            id,
            description: description.unwrap_or_default(),
            acceptance_criteria: criteria,
        }],
        (None, None) => anyhow::bail!("either --id or --file is required"),
    };

    let (_, service) = open(root)?;
    let result = service
        .create(&batch)
        .context("failed to save deliverables")?;
    finish(&result, json)
}

pub fn set(root: &Path, id: &str, status: &str, json: bool) -> anyhow::Result<()> {
    let status: Status = status.parse()?;
    let (_, service) = open(root)?;

    let print_change = |change: &StatusChange| {
        if !json {
            println!(
                "{}: {} -> {}",
                change.deliverable_id, change.previous_status, change.new_status
            );
        }
    };
    let result = service
        .set_status(id, status, Some(&print_change))
        .context("failed to save deliverables")?;
    finish(&result, json)
}

pub fn deprecate(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (_, service) = open(root)?;
    let result = service
        .deprecate(id)
        .context("failed to save deliverables")?;
    finish(&result, json)
}

pub fn list(
    root: &Path,
    status: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let filter = ListFilter {
        status: status.map(str::parse::<Status>).transpose()?,
        verified: None,
    };
    let (config, service) = open(root)?;
    let result = service
        .list(None, filter, config.effective_limit(limit))
        .context("failed to load deliverables")?;

    if json {
        return print_json(&result);
    }

    if result.deliverables.is_empty() {
        println!("No deliverables.");
        return Ok(());
    }

    print_deliverables(&result.deliverables);
    Ok(())
}

pub fn show(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let (_, service) = open(root)?;
    let status = service.load().context("failed to load deliverables")?;
    let d: &Deliverable = status
        .find(id)
        .with_context(|| format!("Deliverable `{id}` not found"))?;

    if json {
        return print_json(d);
    }

    println!("Deliverable: {}", d.id);
    println!("Status:      {}", d.status);
    println!("Description: {}", d.description);
    if let Some(at) = d.deprecated_at {
        println!("Deprecated:  {}", at.format("%Y-%m-%d %H:%M"));
    } else if d.deprecated {
        println!("Deprecated:  yes");
    }
    if d.acceptance_criteria.is_empty() {
        println!("Criteria:    (none)");
    } else {
        println!("Criteria:");
        for c in &d.acceptance_criteria {
            println!("  - {c}");
        }
    }
    Ok(())
}

pub fn summary(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, service) = open(root)?;
    let status = service.load().context("failed to load deliverables")?;

    if json {
        return print_json(&serde_json::json!({
            "counts": status.counts(),
            "complete": status.is_complete(),
            "updated_at": status.updated_at,
        }));
    }

    println!("{}", status.summarize());
    if status.is_complete() {
        println!("All active deliverables passed.");
    }
    Ok(())
}
