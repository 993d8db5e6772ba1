use deliv_core::{Deliverable, Status};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

fn marker(status: Status) -> &'static str {
    match status {
        Status::Pending => "[ ]",
        Status::Passed => "[x]",
        Status::Blocked => "[!]",
    }
}

/// Render deliverables as a checklist, one line each, ids padded to a common
/// width so descriptions line up.
pub fn checklist(deliverables: &[Deliverable]) -> Vec<String> {
    let id_width = deliverables.iter().map(|d| d.id.len()).max().unwrap_or(0);
    deliverables
        .iter()
        .map(|d| {
            let criteria = match d.acceptance_criteria.len() {
                0 => String::new(),
                1 => "  (1 criterion)".to_string(),
                n => format!("  ({n} criteria)"),
            };
            format!(
                "{} {:width$}  {}{}",
                marker(d.status),
                d.id,
                d.description,
                criteria,
                width = id_width
            )
        })
        .collect()
}

pub fn print_deliverables(deliverables: &[Deliverable]) {
    for line in checklist(deliverables) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deliverable(id: &str, status: Status, criteria: usize) -> Deliverable {
        let mut d = Deliverable::new(
            id,
            format!("{id} description"),
            (0..criteria).map(|i| format!("c{i}")).collect(),
        );
        d.status = status;
        d
    }

    #[test]
    fn checklist_marks_each_status() {
        let lines = checklist(&[
            deliverable("DL-1", Status::Pending, 0),
            deliverable("DL-2", Status::Passed, 1),
            deliverable("DL-3", Status::Blocked, 3),
        ]);
        assert_eq!(
            lines,
            vec![
                "[ ] DL-1  DL-1 description",
                "[x] DL-2  DL-2 description  (1 criterion)",
                "[!] DL-3  DL-3 description  (3 criteria)",
            ]
        );
    }

    #[test]
    fn checklist_aligns_descriptions() {
        let lines = checklist(&[
            deliverable("A", Status::Pending, 0),
            deliverable("LONG-ID", Status::Pending, 0),
        ]);
        assert_eq!(lines[0], "[ ] A        A description");
        assert_eq!(lines[1], "[ ] LONG-ID  LONG-ID description");
    }

    #[test]
    fn checklist_of_nothing_is_empty() {
        assert!(checklist(&[]).is_empty());
    }
}
