use super::{to_payload, DelivTool, Session};
use deliv_core::NewDeliverable;

pub struct CreateDeliverablesTool;

impl DelivTool for CreateDeliverablesTool {
    fn name(&self) -> &str {
        "deliverable_create"
    }

    fn description(&self) -> &str {
        "Create one or more deliverables. All-or-nothing: duplicate or existing IDs reject the whole batch"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "deliverables": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Unique deliverable ID (e.g. DL-001)"
                            },
                            "description": {
                                "type": "string",
                                "description": "What the deliverable is"
                            },
                            "acceptanceCriteria": {
                                "type": "array",
                                "items": { "type": "string" },
                                "description": "Conditions that must hold for it to pass"
                            }
                        },
                        "required": ["id", "description", "acceptanceCriteria"]
                    }
                }
            },
            "required": ["deliverables"]
        })
    }

    fn call(
        &self,
        args: serde_json::Value,
        session: &mut Session,
    ) -> Result<serde_json::Value, String> {
        let raw = args
            .get("deliverables")
            .cloned()
            .ok_or_else(|| "missing required argument: deliverables".to_string())?;
        let batch: Vec<NewDeliverable> =
            serde_json::from_value(raw).map_err(|e| format!("invalid deliverables: {e}"))?;

        let result = session.service.create(&batch).map_err(|e| e.to_string())?;
        to_payload(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testutil::{seed, session};
    use tempfile::TempDir;

    #[test]
    fn creates_batch() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, false);

        let result = CreateDeliverablesTool
            .call(
                serde_json::json!({"deliverables": [
                    {"id": "DL-001", "description": "X", "acceptanceCriteria": ["a"]},
                    {"id": "DL-002", "description": "Y", "acceptanceCriteria": ["b", "c"]}
                ]}),
                &mut session,
            )
            .unwrap();

        assert_eq!(result["success"], true);
        assert_eq!(result["message"], "Created 2 deliverable(s)");
        let loaded = session.service.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.deliverables[1].acceptance_criteria, vec!["b", "c"]);
    }

    #[test]
    fn existing_id_rejects_batch() {
        let dir = TempDir::new().unwrap();
        seed(&dir, &["DL-001"]);
        let mut session = session(&dir, false);

        let result = CreateDeliverablesTool
            .call(
                serde_json::json!({"deliverables": [
                    {"id": "DL-002", "description": "Y", "acceptanceCriteria": []},
                    {"id": "DL-001", "description": "X", "acceptanceCriteria": []}
                ]}),
                &mut session,
            )
            .unwrap();

        assert_eq!(result["success"], false);
        assert_eq!(result["message"], "Deliverable `DL-001` already exists");
        assert_eq!(result["error"], "validation");
        assert_eq!(session.service.load().unwrap().len(), 1);
    }

    #[test]
    fn missing_argument_errors() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, false);
        let err = CreateDeliverablesTool
            .call(serde_json::json!({}), &mut session)
            .unwrap_err();
        assert!(err.contains("deliverables"));
    }
}
