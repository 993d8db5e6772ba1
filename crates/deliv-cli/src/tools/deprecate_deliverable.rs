use super::{required_str, to_payload, DelivTool, Session};

pub struct DeprecateDeliverableTool;

impl DelivTool for DeprecateDeliverableTool {
    fn name(&self) -> &str {
        "deliverable_deprecate"
    }

    fn description(&self) -> &str {
        "Permanently deprecate a deliverable. It stays on record but no longer counts toward completion"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "deliverableId": {
                    "type": "string",
                    "description": "Deliverable ID"
                }
            },
            "required": ["deliverableId"]
        })
    }

    fn call(
        &self,
        args: serde_json::Value,
        session: &mut Session,
    ) -> Result<serde_json::Value, String> {
        let id = required_str(&args, "deliverableId")?;
        let result = session.service.deprecate(id).map_err(|e| e.to_string())?;
        to_payload(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testutil::{seed, session};
    use tempfile::TempDir;

    #[test]
    fn deprecate_then_again() {
        let dir = TempDir::new().unwrap();
        seed(&dir, &["DL-001"]);
        let mut session = session(&dir, false);
        let args = serde_json::json!({"deliverableId": "DL-001"});

        let first = DeprecateDeliverableTool
            .call(args.clone(), &mut session)
            .unwrap();
        assert_eq!(first["success"], true);

        let second = DeprecateDeliverableTool.call(args, &mut session).unwrap();
        assert_eq!(second["success"], false);
        assert_eq!(second["error"], "state_conflict");

        let loaded = session.service.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.deliverables[0].deprecated);
    }
}
