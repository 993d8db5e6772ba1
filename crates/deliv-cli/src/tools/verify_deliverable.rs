use super::{required_str, to_payload, DelivTool, Session};
use deliv_core::service;

pub struct VerifyDeliverableTool;

impl DelivTool for VerifyDeliverableTool {
    fn name(&self) -> &str {
        "deliverable_verify"
    }

    fn description(&self) -> &str {
        "Record that a deliverable's acceptance criteria were confirmed in this verification session"
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
        let tracker = session
            .tracker
            .as_mut()
            .ok_or_else(|| "no verification session: start the server with --verify".to_string())?;
        let result = service::verify(tracker, id);
        let mut payload = to_payload(&result)?;
        payload["remaining"] = serde_json::json!(tracker.unverified());
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::list_deliverables::ListDeliverablesTool;
    use crate::tools::testutil::{seed, session};
    use tempfile::TempDir;

    #[test]
    fn verify_known_then_filter() {
        let dir = TempDir::new().unwrap();
        seed(&dir, &["DL-001", "DL-002"]);
        let mut session = session(&dir, true);

        let result = VerifyDeliverableTool
            .call(serde_json::json!({"deliverableId": "DL-001"}), &mut session)
            .unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["remaining"], serde_json::json!(["DL-002"]));

        let listed = ListDeliverablesTool
            .call(serde_json::json!({"verified": false}), &mut session)
            .unwrap();
        assert_eq!(listed["deliverables"][0]["id"], "DL-002");
        assert_eq!(listed["deliverables"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn unknown_id_not_found() {
        let dir = TempDir::new().unwrap();
        seed(&dir, &["DL-001"]);
        let mut session = session(&dir, true);

        let result = VerifyDeliverableTool
            .call(serde_json::json!({"deliverableId": "DL-002"}), &mut session)
            .unwrap();
        assert_eq!(result["success"], false);
        assert!(result["message"].as_str().unwrap().contains("not found"));
        assert!(!session.tracker.as_ref().unwrap().is_verified("DL-002"));
    }

    #[test]
    fn requires_verification_session() {
        let dir = TempDir::new().unwrap();
        seed(&dir, &["DL-001"]);
        let mut session = session(&dir, false);
        let err = VerifyDeliverableTool
            .call(serde_json::json!({"deliverableId": "DL-001"}), &mut session)
            .unwrap_err();
        assert!(err.contains("--verify"));
    }
}
