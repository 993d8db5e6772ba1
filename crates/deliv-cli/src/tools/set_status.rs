use super::{required_str, to_payload, DelivTool, Session};
use deliv_core::{Status, StatusChange};
use std::cell::RefCell;

pub struct SetStatusTool;

impl DelivTool for SetStatusTool {
    fn name(&self) -> &str {
        "deliverable_set_status"
    }

    fn description(&self) -> &str {
        "Set a deliverable's status to pending, passed, or blocked"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "deliverableId": {
                    "type": "string",
                    "description": "Deliverable ID"
                },
                "status": {
                    "type": "string",
                    "enum": ["pending", "passed", "blocked"],
                    "description": "New status"
                }
            },
            "required": ["deliverableId", "status"]
        })
    }

    fn call(
        &self,
        args: serde_json::Value,
        session: &mut Session,
    ) -> Result<serde_json::Value, String> {
        let id = required_str(&args, "deliverableId")?;
        let status: Status = required_str(&args, "status")?
            .parse()
            .map_err(|e: deliv_core::DelivError| e.to_string())?;

        let change: RefCell<Option<StatusChange>> = RefCell::new(None);
        let capture = |c: &StatusChange| *change.borrow_mut() = Some(c.clone());
        let result = session
            .service
            .set_status(id, status, Some(&capture))
            .map_err(|e| e.to_string())?;

        let mut payload = to_payload(&result)?;
        if let Some(change) = change.into_inner() {
            payload["change"] = to_payload(&change)?;
        }
        Ok(payload)
    }
}
