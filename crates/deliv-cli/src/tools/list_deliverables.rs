use super::{optional_arg, to_payload, DelivTool, Session};
use deliv_core::{ListFilter, Status};

pub struct ListDeliverablesTool;

impl DelivTool for ListDeliverablesTool {
    fn name(&self) -> &str {
        "deliverable_list"
    }

    fn description(&self) -> &str {
        "List active deliverables, optionally filtered by status or verification state"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "enum": ["pending", "passed", "blocked"],
                    "description": "Only deliverables with this status"
                },
                "verified": {
                    "type": "boolean",
                    "description": "Only (un)verified deliverables; ignored outside a verification session"
                },
                "limit": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Maximum number of entries"
                }
            },
            "required": []
        })
    }

    fn call(
        &self,
        args: serde_json::Value,
        session: &mut Session,
    ) -> Result<serde_json::Value, String> {
        let status = optional_arg(&args, "status", |v| v.as_str())?
            .map(str::parse::<Status>)
            .transpose()
            .map_err(|e| e.to_string())?;
        let verified = optional_arg(&args, "verified", |v| v.as_bool())?;
        let limit = optional_arg(&args, "limit", |v| {
            v.as_u64().and_then(|n| usize::try_from(n).ok())
        })?;

        let filter = ListFilter { status, verified };
        let limit = session.config.effective_limit(limit);

        let result = session
            .service
            .list(session.tracker.as_ref(), filter, limit)
            .map_err(|e| e.to_string())?;
        to_payload(&result)
    }
}
