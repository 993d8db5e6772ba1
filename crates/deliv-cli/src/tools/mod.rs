use deliv_core::{config::Config, DeliverableService, FileRepository, VerificationTracker};
use std::path::Path;

pub mod create_deliverables;
pub mod deprecate_deliverable;
pub mod list_deliverables;
pub mod set_status;
pub mod verify_deliverable;

/// State shared by the tools of one MCP server process.
pub struct Session {
    pub config: Config,
    pub service: DeliverableService<FileRepository>,
    /// Present only in verification sessions (`deliv mcp --verify`).
    pub tracker: Option<VerificationTracker>,
}

impl Session {
    pub fn open(root: &Path, verification: bool) -> deliv_core::Result<Self> {
        let config = Config::load(root)?;
        let service = DeliverableService::new(FileRepository::new(config.status_path(root)));
        let tracker = if verification {
            Some(service.begin_verification()?)
        } else {
            None
        };
        Ok(Self {
            config,
            service,
            tracker,
        })
    }
}

pub trait DelivTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> serde_json::Value;
    fn call(&self, args: serde_json::Value, session: &mut Session)
        -> Result<serde_json::Value, String>;
}

pub fn all_tools(verification: bool) -> Vec<Box<dyn DelivTool>> {
    let mut tools: Vec<Box<dyn DelivTool>> = vec![
        Box::new(create_deliverables::CreateDeliverablesTool),
        Box::new(set_status::SetStatusTool),
        Box::new(deprecate_deliverable::DeprecateDeliverableTool),
        Box::new(list_deliverables::ListDeliverablesTool),
    ];
    if verification {
        tools.push(Box::new(verify_deliverable::VerifyDeliverableTool));
    }
    tools
}

fn required_str<'a>(args: &'a serde_json::Value, key: &str) -> Result<&'a str, String> {
    args[key]
        .as_str()
        .ok_or_else(|| format!("missing required argument: {key}"))
}

/// Read an optional argument. Absent or null is `None`; any other value that
/// `extract` rejects is an invalid argument.
fn optional_arg<'a, T>(
    args: &'a serde_json::Value,
    key: &str,
    extract: impl FnOnce(&'a serde_json::Value) -> Option<T>,
) -> Result<Option<T>, String> {
    match args.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => extract(v)
            .map(Some)
            .ok_or_else(|| format!("invalid argument: {key}")),
    }
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}
