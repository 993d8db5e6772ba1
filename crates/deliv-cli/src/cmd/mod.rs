pub mod config;
pub mod deliverable;
pub mod init;
pub mod mcp;
