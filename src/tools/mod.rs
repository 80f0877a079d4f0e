//! nutrilabel tools module
//!
//! Tool implementations behind the MCP server.

pub mod analyze;
pub mod evaluation;
pub mod status;
