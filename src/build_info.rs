//! Build metadata embedded by build.rs

use std::fmt;

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version and build stamp of the running binary
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Incremented on each recompilation; 0 outside a cargo build
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: build_number(option_env!("NUTRILABEL_BUILD_NUMBER")),
            build_timestamp: option_env!("NUTRILABEL_BUILD_TIMESTAMP").unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{} build {} ({})", self.version, self.build_number, self.build_timestamp)
    }
}

fn build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Print the startup banner to stderr; stdout belongs to the MCP transport
pub fn print_startup_banner() {
    eprintln!("nutrilabel {}", BuildInfo::current());
}
