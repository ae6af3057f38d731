//! Tool alias resolution - redirecting the external tools to custom executables

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Alias of the package inspector.
pub const DPKG: &str = "dpkg";

/// Alias of the package manager.
pub const APT_GET: &str = "apt-get";

/// Alias of the privilege-escalation command prefixed to mutating operations.
pub const SUDO: &str = "sudo";

/// Table mapping a logical tool alias to the command that should be run for
/// it. Unset aliases resolve to themselves, so by default the tools are
/// looked up on `PATH` under their usual names.
///
/// Clones share the underlying table. Overrides are meant to be configured
/// once before operations start; the table stays readable from any thread
/// for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct ToolPaths {
    overrides: Arc<Mutex<HashMap<String, String>>>,
}

impl ToolPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override for a tool alias. The path is not checked for
    /// existence; a bad override surfaces later as a spawn error.
    pub fn set(&self, alias: impl Into<String>, path: impl Into<String>) {
        let mut overrides = self.overrides.lock().unwrap_or_else(|e| e.into_inner());
        overrides.insert(alias.into(), path.into());
    }

    /// Resolve an alias to its configured command, or the alias itself when
    /// no override is set.
    pub fn resolve(&self, alias: &str) -> String {
        let overrides = self.overrides.lock().unwrap_or_else(|e| e.into_inner());
        overrides
            .get(alias)
            .cloned()
            .unwrap_or_else(|| alias.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_alias_resolves_to_itself() {
        let paths = ToolPaths::new();
        assert_eq!(paths.resolve(DPKG), "dpkg");
        assert_eq!(paths.resolve(APT_GET), "apt-get");
        assert_eq!(paths.resolve(SUDO), "sudo");
    }

    #[test]
    fn test_override_wins() {
        let paths = ToolPaths::new();
        paths.set(DPKG, "/opt/tools/dpkg");
        assert_eq!(paths.resolve(DPKG), "/opt/tools/dpkg");
        // Other aliases are unaffected
        assert_eq!(paths.resolve(APT_GET), "apt-get");
    }

    #[test]
    fn test_clones_share_the_table() {
        let paths = ToolPaths::new();
        let clone = paths.clone();
        paths.set(APT_GET, "/usr/local/bin/apt-get");
        assert_eq!(clone.resolve(APT_GET), "/usr/local/bin/apt-get");
    }

    #[test]
    fn test_last_set_wins() {
        let paths = ToolPaths::new();
        paths.set(SUDO, "doas");
        paths.set(SUDO, "env");
        assert_eq!(paths.resolve(SUDO), "env");
    }
}
