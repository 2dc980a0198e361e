//! Curated server bundles keyed by use case.

use crate::registry::{Registry, ServerDescriptor};
use crate::InstallerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseCase {
    pub key: &'static str,
    pub description: &'static str,
    pub servers: &'static [&'static str],
}

impl UseCase {
    /// Recommended servers the registry actually has, in recommendation order.
    pub fn available<'r>(&self, registry: &'r Registry) -> Vec<&'r ServerDescriptor> {
        self.servers.iter().filter_map(|name| registry.get(name)).collect()
    }
}

pub static USE_CASES: &[UseCase] = &[
    UseCase {
        key: "starter",
        description: "Basic documentation and problem-solving capabilities",
        servers: &["context7", "sequential-thinking"],
    },
    UseCase {
        key: "web-dev",
        description: "Web development with UI generation and testing",
        servers: &["context7", "magic", "playwright"],
    },
    UseCase {
        key: "code-review",
        description: "Code analysis and systematic review",
        servers: &["serena", "sequential-thinking"],
    },
    UseCase {
        key: "productivity",
        description: "Task management and systematic planning",
        servers: &["notion", "sequential-thinking"],
    },
    UseCase {
        key: "full-stack",
        description: "Complete development toolkit",
        servers: &["context7", "serena", "playwright", "magic"],
    },
];

/// Look up a use case by key.
///
/// # Errors
///
/// Returns [`InstallerError::UnknownUseCase`] listing the valid keys.
pub fn resolve(key: &str) -> Result<&'static UseCase, InstallerError> {
    USE_CASES.iter().find(|case| case.key == key).ok_or_else(|| InstallerError::UnknownUseCase {
        key: key.to_string(),
        valid: USE_CASES.iter().map(|case| case.key.to_string()).collect(),
    })
}
