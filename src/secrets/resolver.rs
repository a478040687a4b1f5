//! Layered secret resolution.

use std::path::PathBuf;

/// Where a secret's effective value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// Process environment variable.
    Environment,
    /// File-backed TOML store.
    Store,
    /// Neither source yielded a value.
    Absent,
}

/// Resolves named secrets from the environment, then from a file-backed
/// TOML store, with no user-visible failure.
#[derive(Debug, Clone)]
pub struct SecretResolver {
    store_path: PathBuf,
}

impl SecretResolver {
    /// Create a resolver reading the store at the given path.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    /// Resolve a secret, returning the empty string when unconfigured.
    pub fn resolve(&self, name: &str) -> String {
        self.resolve_or(name, "")
    }

    /// Resolve a secret with a fallback default.
    ///
    /// The environment is re-checked on every call: it is authoritative
    /// and may change between deployments without a code change. Store
    /// failures of any kind (file absent, unreadable, malformed, key
    /// absent) degrade to "not found".
    pub fn resolve_or(&self, name: &str, default: &str) -> String {
        self.lookup(name)
            .map(|(value, _)| value)
            .unwrap_or_else(|| default.to_string())
    }

    /// Whether a secret resolves to a non-empty value. This boolean is
    /// the only thing the UI may learn about a secret.
    pub fn is_configured(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Which source a secret would resolve from right now.
    pub fn source(&self, name: &str) -> SecretSource {
        self.lookup(name)
            .map(|(_, source)| source)
            .unwrap_or(SecretSource::Absent)
    }

    fn lookup(&self, name: &str) -> Option<(String, SecretSource)> {
        if let Some(value) = std::env::var(name).ok().filter(|v| !v.is_empty()) {
            return Some((value, SecretSource::Environment));
        }
        self.read_store(name)
            .map(|value| (value, SecretSource::Store))
    }

    /// Single bounded synchronous read of the store. No retry loop; the
    /// file is re-read per call so a redeploy that swaps it is picked up
    /// without a restart.
    fn read_store(&self, name: &str) -> Option<String> {
        let content = std::fs::read_to_string(&self.store_path).ok()?;
        let table: toml::Table = content.parse().ok()?;
        table
            .get(name)
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }
}
