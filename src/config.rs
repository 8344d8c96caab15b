use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::keys::default_env_vars;
use crate::providers::DEFAULT_GEMINI_MODEL;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceCfg {
    #[serde(default)]
    pub provider: ProviderCfg,
    #[serde(default)]
    pub keys: KeysCfg,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCfg {
    pub kind: String, // "mock" | "gemini"
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysCfg {
    /// Environment variables holding the credential pool, in rotation order.
    pub env_vars: Vec<String>,
}

impl Default for ProviderCfg {
    fn default() -> Self {
        Self {
            kind: "gemini".to_string(),
            model: None,
        }
    }
}

impl Default for KeysCfg {
    fn default() -> Self {
        Self {
            env_vars: default_env_vars(),
        }
    }
}

impl ProviderCfg {
    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }
}

pub fn load(path: &Path) -> Result<ServiceCfg> {
    let txt = std::fs::read_to_string(path)
        .context(format!("Failed to read config file: {}", path.display()))?;
    let cfg: ServiceCfg = serde_yaml::from_str(&txt).context("Failed to parse config YAML")?;
    Ok(cfg)
}

/// Explicit path must parse; no path means built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ServiceCfg> {
    match path {
        Some(p) => load(p),
        None => Ok(ServiceCfg::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_original_deployment() {
        let cfg = ServiceCfg::default();
        assert_eq!(cfg.provider.kind, "gemini");
        assert_eq!(cfg.provider.model(), "gemini-1.5-flash");
        assert_eq!(cfg.keys.env_vars.len(), 5);
        assert_eq!(cfg.keys.env_vars[0], "key1");
        assert_eq!(cfg.keys.env_vars[4], "key5");
    }

    #[test]
    fn yaml_round_trip() {
        let yaml = "provider:\n  kind: mock\n  model: null\nkeys:\n  env_vars: [a, b, c]\n";
        let cfg: ServiceCfg = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.provider.kind, "mock");
        assert_eq!(cfg.keys.env_vars, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: ServiceCfg = serde_yaml::from_str("provider:\n  kind: mock\n").unwrap();
        assert_eq!(cfg.provider.kind, "mock");
        assert_eq!(cfg.keys.env_vars.len(), 5);
    }
}
