//! Genesis configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use vesta_types::{Address, GovernanceParameters};
use vesta_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid genesis config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Initial state of a Vesta ledger.
///
/// ```toml
/// super_admins = ["0x01"]
/// log_level = "debug"
///
/// [params]
/// reward_rate_bps = 700
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Seeded as `super_admin`; the first one bootstraps the registry.
    pub super_admins: Vec<Address>,

    /// Governance parameters. Omitted fields keep their genesis defaults.
    #[serde(default)]
    pub params: GovernanceParameters,

    /// Genesis timestamp in milliseconds. Defaults to the wall clock at `init`.
    #[serde(default)]
    pub genesis_time_ms: Option<u64>,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GenesisConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = GenesisConfig::from_toml_str(r#"super_admins = ["0x01"]"#).unwrap();
        assert_eq!(cfg.super_admins, vec![Address::new("0x01")]);
        assert_eq!(cfg.params, GovernanceParameters::genesis());
        assert_eq!(cfg.log_format, LogFormat::Human);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.genesis_time_ms, None);
    }

    #[test]
    fn partial_params_table_overrides_only_named_fields() {
        let cfg = GenesisConfig::from_toml_str(
            r#"
            super_admins = ["0xAB", "0x02"]
            log_format = "json"

            [params]
            reward_rate_bps = 700
            quorum_votes = 5000000

            [params.features]
            limit_orders = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.super_admins[0].as_str(), "0xab");
        assert_eq!(cfg.params.reward_rate_bps, 700);
        assert_eq!(cfg.params.quorum_votes, 5_000_000);
        assert_eq!(cfg.params.min_stake, 1_000);
        assert!(cfg.params.feature_enabled("limit_orders"));
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn malformed_admin_address_rejected() {
        assert!(matches!(
            GenesisConfig::from_toml_str(r#"super_admins = ["alice"]"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"super_admins = ["0x01"]"#).unwrap();
        let cfg = GenesisConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(cfg.super_admins.len(), 1);

        let missing = GenesisConfig::from_toml_file(Path::new("/nonexistent/genesis.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
