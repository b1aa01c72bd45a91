//! Operator configuration

use anyhow::{bail, Context, Result};
use firstbuy_common::{Lamports, Pubkey, TokenAmount, DEFAULT_MAX_CONTRIBUTION, LAMPORTS_PER_SOL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Operator address (base58)
    pub operator: String,

    /// Campaign address (base58)
    pub campaign: String,

    /// Lamports airdropped to the operator before the session
    pub operator_lamports: Lamports,

    /// Session file to replay (JSON list of calls)
    pub session_path: String,

    /// Where the JSON report is written
    pub report_path: String,

    pub params: CampaignSection,

    pub token: TokenSection,

    pub router: RouterSection,

    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSection {
    pub max_contribution: Lamports,
    pub reserved_tokens: TokenAmount,
    pub is_open: bool,
    /// Gate contributions on the participant allowlist
    pub use_allowlist: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSection {
    /// Supply minted to the supplier, all of it approved to the campaign
    pub supply: TokenAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterSection {
    pub fee_bps: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    /// Base58 address
    pub address: String,
    /// Lamports airdropped before the session
    pub lamports: Lamports,
    #[serde(default)]
    pub allowlisted: bool,
}

impl Config {
    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("FIRSTBUY_CONFIG")
            .unwrap_or_else(|_| "firstbuy-config.toml".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let config_str = std::fs::read_to_string(expanded.as_ref())
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config TOML")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration: three participants, 0.5 SOL cap
    pub fn default_devnet() -> Self {
        let participant = |name: &str, tag: u8| Participant {
            name: name.to_string(),
            address: encode_address(&firstbuy_sim::key(tag)),
            lamports: LAMPORTS_PER_SOL,
            allowlisted: true,
        };

        Self {
            operator: encode_address(&firstbuy_sim::key(0x0F)),
            campaign: encode_address(&firstbuy_sim::key(0xCA)),
            operator_lamports: LAMPORTS_PER_SOL,
            session_path: "~/.config/firstbuy/session.json".to_string(),
            report_path: "firstbuy-report.json".to_string(),
            params: CampaignSection {
                max_contribution: DEFAULT_MAX_CONTRIBUTION,
                reserved_tokens: 1_000_000,
                is_open: true,
                use_allowlist: false,
            },
            token: TokenSection { supply: 10_000_000 },
            router: RouterSection { fee_bps: firstbuy_amm::DEFAULT_FEE_BPS },
            participants: vec![
                participant("alice", 1),
                participant("bob", 2),
                participant("carol", 3),
            ],
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_devnet();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }

    /// Addresses decode and participant names are unique
    pub fn validate(&self) -> Result<()> {
        parse_address(&self.operator).context("operator")?;
        parse_address(&self.campaign).context("campaign")?;
        let mut seen = std::collections::HashSet::new();
        for p in &self.participants {
            parse_address(&p.address).context(format!("participant {}", p.name))?;
            if !seen.insert(p.name.as_str()) {
                bail!("Duplicate participant name: {}", p.name);
            }
        }
        Ok(())
    }

    pub fn session_path(&self) -> String {
        shellexpand::tilde(&self.session_path).into_owned()
    }

    pub fn report_path(&self) -> String {
        shellexpand::tilde(&self.report_path).into_owned()
    }
}

/// Decode a base58 address into 32 bytes
pub fn parse_address(s: &str) -> Result<Pubkey> {
    let bytes = bs58::decode(s)
        .into_vec()
        .context(format!("Invalid base58 address: {}", s))?;
    let key: Pubkey = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("Address is {} bytes, expected 32: {}", bytes.len(), s))?;
    Ok(key)
}

pub fn encode_address(key: &Pubkey) -> String {
    bs58::encode(key).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default_devnet();
        assert_eq!(config.participants.len(), 3);
        assert_eq!(config.params.max_contribution, 500_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_toml_round_trip() {
        let config = Config::default_devnet();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.participants[1].name, "bob");
        assert_eq!(parsed.router.fee_bps, config.router.fee_bps);
    }

    #[test]
    fn test_parse_address() {
        let key = firstbuy_sim::key(7);
        assert_eq!(parse_address(&encode_address(&key)).unwrap(), key);
        assert!(parse_address("not-base58!").is_err());
        assert!(parse_address(&bs58::encode([1u8; 8]).into_string()).is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut config = Config::default_devnet();
        config.participants[1].name = "alice".to_string();
        assert!(config.validate().is_err());
    }
}
