use crate::error::{CoreError, Result};
use crate::types::Amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub max_description_len: usize,
    pub min_bet: Amount,
    pub token: TokenConfig,
    /// Native funds credited to every account created through the CLI.
    pub initial_funding: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_description_len: 256,
            min_bet: Amount::from_wei(1),
            token: TokenConfig::default(),
            initial_funding: Amount::from_wei(10_000),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Nouns Game Show".to_string(),
            symbol: "NGS".to_string(),
            decimals: 18,
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_description_len == 0 {
            return Err(CoreError::config(
                "Max description length must be greater than 0",
            ));
        }

        if self.min_bet.is_zero() {
            return Err(CoreError::config("Minimum bet must be greater than 0"));
        }

        if self.token.name.trim().is_empty() {
            return Err(CoreError::config("Token name cannot be empty"));
        }

        if self.token.symbol.trim().is_empty() {
            return Err(CoreError::config("Token symbol cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LedgerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.token.symbol, "NGS");
    }

    #[test]
    fn test_zero_min_bet_rejected() {
        let config = LedgerConfig {
            min_bet: Amount::ZERO,
            ..LedgerConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let json = r#"{
            "max_description_len": 64,
            "min_bet": 5,
            "token": { "name": "Test", "symbol": "TST", "decimals": 6 },
            "initial_funding": 100
        }"#;
        let config: LedgerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.min_bet, Amount::from_wei(5));
        assert_eq!(config.token.decimals, 6);
    }
}
