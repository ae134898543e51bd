use crate::error::Result;
use crate::registry::GameRegistry;
use gameshow_core::{Address, Balances, CoreError, GameShowToken, LedgerConfig};
use serde::{Deserialize, Serialize};

pub const TOKEN_NONCE: u64 = 0;
pub const REGISTRY_NONCE: u64 = 1;

/// Where each contract of a deployment lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    pub deployer: Address,
    pub token: Address,
    pub registry: Address,
}

/// The full ledger: both contracts plus the native balance book they settle against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub config: LedgerConfig,
    pub balances: Balances,
    pub token: GameShowToken,
    pub registry: GameRegistry,
}

impl Deployment {
    /// Deploy the token and then the registry, both owned by `deployer`.
    pub fn deploy(deployer: Address, config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        if deployer.is_zero() {
            return Err(CoreError::InvalidAddress("deployer cannot be the zero address".to_string()).into());
        }

        let token_address = Address::contract(&deployer, TOKEN_NONCE);
        let registry_address = Address::contract(&deployer, REGISTRY_NONCE);

        let token = GameShowToken::new(token_address, deployer, &config.token);
        let registry = GameRegistry::new(registry_address, deployer, &config);

        tracing::info!("Deploying the contracts with the account: {}", deployer);
        tracing::info!("Token address: {}", token_address);
        tracing::info!("Game address: {}", registry_address);

        Ok(Self {
            config,
            balances: Balances::new(),
            token,
            registry,
        })
    }

    pub fn address_book(&self) -> AddressBook {
        AddressBook {
            deployer: self.registry.owner(),
            token: self.token.address(),
            registry: self.registry.address(),
        }
    }
}
