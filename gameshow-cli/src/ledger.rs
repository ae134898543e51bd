use crate::config::CliConfig;
use anyhow::{anyhow, bail, Result};
use gameshow_betting::Deployment;
use gameshow_core::{Address, EventStore, SnapshotStore, Storage};
use std::collections::BTreeMap;

pub const DB_FILE: &str = "gameshow.db";
const DEPLOYMENT_SNAPSHOT: &str = "deployment";
const ACCOUNTS_SNAPSHOT: &str = "accounts";

pub const BETTING_CONTRACT: &str = "betting";
pub const TOKEN_CONTRACT: &str = "token";

/// Persisted ledger state for one CLI invocation.
pub struct Ledger {
    storage: Storage,
    config: CliConfig,
    deployment: Option<Deployment>,
    accounts: BTreeMap<String, Address>,
}

impl Ledger {
    pub async fn open(config: CliConfig) -> Result<Self> {
        let storage = Storage::new(&config.data_dir.join(DB_FILE)).await?;

        let (deployment, accounts) = {
            let snapshots = SnapshotStore::new(&storage);
            let deployment: Option<Deployment> = snapshots.load(DEPLOYMENT_SNAPSHOT).await?;
            let accounts: BTreeMap<String, Address> = snapshots
                .load(ACCOUNTS_SNAPSHOT)
                .await?
                .unwrap_or_default();
            (deployment, accounts)
        };

        tracing::debug!(
            "Opened ledger at {} ({} named accounts, deployed: {})",
            config.data_dir.display(),
            accounts.len(),
            deployment.is_some()
        );

        Ok(Self {
            storage,
            config,
            deployment,
            accounts,
        })
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn is_deployed(&self) -> bool {
        self.deployment.is_some()
    }

    pub fn deployment(&self) -> Result<&Deployment> {
        self.deployment
            .as_ref()
            .ok_or_else(|| anyhow!("Contracts are not deployed. Run 'gameshow deploy <owner>' first"))
    }

    pub fn deployment_mut(&mut self) -> Result<&mut Deployment> {
        self.deployment
            .as_mut()
            .ok_or_else(|| anyhow!("Contracts are not deployed. Run 'gameshow deploy <owner>' first"))
    }

    pub fn set_deployment(&mut self, deployment: Deployment) {
        self.deployment = Some(deployment);
    }

    pub fn accounts(&self) -> &BTreeMap<String, Address> {
        &self.accounts
    }

    /// Register a named account, returning its address.
    pub fn add_account(&mut self, name: &str) -> Result<Address> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Account name cannot be empty");
        }
        if name.starts_with("0x") {
            bail!("Account names cannot start with 0x");
        }
        if self.accounts.contains_key(name) {
            bail!("Account '{}' already exists", name);
        }

        let address = Address::from_label(name);
        self.accounts.insert(name.to_string(), address);
        Ok(address)
    }

    /// Resolve an account name or a literal `0x` address.
    pub fn resolve(&self, who: &str) -> Result<Address> {
        if who.starts_with("0x") || who.starts_with("0X") {
            return Ok(who.parse()?);
        }

        self.accounts.get(who).copied().ok_or_else(|| {
            anyhow!(
                "Account '{}' not found. Use 'gameshow account list' to see available accounts",
                who
            )
        })
    }

    /// Name of an address, if it belongs to a named account.
    pub fn label(&self, address: &Address) -> String {
        self.accounts
            .iter()
            .find(|(_, a)| *a == address)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| address.to_string())
    }

    /// Persist state and flush any pending contract events to the event log.
    pub async fn commit(&mut self) -> Result<()> {
        let events = EventStore::new(&self.storage);
        let snapshots = SnapshotStore::new(&self.storage);

        if let Some(deployment) = self.deployment.as_mut() {
            let betting_events = deployment.registry.take_events();
            let token_events = deployment.token.take_events();
            events.append(BETTING_CONTRACT, &betting_events).await?;
            events.append(TOKEN_CONTRACT, &token_events).await?;

            snapshots.save(DEPLOYMENT_SNAPSHOT, deployment).await?;
        }
        snapshots.save(ACCOUNTS_SNAPSHOT, &self.accounts).await?;

        Ok(())
    }

    /// Forget everything: contracts, accounts and event history.
    pub async fn reset(&mut self) -> Result<()> {
        self.storage.clear().await?;
        self.deployment = None;
        self.accounts.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameshow_core::{Amount, LedgerConfig};
    use tempfile::tempdir;

    async fn open_in(dir: &std::path::Path) -> Ledger {
        let config = CliConfig {
            data_dir: dir.to_path_buf(),
            ..CliConfig::default()
        };
        Ledger::open(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_state_persists_between_opens() {
        let dir = tempdir().unwrap();

        {
            let mut ledger = open_in(dir.path()).await;
            let owner = ledger.add_account("owner").unwrap();
            let bettor = ledger.add_account("bettor1").unwrap();

            let mut deployment = Deployment::deploy(owner, LedgerConfig::default()).unwrap();
            deployment.balances.fund(&bettor, Amount::from_wei(100)).unwrap();
            deployment.registry.create_game(&owner, "Test Game 1").unwrap();
            deployment.registry.add_game_bet_option(&owner, 0, "Option 1").unwrap();
            deployment
                .registry
                .place_bet(&mut deployment.balances, &bettor, 0, 0, Amount::from_wei(50))
                .unwrap();
            ledger.set_deployment(deployment);
            ledger.commit().await.unwrap();
        }

        let ledger = open_in(dir.path()).await;
        let bettor = ledger.resolve("bettor1").unwrap();
        let deployment = ledger.deployment().unwrap();
        assert_eq!(deployment.registry.num_games(), 1);
        assert_eq!(
            deployment.registry.get_bet(&bettor, 0).unwrap().amount,
            Amount::from_wei(50)
        );

        let stored = EventStore::new(ledger.storage())
            .list(Some(BETTING_CONTRACT), 10)
            .await
            .unwrap();
        let names: Vec<&str> = stored.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["NewGame", "NewGameBetOption", "NewBet"]);
        assert_eq!(stored[0].payload["game_id"], 0);
        assert_eq!(stored[0].payload["description"], "Test Game 1");
    }

    #[tokio::test]
    async fn test_resolve_names_and_addresses() {
        let dir = tempdir().unwrap();
        let mut ledger = open_in(dir.path()).await;
        let alice = ledger.add_account("alice").unwrap();

        assert_eq!(ledger.resolve("alice").unwrap(), alice);
        assert_eq!(ledger.resolve(&alice.to_string()).unwrap(), alice);
        assert!(ledger.resolve("bob").is_err());
        assert!(ledger.add_account("alice").is_err());
        assert_eq!(ledger.label(&alice), "alice");
    }

    #[tokio::test]
    async fn test_undeployed_ledger_errors() {
        let dir = tempdir().unwrap();
        let ledger = open_in(dir.path()).await;

        assert!(!ledger.is_deployed());
        assert!(ledger.deployment().is_err());
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let dir = tempdir().unwrap();
        let mut ledger = open_in(dir.path()).await;
        let owner = ledger.add_account("owner").unwrap();
        ledger.set_deployment(Deployment::deploy(owner, LedgerConfig::default()).unwrap());
        ledger.commit().await.unwrap();

        ledger.reset().await.unwrap();
        ledger.commit().await.unwrap();

        let reopened = open_in(dir.path()).await;
        assert!(!reopened.is_deployed());
        assert!(reopened.accounts().is_empty());
    }
}
