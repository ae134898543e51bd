use crate::ledger::Ledger;
use anyhow::{bail, Result};
use dialoguer::Confirm;
use gameshow_betting::Deployment;

pub async fn handle_deploy(ledger: &mut Ledger, owner: &str, force: bool) -> Result<()> {
    if ledger.is_deployed() && !force {
        bail!("Contracts are already deployed. Use --force to redeploy over the existing state");
    }

    let deployer = match ledger.resolve(owner) {
        Ok(address) => address,
        Err(_) => {
            let address = ledger.add_account(owner)?;
            println!("Created account '{}' ({})", owner, address);
            address
        }
    };

    let config = ledger.config().ledger.clone();
    let initial_funding = config.initial_funding;
    let mut deployment = Deployment::deploy(deployer, config)?;
    for address in ledger.accounts().values() {
        deployment.balances.fund(address, initial_funding)?;
    }
    if !ledger.accounts().values().any(|address| *address == deployer) {
        deployment.balances.fund(&deployer, initial_funding)?;
    }

    println!("Deploying the contracts with the account: {}", deployer);
    println!(
        "Account balance: {}",
        deployment.balances.balance_of(&deployer)
    );

    let book = deployment.address_book();
    println!("Token address: {}", book.token);
    println!("Game address: {}", book.registry);

    ledger.set_deployment(deployment);
    ledger.commit().await?;
    Ok(())
}

pub async fn handle_addresses(ledger: &Ledger) -> Result<()> {
    let book = ledger.deployment()?.address_book();
    println!("{}", serde_json::to_string_pretty(&book)?);
    Ok(())
}

pub async fn handle_reset(ledger: &mut Ledger, force: bool) -> Result<()> {
    if !force {
        let confirm = Confirm::new()
            .with_prompt("Are you sure you want to wipe all games, accounts and events? This action cannot be undone.")
            .default(false)
            .interact()?;

        if !confirm {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    ledger.reset().await?;
    ledger.commit().await?;
    println!("Ledger reset.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::tempdir;

    async fn open_in(dir: &std::path::Path) -> Ledger {
        let config = CliConfig {
            data_dir: dir.to_path_buf(),
            ..CliConfig::default()
        };
        Ledger::open(config).await.unwrap()
    }

    #[tokio::test]
    async fn test_deploy_funds_every_named_account() {
        let dir = tempdir().unwrap();
        let mut ledger = open_in(dir.path()).await;
        let early = ledger.add_account("early").unwrap();

        handle_deploy(&mut ledger, "owner", false).await.unwrap();

        let funding = ledger.config().ledger.initial_funding;
        let owner = ledger.resolve("owner").unwrap();
        let balances = &ledger.deployment().unwrap().balances;
        assert_eq!(balances.balance_of(&owner), funding);
        assert_eq!(balances.balance_of(&early), funding);
    }

    #[tokio::test]
    async fn test_forced_redeploy_refunds_existing_accounts() {
        let dir = tempdir().unwrap();
        let mut ledger = open_in(dir.path()).await;
        handle_deploy(&mut ledger, "owner", false).await.unwrap();
        let bettor = ledger.add_account("bettor").unwrap();

        assert!(handle_deploy(&mut ledger, "owner", false).await.is_err());
        handle_deploy(&mut ledger, "owner", true).await.unwrap();

        let funding = ledger.config().ledger.initial_funding;
        let balances = &ledger.deployment().unwrap().balances;
        assert_eq!(balances.balance_of(&bettor), funding);
        assert_eq!(balances.balance_of(&ledger.resolve("owner").unwrap()), funding);
    }

    #[tokio::test]
    async fn test_deploy_from_raw_address_funds_it() {
        let dir = tempdir().unwrap();
        let mut ledger = open_in(dir.path()).await;
        let raw = gameshow_core::Address::from_label("outsider");

        handle_deploy(&mut ledger, &raw.to_string(), false).await.unwrap();

        let funding = ledger.config().ledger.initial_funding;
        assert_eq!(ledger.deployment().unwrap().balances.balance_of(&raw), funding);
    }
}
