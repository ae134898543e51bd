use super::wei;
use crate::ledger::Ledger;
use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a named account and credit it with the configured initial funds
    Create {
        /// Account name
        name: String,
    },
    /// Credit native funds to an account (dev faucet)
    Fund {
        /// Account name or 0x address
        account: String,
        /// Amount in wei
        amount: u64,
    },
    /// Show an account's native and token balances
    Balance {
        /// Account name or 0x address
        account: String,
    },
    /// List all named accounts
    List,
}

pub async fn handle_account_command(cmd: AccountCommands, ledger: &mut Ledger) -> Result<()> {
    match cmd {
        AccountCommands::Create { name } => {
            let address = ledger.add_account(&name)?;
            let funding = ledger.config().ledger.initial_funding;

            if ledger.is_deployed() {
                let deployment = ledger.deployment_mut()?;
                deployment.balances.fund(&address, funding)?;
            }
            ledger.commit().await?;

            println!("Account created successfully!");
            println!("  Name: {}", name);
            println!("  Address: {}", address);
            if ledger.is_deployed() {
                println!("  Balance: {}", funding);
            }
        }

        AccountCommands::Fund { account, amount } => {
            let address = ledger.resolve(&account)?;
            let balance = ledger.deployment_mut()?.balances.fund(&address, wei(amount))?;
            ledger.commit().await?;

            println!("Funded {} with {}", account, wei(amount));
            println!("  New balance: {}", balance);
        }

        AccountCommands::Balance { account } => {
            let address = ledger.resolve(&account)?;
            let deployment = ledger.deployment()?;

            println!("Balance for '{}' ({}):", account, address);
            println!("  Native: {}", deployment.balances.balance_of(&address));
            println!(
                "  {}: {}",
                deployment.token.symbol(),
                deployment.token.balance_of(&address).to_wei()
            );
        }

        AccountCommands::List => {
            if ledger.accounts().is_empty() {
                println!("No accounts found.");
                println!("Create a new account with: gameshow account create <name>");
                return Ok(());
            }

            let deployment = ledger.deployment().ok();

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Name", "Address", "Native", "Tokens"]);

            for (name, address) in ledger.accounts() {
                let (native, tokens) = match deployment {
                    Some(d) => (
                        d.balances.balance_of(address).to_string(),
                        d.token.balance_of(address).to_wei().to_string(),
                    ),
                    None => ("-".to_string(), "-".to_string()),
                };
                table.add_row(vec![name.clone(), address.to_string(), native, tokens]);
            }

            println!("{}", table);
        }
    }

    Ok(())
}
