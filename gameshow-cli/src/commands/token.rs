use super::wei;
use crate::ledger::Ledger;
use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Show token metadata and holders
    Info,
    /// Mint tokens to an account (owner only)
    Mint {
        /// Calling account
        caller: String,
        /// Recipient account
        to: String,
        /// Amount in base units
        amount: u64,
    },
    /// Transfer tokens
    Transfer {
        /// Sending account
        caller: String,
        /// Recipient account
        to: String,
        /// Amount in base units
        amount: u64,
    },
    /// Allow a spender to move the caller's tokens
    Approve {
        /// Token holder
        caller: String,
        /// Spender account
        spender: String,
        /// Allowance in base units
        amount: u64,
    },
    /// Move tokens on behalf of a holder using an allowance
    TransferFrom {
        /// Spending account
        caller: String,
        /// Token holder
        from: String,
        /// Recipient account
        to: String,
        /// Amount in base units
        amount: u64,
    },
    /// Burn the caller's tokens
    Burn {
        /// Token holder
        caller: String,
        /// Amount in base units
        amount: u64,
    },
    /// Hand token ownership to another account (owner only)
    TransferOwnership {
        /// Calling account
        caller: String,
        /// New owner
        new_owner: String,
    },
    /// Show an account's token balance
    Balance {
        /// Account name or 0x address
        account: String,
    },
}

pub async fn handle_token_command(cmd: TokenCommands, ledger: &mut Ledger) -> Result<()> {
    match cmd {
        TokenCommands::Info => {
            let token = &ledger.deployment()?.token;

            println!("Token Information:");
            println!("  Name: {}", token.name());
            println!("  Symbol: {}", token.symbol());
            println!("  Decimals: {}", token.decimals());
            println!("  Address: {}", token.address());
            println!("  Owner: {}", ledger.label(&token.owner()));
            println!("  Total supply: {}", token.total_supply().to_wei());

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Holder", "Balance"]);
            for (holder, amount) in token.holders() {
                table.add_row(vec![ledger.label(holder), amount.to_wei().to_string()]);
            }

            println!();
            println!("{}", table);
        }

        TokenCommands::Mint { caller, to, amount } => {
            let caller = ledger.resolve(&caller)?;
            let recipient = ledger.resolve(&to)?;
            ledger
                .deployment_mut()?
                .token
                .mint(&caller, &recipient, wei(amount))?;
            ledger.commit().await?;

            println!("Minted {} to {}", amount, to);
        }

        TokenCommands::Transfer { caller, to, amount } => {
            let sender = ledger.resolve(&caller)?;
            let recipient = ledger.resolve(&to)?;
            ledger
                .deployment_mut()?
                .token
                .transfer(&sender, &recipient, wei(amount))?;
            ledger.commit().await?;

            println!("Transferred {} from {} to {}", amount, caller, to);
        }

        TokenCommands::Approve {
            caller,
            spender,
            amount,
        } => {
            let holder = ledger.resolve(&caller)?;
            let spender_address = ledger.resolve(&spender)?;
            ledger
                .deployment_mut()?
                .token
                .approve(&holder, &spender_address, wei(amount))?;
            ledger.commit().await?;

            println!("{} may now spend {} of {}'s tokens", spender, amount, caller);
        }

        TokenCommands::TransferFrom {
            caller,
            from,
            to,
            amount,
        } => {
            let spender = ledger.resolve(&caller)?;
            let holder = ledger.resolve(&from)?;
            let recipient = ledger.resolve(&to)?;
            ledger
                .deployment_mut()?
                .token
                .transfer_from(&spender, &holder, &recipient, wei(amount))?;
            ledger.commit().await?;

            println!("{} moved {} from {} to {}", caller, amount, from, to);
        }

        TokenCommands::Burn { caller, amount } => {
            let holder = ledger.resolve(&caller)?;
            ledger.deployment_mut()?.token.burn(&holder, wei(amount))?;
            ledger.commit().await?;

            println!("Burned {} from {}", amount, caller);
        }

        TokenCommands::TransferOwnership { caller, new_owner } => {
            let current = ledger.resolve(&caller)?;
            let next = ledger.resolve(&new_owner)?;
            ledger
                .deployment_mut()?
                .token
                .transfer_ownership(&current, &next)?;
            ledger.commit().await?;

            println!("Token ownership transferred to {}", new_owner);
        }

        TokenCommands::Balance { account } => {
            let address = ledger.resolve(&account)?;
            let token = &ledger.deployment()?.token;

            println!(
                "{}: {} {}",
                account,
                token.balance_of(&address).to_wei(),
                token.symbol()
            );
        }
    }

    Ok(())
}
