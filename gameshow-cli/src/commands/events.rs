use crate::ledger::{Ledger, BETTING_CONTRACT, TOKEN_CONTRACT};
use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use gameshow_core::EventStore;

pub async fn handle_events_command(
    ledger: &Ledger,
    contract: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    if let Some(contract) = contract.as_deref() {
        if contract != BETTING_CONTRACT && contract != TOKEN_CONTRACT {
            bail!(
                "Unknown contract '{}'. Expected '{}' or '{}'",
                contract,
                BETTING_CONTRACT,
                TOKEN_CONTRACT
            );
        }
    }

    let limit = limit.unwrap_or(ledger.config().event_limit);
    let store = EventStore::new(ledger.storage());
    let events = store.list(contract.as_deref(), limit).await?;

    if events.is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Time", "Contract", "Event", "Args"]);

    for event in events {
        let mut args = event.payload.clone();
        if let Some(fields) = args.as_object_mut() {
            fields.remove("event");
        }

        table.add_row(vec![
            event.seq.to_string(),
            event.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            event.contract,
            event.name,
            args.to_string(),
        ]);
    }

    println!("{}", table);

    let total = store.count(contract.as_deref()).await?;
    tracing::debug!("Showing up to {} of {} events", limit, total);
    Ok(())
}
