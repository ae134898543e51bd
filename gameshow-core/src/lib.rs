//! Game-show ledger core
//!
//! Shared primitives for the betting workspace: account addresses, native
//! amounts and balances, the companion fungible token, event plumbing,
//! configuration, and SQLite-backed persistence.

pub mod balances;
pub mod config;
pub mod error;
pub mod event;
pub mod storage;
pub mod token;
pub mod types;

pub use balances::Balances;
pub use config::{LedgerConfig, TokenConfig};
pub use error::{CoreError, Result};
pub use event::{ContractEvent, EventLog};
pub use storage::{EventStore, SnapshotStore, Storage, StoredEvent};
pub use token::{GameShowToken, TokenEvent};
pub use types::{Address, Amount};
