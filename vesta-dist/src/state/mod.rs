//! Ledger state abstraction and the in-memory implementation.

mod dist_state;
mod store;

pub use dist_state::DistState;
pub use store::{LedgerReader, LedgerStore, LedgerWriter};
