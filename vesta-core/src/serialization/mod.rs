//! Deterministic binary serialization for ledger records.
//!
//! Distribution records are persisted in the external ledger store with
//! no engine-private format. bincode with a deterministic configuration
//! guarantees:
//! - Same input always produces same output across replaying nodes
//! - Cross-platform consistency
//! - Compact binary representation

mod bincode_config;

pub use bincode_config::{deserialize, serialize};
