//! Pantry - kitchen inventory with optimistic sync
//!
//! The core is [`InventoryCache`]: an in-memory ingredient list that
//! applies every mutation locally at once, sends it to the persistence
//! server, and then commits the server's answer or rolls back.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod inventory;
pub mod journal;
pub mod ui;

pub use error::{PantryError, PantryResult};
pub use inventory::InventoryCache;
