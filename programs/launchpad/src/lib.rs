//! FirstBuy launchpad
//!
//! Pooled, capped contributions of the native asset, one atomic launch into
//! an AMM pool, then pro-rata redemption of the reserved token pool.

pub mod state;
pub mod instructions;

// Dispatcher over the wire format; hosts call it with their collaborators
pub mod entrypoint;

pub use state::*;
pub use instructions::*;
pub use entrypoint::process_instruction;

pinocchio_pubkey::declare_id!("FBuy1LaunchPad9hVqT3wZ7cKxR2mYdN4sEoJ5gA8uPb");
