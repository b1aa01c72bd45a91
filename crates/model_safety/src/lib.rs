//! Pure Rust model of a launch campaign for Kani verification
//! No Solana dependencies, no unwrap/panic, all functions total

#![cfg_attr(not(test), no_std)]

pub mod state;
pub mod math;
pub mod helpers;
pub mod transitions;

// Re-export commonly used types
pub use state::*;
pub use helpers::*;
pub use transitions::*;
