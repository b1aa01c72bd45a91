//! In-memory collaborators
//!
//! Host-side stand-ins for the native bank, the launch token, the allowlist
//! and the clock, plus a [`Harness`] that wires them to a
//! [`ConstantProductRouter`](firstbuy_amm::ConstantProductRouter).

pub mod bank;
pub mod token;
pub mod allowlist;
pub mod harness;

pub use allowlist::*;
pub use bank::*;
pub use harness::*;
pub use token::*;

/// Readable test key: first byte is the tag, the rest zero
pub fn key(tag: u8) -> firstbuy_common::Pubkey {
    let mut k = [0u8; 32];
    k[0] = tag;
    k
}
