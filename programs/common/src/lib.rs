//! Boundary contract shared by the launchpad, the reference AMM and the
//! off-chain tooling: error codes, amounts, collaborator capabilities and the
//! instruction wire format.

#![cfg_attr(not(test), no_std)]

pub mod types;
pub mod error;
pub mod collaborators;
pub mod instruction;


pub use types::*;
pub use error::*;
pub use collaborators::*;
pub use instruction::*;
