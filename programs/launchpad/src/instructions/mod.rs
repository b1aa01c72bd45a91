//! Launchpad instruction handlers
//!
//! Each handler takes the campaign by `&mut`, the collaborators for this
//! call and the caller's context. Decoding happens in `entrypoint.rs`.

pub mod configure;
pub mod contribute;
pub mod launch;
pub mod withdraw;
pub mod emergency;
pub mod release;
pub mod sweep;
pub mod views;

pub use configure::*;
pub use contribute::*;
pub use launch::*;
pub use withdraw::*;
pub use emergency::*;
pub use release::*;
pub use sweep::*;

#[cfg(test)]
pub(crate) mod fixtures;
