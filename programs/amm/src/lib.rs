//! FirstBuy AMM - reference constant product router (x·y=k)
//!
//! Implements the `LiquidityRouter` capability the launchpad consumes:
//! - Pool creation on first deposit (LP = sqrt(x·y) minus a locked floor)
//! - Proportional LP minting on later deposits
//! - Spot price readout for reports

#![allow(clippy::arithmetic_side_effects)]

pub mod math;
pub mod state;
pub mod router;

pub use state::*;
pub use router::*;
