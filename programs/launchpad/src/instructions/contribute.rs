//! Contribute instruction - credit the caller's attached lamports

use firstbuy_common::*;
use pinocchio::msg;

use crate::state::Campaign;

/// Process contribute instruction
///
/// Checks run in a fixed order, then the ledger is credited, then the
/// attached lamports move from the caller into the campaign. A rejected
/// transfer takes the credit back, so a failed call never keeps the asset.
///
/// Returns the caller's new cumulative amount.
pub fn process_contribute(
    campaign: &mut Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
) -> Result<Lamports, LaunchError> {
    campaign.require_not_launched()?;

    if !campaign.is_open {
        msg!("Error: Contribution window is closed");
        return Err(LaunchError::WindowClosed);
    }

    // After an emergency drain the escrow can never again cover the records
    if campaign.ledger.escrow < campaign.ledger.total_contributed {
        msg!("Error: Escrow no longer covers contributions");
        return Err(LaunchError::InsufficientEscrow);
    }

    let amount = ctx.attached;
    if amount == 0 {
        return Err(LaunchError::InvalidAmount);
    }

    campaign.check_allowlist(env, &ctx.caller)?;

    // Cap against the stored cumulative amount
    let next = campaign.ledger.projected(&ctx.caller, amount)?;
    if next > campaign.max_contribution {
        msg!("Error: Contribution exceeds limit");
        return Err(LaunchError::CapExceeded);
    }

    let credit = campaign.ledger.credit(&ctx.caller, amount)?;

    if env.bank.transfer(&ctx.caller, &campaign.id, amount).is_err() {
        campaign.ledger.revert_credit(&ctx.caller, credit);
        msg!("Error: Contribution transfer rejected");
        return Err(LaunchError::TransferFailed);
    }

    pinocchio_log::log!("Contributed: {} lamports", amount);
    Ok(next)
}

#[cfg(test)]
#[path = "contribute_test.rs"]
mod contribute_test;
