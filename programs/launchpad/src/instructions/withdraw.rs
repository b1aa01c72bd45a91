//! Withdraw instruction - redeem a contributor's share of the reserve

use firstbuy_common::*;
use model_safety::math::pro_rata_floor;
use pinocchio::msg;

use crate::state::Campaign;

/// Share of the reserve owed for `amount`, using the ratio frozen at launch
pub fn payout_for(campaign: &Campaign, amount: Lamports) -> TokenAmount {
    match &campaign.launch {
        Some(record) => pro_rata_floor(amount, record.tokens_reserved, record.contributions_snapshot),
        None => 0,
    }
}

/// Process withdraw instruction
///
/// Pays `floor(amount * reserved / total)` exactly once per contributor.
/// The withdrawn flag is set before the token transfer and cleared again if
/// the transfer is rejected.
pub fn process_withdraw_tokens(
    campaign: &mut Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
) -> Result<TokenAmount, LaunchError> {
    if !campaign.is_launched() {
        msg!("Error: Campaign not launched");
        return Err(LaunchError::NotLaunched);
    }

    let record = match campaign.ledger.record(&ctx.caller) {
        Some(r) if r.amount > 0 => *r,
        _ => return Err(LaunchError::NoContribution),
    };
    if record.withdrawn {
        msg!("Error: Tokens already withdrawn");
        return Err(LaunchError::AlreadyWithdrawn);
    }
    campaign.checked_token(env)?;

    let payout = payout_for(campaign, record.amount);

    campaign.ledger.mark_withdrawn(&ctx.caller, payout)?;

    if env.token.transfer(&campaign.id, &ctx.caller, payout).is_err() {
        campaign.ledger.revert_withdrawn(&ctx.caller, payout);
        msg!("Error: Payout transfer rejected");
        return Err(LaunchError::TransferFailed);
    }

    pinocchio_log::log!("Withdrawn: {} tokens", payout);
    Ok(payout)
}
