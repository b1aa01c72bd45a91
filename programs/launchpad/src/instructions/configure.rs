//! Operator configuration, frozen once the campaign launches

use firstbuy_common::*;
use pinocchio::msg;

use crate::state::Campaign;

fn admin_guard(campaign: &Campaign, ctx: &CallContext) -> Result<(), LaunchError> {
    campaign.require_operator(ctx)?;
    campaign.require_not_launched()
}

/// Set the launch token and the account its supply is pulled from
pub fn process_set_token_address(
    campaign: &mut Campaign,
    ctx: &CallContext,
    token: &Pubkey,
    supplier: &Pubkey,
) -> Result<(), LaunchError> {
    admin_guard(campaign, ctx)?;
    campaign.token = Some(*token);
    campaign.supplier = *supplier;
    msg!("Token address set");
    Ok(())
}

/// Gate contributions on membership (`None` opens to everyone)
pub fn process_set_allowlist(
    campaign: &mut Campaign,
    ctx: &CallContext,
    allowlist: Option<Pubkey>,
) -> Result<(), LaunchError> {
    admin_guard(campaign, ctx)?;
    campaign.allowlist = allowlist;
    msg!("Allowlist updated");
    Ok(())
}

/// Per-address cap on cumulative contributions
///
/// Applies to future contributions only; existing records are not revisited.
pub fn process_set_max_contribution(
    campaign: &mut Campaign,
    ctx: &CallContext,
    amount: Lamports,
) -> Result<(), LaunchError> {
    admin_guard(campaign, ctx)?;
    campaign.max_contribution = amount;
    pinocchio_log::log!("Max contribution: {}", amount);
    Ok(())
}

/// Tokens held back at launch for contributors
pub fn process_set_reserved_tokens(
    campaign: &mut Campaign,
    ctx: &CallContext,
    amount: TokenAmount,
) -> Result<(), LaunchError> {
    admin_guard(campaign, ctx)?;
    campaign.reserved_for_contributors = amount;
    pinocchio_log::log!("Reserved tokens: {}", amount);
    Ok(())
}

pub fn process_set_is_open(campaign: &mut Campaign, ctx: &CallContext, open: bool) -> Result<(), LaunchError> {
    admin_guard(campaign, ctx)?;
    campaign.is_open = open;
    if open {
        msg!("Contribution window opened");
    } else {
        msg!("Contribution window closed");
    }
    Ok(())
}

/// Hand the operator role to `new_operator`; allowed in any state
pub fn process_transfer_operator(
    campaign: &mut Campaign,
    ctx: &CallContext,
    new_operator: &Pubkey,
) -> Result<(), LaunchError> {
    campaign.require_operator(ctx)?;
    campaign.operator = *new_operator;
    msg!("Operator transferred");
    Ok(())
}
