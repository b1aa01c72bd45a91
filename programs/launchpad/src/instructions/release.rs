//! Release token ownership held by the campaign

use firstbuy_common::*;
use pinocchio::msg;

use crate::state::Campaign;

/// Hand ownership of the launch token from the campaign to `new_owner`
pub fn process_release_token_ownership(
    campaign: &mut Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
    new_owner: &Pubkey,
) -> Result<(), LaunchError> {
    campaign.require_operator(ctx)?;
    campaign.checked_token(env)?;

    if env.token.transfer_ownership(&campaign.id, new_owner).is_err() {
        msg!("Error: Token refused ownership hand-over");
        return Err(LaunchError::TransferFailed);
    }

    msg!("Token ownership released");
    Ok(())
}
