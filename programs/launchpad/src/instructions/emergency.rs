//! Emergency withdraw - operator drains the campaign's native balance

use firstbuy_common::*;
use pinocchio::msg;

use crate::state::Campaign;

/// Process emergency withdraw instruction
///
/// Sends everything the campaign account holds to the operator, in any
/// state. The ledger escrow is zeroed before the transfer and restored if it
/// fails. Records are not touched, so a later launch fails with
/// `InsufficientEscrow` until the escrow again covers them.
pub fn process_emergency_withdraw(
    campaign: &mut Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
) -> Result<Lamports, LaunchError> {
    campaign.require_operator(ctx)?;

    let balance = env.bank.balance(&campaign.id);
    let escrow = campaign.ledger.escrow;
    campaign.ledger.escrow = 0;

    if env.bank.transfer(&campaign.id, &campaign.operator, balance).is_err() {
        campaign.ledger.escrow = escrow;
        msg!("Error: Emergency transfer rejected");
        return Err(LaunchError::TransferFailed);
    }

    pinocchio_log::log!("Emergency withdraw: {} lamports", balance);
    Ok(balance)
}
