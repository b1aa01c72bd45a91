//! Sweep unclaimed reserve dust to the operator

use firstbuy_common::*;
use model_safety::math::sub_u64;
use pinocchio::msg;

use crate::state::Campaign;

/// Process sweep instruction
///
/// Only once every contributor has withdrawn; what is left of the reserve is
/// rounding dust. Returns the amount swept (0 on a repeat call).
pub fn process_sweep_unclaimed(
    campaign: &mut Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
) -> Result<TokenAmount, LaunchError> {
    campaign.require_operator(ctx)?;
    let reserved = match &campaign.launch {
        Some(record) => record.tokens_reserved,
        None => return Err(LaunchError::NotLaunched),
    };
    if !campaign.ledger.all_settled() {
        msg!("Error: Contributors still to withdraw");
        return Err(LaunchError::ClaimsOutstanding);
    }
    campaign.checked_token(env)?;

    let paid = campaign
        .ledger
        .tokens_distributed
        .saturating_add(campaign.ledger.tokens_swept);
    let dust = sub_u64(reserved, paid);
    if dust == 0 {
        return Ok(0);
    }

    campaign.ledger.tokens_swept = campaign.ledger.tokens_swept.saturating_add(dust);

    if env.token.transfer(&campaign.id, &campaign.operator, dust).is_err() {
        campaign.ledger.tokens_swept = sub_u64(campaign.ledger.tokens_swept, dust);
        msg!("Error: Sweep transfer rejected");
        return Err(LaunchError::TransferFailed);
    }

    pinocchio_log::log!("Swept: {} tokens", dust);
    Ok(dust)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::fixtures::*;

    fn sweep(f: &mut Fixture) -> Result<TokenAmount, LaunchError> {
        let ctx = f.operator();
        let mut env = f.h.env();
        process_sweep_unclaimed(&mut f.campaign, &mut env, &ctx)
    }

    #[test]
    fn test_sweep_after_all_settled() {
        let (mut f, users) = Fixture::launched();
        f.withdraw(users[0]).unwrap();
        assert_eq!(sweep(&mut f), Err(LaunchError::ClaimsOutstanding));

        f.withdraw(users[1]).unwrap();
        f.withdraw(users[2]).unwrap();
        assert_eq!(sweep(&mut f), Ok(1));
        assert_eq!(sweep(&mut f), Ok(0));

        let ledger = &f.campaign.ledger;
        assert_eq!(ledger.tokens_distributed + ledger.tokens_swept, RESERVE);
        assert_eq!(f.h.token.balance_of(&f.campaign.id), 0);
    }

    #[test]
    fn test_sweep_before_launch() {
        let (mut f, _) = Fixture::with_three_contributors();
        assert_eq!(sweep(&mut f), Err(LaunchError::NotLaunched));
    }
}
