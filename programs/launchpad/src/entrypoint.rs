//! Launchpad entrypoint

use pinocchio::{msg, ProgramResult};

use crate::instructions::*;
use crate::state::Campaign;
use firstbuy_common::{CallContext, Env, LaunchError, LaunchInstruction};

/// Decode `instruction_data` and run the matching handler
///
/// Layout: `data[0]` is the discriminator, little-endian fields follow.
/// Handler errors surface as `ProgramError::Custom(code)`.
pub fn process_instruction(
    campaign: &mut Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
    instruction_data: &[u8],
) -> ProgramResult {
    if instruction_data.is_empty() {
        msg!("Error: Instruction data is empty");
        return Err(LaunchError::InvalidInstruction.into());
    }

    let instruction = match LaunchInstruction::unpack(instruction_data) {
        Ok(ix) => ix,
        Err(e) => {
            msg!("Error: Unknown or malformed instruction");
            return Err(e.into());
        }
    };

    let result = match instruction {
        LaunchInstruction::Contribute => {
            msg!("Instruction: Contribute");
            process_contribute(campaign, env, ctx).map(|_| ())
        }
        LaunchInstruction::SetTokenAddress { token, supplier } => {
            msg!("Instruction: SetTokenAddress");
            process_set_token_address(campaign, ctx, &token, &supplier)
        }
        LaunchInstruction::SetAllowlist { allowlist } => {
            msg!("Instruction: SetAllowlist");
            process_set_allowlist(campaign, ctx, allowlist)
        }
        LaunchInstruction::SetMaxContribution { amount } => {
            msg!("Instruction: SetMaxContribution");
            process_set_max_contribution(campaign, ctx, amount)
        }
        LaunchInstruction::SetReservedTokens { amount } => {
            msg!("Instruction: SetReservedTokens");
            process_set_reserved_tokens(campaign, ctx, amount)
        }
        LaunchInstruction::SetIsOpen { open } => {
            msg!("Instruction: SetIsOpen");
            process_set_is_open(campaign, ctx, open)
        }
        LaunchInstruction::LaunchToken { token_amount } => {
            msg!("Instruction: LaunchToken");
            process_launch_token(campaign, env, ctx, token_amount).map(|_| ())
        }
        LaunchInstruction::WithdrawTokens => {
            msg!("Instruction: WithdrawTokens");
            process_withdraw_tokens(campaign, env, ctx).map(|_| ())
        }
        LaunchInstruction::EmergencyWithdraw => {
            msg!("Instruction: EmergencyWithdraw");
            process_emergency_withdraw(campaign, env, ctx).map(|_| ())
        }
        LaunchInstruction::TransferOperator { new_operator } => {
            msg!("Instruction: TransferOperator");
            process_transfer_operator(campaign, ctx, &new_operator)
        }
        LaunchInstruction::ReleaseTokenOwnership { new_owner } => {
            msg!("Instruction: ReleaseTokenOwnership");
            process_release_token_ownership(campaign, env, ctx, &new_owner)
        }
        LaunchInstruction::SweepUnclaimed => {
            msg!("Instruction: SweepUnclaimed");
            process_sweep_unclaimed(campaign, env, ctx).map(|_| ())
        }
    };

    result.map_err(Into::into)
}
