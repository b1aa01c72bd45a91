//! Launch error codes
//!
//! Every entry point fails with exactly one of these. The discriminants are
//! stable: they travel as `ProgramError::Custom(code)` and integrators branch
//! on them.

use core::fmt;
use pinocchio::program_error::ProgramError;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchError {
    /// Contribution window is closed
    WindowClosed = 0,
    /// Caller is not on the configured allowlist
    NotAllowlisted = 1,
    /// Cumulative contribution would exceed the per-address cap
    CapExceeded = 2,
    /// Campaign already launched
    AlreadyLaunched = 3,
    /// A collaborator rejected a launch step; nothing moved
    LaunchFailed = 4,
    /// Campaign has not launched yet
    NotLaunched = 5,
    /// Caller already redeemed their allocation
    AlreadyWithdrawn = 6,
    /// Privileged entry point called by someone other than the operator
    Unauthorized = 7,
    /// Escrow does not cover what the operation needs
    InsufficientEscrow = 8,
    /// Zero or otherwise unusable amount
    InvalidAmount = 9,
    /// Caller has no contribution on record
    NoContribution = 10,
    /// Token reference has not been configured
    NotConfigured = 11,
    /// Supplied collaborator does not match the configured reference
    InvalidCollaborator = 12,
    /// Asset transfer to or from a participant was rejected
    TransferFailed = 13,
    /// Some contributors have not withdrawn yet
    ClaimsOutstanding = 14,
    /// Amount arithmetic overflowed
    ArithmeticOverflow = 15,
    /// Malformed instruction data
    InvalidInstruction = 16,
}

impl LaunchError {
    /// Map a custom program error code back to its variant
    pub fn from_code(code: u32) -> Option<Self> {
        let err = match code {
            0 => Self::WindowClosed,
            1 => Self::NotAllowlisted,
            2 => Self::CapExceeded,
            3 => Self::AlreadyLaunched,
            4 => Self::LaunchFailed,
            5 => Self::NotLaunched,
            6 => Self::AlreadyWithdrawn,
            7 => Self::Unauthorized,
            8 => Self::InsufficientEscrow,
            9 => Self::InvalidAmount,
            10 => Self::NoContribution,
            11 => Self::NotConfigured,
            12 => Self::InvalidCollaborator,
            13 => Self::TransferFailed,
            14 => Self::ClaimsOutstanding,
            15 => Self::ArithmeticOverflow,
            16 => Self::InvalidInstruction,
            _ => return None,
        };
        Some(err)
    }

    /// Recover the variant from a program error, if it carries one
    pub fn from_program_error(err: &ProgramError) -> Option<Self> {
        match err {
            ProgramError::Custom(code) => Self::from_code(*code),
            _ => None,
        }
    }

    /// True for failures that may succeed later without operator action
    /// on this caller's record (window, launch timing, funding).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::WindowClosed
                | Self::NotLaunched
                | Self::LaunchFailed
                | Self::TransferFailed
                | Self::InsufficientEscrow
                | Self::ClaimsOutstanding
        )
    }
}

impl From<LaunchError> for ProgramError {
    fn from(e: LaunchError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::WindowClosed => "contribution window is closed",
            Self::NotAllowlisted => "caller is not allowlisted",
            Self::CapExceeded => "contribution exceeds limit",
            Self::AlreadyLaunched => "campaign already launched",
            Self::LaunchFailed => "launch failed",
            Self::NotLaunched => "campaign not launched",
            Self::AlreadyWithdrawn => "tokens have been paid out",
            Self::Unauthorized => "caller is not the operator",
            Self::InsufficientEscrow => "insufficient escrow",
            Self::InvalidAmount => "invalid amount",
            Self::NoContribution => "no contribution on record",
            Self::NotConfigured => "token address not configured",
            Self::InvalidCollaborator => "collaborator does not match configuration",
            Self::TransferFailed => "asset transfer failed",
            Self::ClaimsOutstanding => "contributors have unclaimed allocations",
            Self::ArithmeticOverflow => "arithmetic overflow",
            Self::InvalidInstruction => "invalid instruction",
        };
        f.write_str(msg)
    }
}

/// Failure reported by an external collaborator (token, router, bank).
///
/// A collaborator call that returns one of these must not have moved any
/// asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorError {
    InsufficientBalance,
    InsufficientAllowance,
    NotOwner,
    Frozen,
    Paused,
    Rejected,
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InsufficientBalance => "insufficient balance",
            Self::InsufficientAllowance => "insufficient allowance",
            Self::NotOwner => "caller is not the owner",
            Self::Frozen => "account is frozen",
            Self::Paused => "venue is paused",
            Self::Rejected => "request rejected",
        };
        f.write_str(msg)
    }
}
