//! Instruction wire format
//!
//! `data[0]` is the discriminator, little-endian fields follow. All readers
//! bounds-check and fail with `InvalidInstruction` on short input.

use crate::{LaunchError, Lamports, Pubkey, TokenAmount};
use arrayvec::ArrayVec;

/// Largest encoded instruction: discriminator + two addresses
pub const MAX_INSTRUCTION_LEN: usize = 1 + 32 + 32;

/// Read a u8 from instruction data
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, LaunchError> {
    if offset >= data.len() {
        return Err(LaunchError::InvalidInstruction);
    }
    Ok(data[offset])
}

/// Read a u64 (little-endian) from instruction data
#[inline]
pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, LaunchError> {
    let bytes = read_bytes::<8>(data, offset)?;
    Ok(u64::from_le_bytes(bytes))
}

/// Read a fixed-size byte array from instruction data
#[inline]
pub fn read_bytes<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], LaunchError> {
    let end = offset.checked_add(N).ok_or(LaunchError::InvalidInstruction)?;
    if end > data.len() {
        return Err(LaunchError::InvalidInstruction);
    }
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&data[offset..end]);
    Ok(bytes)
}

/// Read a 0/1 flag; anything else is malformed
#[inline]
pub fn read_bool(data: &[u8], offset: usize) -> Result<bool, LaunchError> {
    match read_u8(data, offset)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(LaunchError::InvalidInstruction),
    }
}

/// Instruction data reader with tracked offset
pub struct InstructionReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, LaunchError> {
        let val = read_u8(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, LaunchError> {
        let val = read_u64(self.data, self.offset)?;
        self.offset += 8;
        Ok(val)
    }

    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, LaunchError> {
        let val = read_bool(self.data, self.offset)?;
        self.offset += 1;
        Ok(val)
    }

    #[inline]
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], LaunchError> {
        let val = read_bytes(self.data, self.offset)?;
        self.offset += N;
        Ok(val)
    }

    #[inline]
    pub fn read_pubkey(&mut self) -> Result<Pubkey, LaunchError> {
        self.read_bytes::<32>()
    }
}

/// Launchpad instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchInstruction {
    /// Contribute the value attached to the call
    Contribute,
    SetTokenAddress { token: Pubkey, supplier: Pubkey },
    SetAllowlist { allowlist: Option<Pubkey> },
    SetMaxContribution { amount: Lamports },
    SetReservedTokens { amount: TokenAmount },
    SetIsOpen { open: bool },
    /// Launch; value attached to the call is the operator seed
    LaunchToken { token_amount: TokenAmount },
    WithdrawTokens,
    EmergencyWithdraw,
    TransferOperator { new_operator: Pubkey },
    ReleaseTokenOwnership { new_owner: Pubkey },
    SweepUnclaimed,
}

impl LaunchInstruction {
    pub fn discriminator(&self) -> u8 {
        match self {
            Self::Contribute => 0,
            Self::SetTokenAddress { .. } => 1,
            Self::SetAllowlist { .. } => 2,
            Self::SetMaxContribution { .. } => 3,
            Self::SetReservedTokens { .. } => 4,
            Self::SetIsOpen { .. } => 5,
            Self::LaunchToken { .. } => 6,
            Self::WithdrawTokens => 7,
            Self::EmergencyWithdraw => 8,
            Self::TransferOperator { .. } => 9,
            Self::ReleaseTokenOwnership { .. } => 10,
            Self::SweepUnclaimed => 11,
        }
    }

    /// Decode instruction data
    pub fn unpack(data: &[u8]) -> Result<Self, LaunchError> {
        let mut reader = InstructionReader::new(data);
        let ix = match reader.read_u8()? {
            0 => Self::Contribute,
            1 => Self::SetTokenAddress {
                token: reader.read_pubkey()?,
                supplier: reader.read_pubkey()?,
            },
            2 => {
                let allowlist = if reader.read_bool()? {
                    Some(reader.read_pubkey()?)
                } else {
                    None
                };
                Self::SetAllowlist { allowlist }
            }
            3 => Self::SetMaxContribution { amount: reader.read_u64()? },
            4 => Self::SetReservedTokens { amount: reader.read_u64()? },
            5 => Self::SetIsOpen { open: reader.read_bool()? },
            6 => Self::LaunchToken { token_amount: reader.read_u64()? },
            7 => Self::WithdrawTokens,
            8 => Self::EmergencyWithdraw,
            9 => Self::TransferOperator { new_operator: reader.read_pubkey()? },
            10 => Self::ReleaseTokenOwnership { new_owner: reader.read_pubkey()? },
            11 => Self::SweepUnclaimed,
            _ => return Err(LaunchError::InvalidInstruction),
        };
        if reader.remaining() != 0 {
            return Err(LaunchError::InvalidInstruction);
        }
        Ok(ix)
    }

    /// Encode instruction data
    pub fn pack(&self) -> ArrayVec<u8, MAX_INSTRUCTION_LEN> {
        let mut buf = ArrayVec::new();
        buf.push(self.discriminator());
        match self {
            Self::SetTokenAddress { token, supplier } => {
                put(&mut buf, token);
                put(&mut buf, supplier);
            }
            Self::SetAllowlist { allowlist } => match allowlist {
                Some(key) => {
                    buf.push(1);
                    put(&mut buf, key);
                }
                None => buf.push(0),
            },
            Self::SetMaxContribution { amount } | Self::SetReservedTokens { amount } => {
                put(&mut buf, &amount.to_le_bytes());
            }
            Self::SetIsOpen { open } => buf.push(u8::from(*open)),
            Self::LaunchToken { token_amount } => put(&mut buf, &token_amount.to_le_bytes()),
            Self::TransferOperator { new_operator: key } | Self::ReleaseTokenOwnership { new_owner: key } => {
                put(&mut buf, key);
            }
            Self::Contribute | Self::WithdrawTokens | Self::EmergencyWithdraw | Self::SweepUnclaimed => {}
        }
        buf
    }
}

// MAX_INSTRUCTION_LEN covers the largest variant, so this never truncates.
fn put(buf: &mut ArrayVec<u8, MAX_INSTRUCTION_LEN>, bytes: &[u8]) {
    let _ = buf.try_extend_from_slice(bytes);
}
