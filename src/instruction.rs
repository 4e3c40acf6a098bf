use pinocchio::error::ProgramError;

use crate::{cursor::SliceCursor, state::AccessoryType};

/// Instruction tags (byte 0 of instruction_data).
pub const IX_INITIALIZE_COMPANION: u8 = 0;
pub const IX_UPDATE_MOOD: u8 = 1;
pub const IX_RECORD_INTERACTION: u8 = 2;
pub const IX_MINT_YELLOW_RIBBON: u8 = 3;
pub const IX_TOGGLE_ACCESSORY: u8 = 4;

/// A decoded instruction. Borrowed fields point into the instruction data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction<'a> {
    /// Accounts: `[companion (w), owner (w, s), system_program]`
    InitializeCompanion,
    /// Accounts: `[companion (w), owner (s)]`
    ///
    /// Data: `u8 new_mood`
    UpdateMood { new_mood: u8 },
    /// Accounts: `[companion (w), owner (s)]`
    RecordInteraction,
    /// Accounts: `[accessory (w), owner (w, s), system_program]`
    ///
    /// Data: `u32 len` followed by `len` bytes of UTF-8 name
    MintYellowRibbon { name: &'a str },
    /// Accounts: `[accessory (w), owner (s)]`
    ///
    /// Data: optional `u8 accessory_type`, defaulting to the yellow ribbon
    ToggleAccessory { accessory_type: AccessoryType },
}

impl<'a> Instruction<'a> {
    /// Decode instruction data. Any malformed or truncated input is
    /// `InvalidInstructionData`; only an unknown accessory type byte keeps
    /// its own error.
    pub fn unpack(data: &'a [u8]) -> Result<Self, ProgramError> {
        let mut cur = SliceCursor::new(data);
        Self::decode(&mut cur).map_err(|e| match e {
            ProgramError::AccountDataTooSmall => ProgramError::InvalidInstructionData,
            other => other,
        })
    }

    fn decode(cur: &mut SliceCursor<'a>) -> Result<Self, ProgramError> {
        let ix = match cur.read_u8()? {
            IX_INITIALIZE_COMPANION => Self::InitializeCompanion,
            IX_UPDATE_MOOD => Self::UpdateMood {
                new_mood: cur.read_u8()?,
            },
            IX_RECORD_INTERACTION => Self::RecordInteraction,
            IX_MINT_YELLOW_RIBBON => {
                let len = cur.read_u32()? as usize;
                let raw = cur.read_bytes(len)?;
                let name =
                    core::str::from_utf8(raw).map_err(|_| ProgramError::InvalidInstructionData)?;
                Self::MintYellowRibbon { name }
            }
            IX_TOGGLE_ACCESSORY => {
                let accessory_type = if cur.remaining() == 0 {
                    AccessoryType::YellowRibbon
                } else {
                    AccessoryType::try_from(cur.read_u8()?)?
                };
                Self::ToggleAccessory { accessory_type }
            }
            _ => return Err(ProgramError::InvalidInstructionData),
        };
        crate::require_eq!(cur.remaining(), 0, ProgramError::InvalidInstructionData);
        Ok(ix)
    }

    /// The instruction's snake_case name, as clients call it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializeCompanion => "initialize_companion",
            Self::UpdateMood { .. } => "update_mood",
            Self::RecordInteraction => "record_interaction",
            Self::MintYellowRibbon { .. } => "mint_yellow_ribbon",
            Self::ToggleAccessory { .. } => "toggle_accessory",
        }
    }

    /// Encode as instruction data.
    #[cfg(not(target_os = "solana"))]
    pub fn pack(&self) -> std::vec::Vec<u8> {
        let mut data = std::vec::Vec::with_capacity(8);
        match *self {
            Self::InitializeCompanion => data.push(IX_INITIALIZE_COMPANION),
            Self::UpdateMood { new_mood } => data.extend_from_slice(&[IX_UPDATE_MOOD, new_mood]),
            Self::RecordInteraction => data.push(IX_RECORD_INTERACTION),
            Self::MintYellowRibbon { name } => {
                data.push(IX_MINT_YELLOW_RIBBON);
                data.extend_from_slice(&(name.len() as u32).to_le_bytes());
                data.extend_from_slice(name.as_bytes());
            }
            Self::ToggleAccessory { accessory_type } => {
                data.extend_from_slice(&[IX_TOGGLE_ACCESSORY, accessory_type as u8])
            }
        }
        data
    }
}
