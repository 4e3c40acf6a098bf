use pinocchio::{error::ProgramError, Address};

use crate::{
    cursor::{DataWriter, SliceCursor},
    error::CompanionError,
    header::Record,
};

/// Companion record discriminator.
pub const COMPANION_DISC: u8 = 1;
/// Accessory record discriminator.
pub const ACCESSORY_DISC: u8 = 2;

pub const COMPANION_VERSION: u8 = 1;
pub const ACCESSORY_VERSION: u8 = 1;

pub const INITIAL_MOOD: u8 = 50;
pub const MAX_MOOD: u8 = 100;

/// Longest accessory name, in bytes of UTF-8.
pub const MAX_NAME_LEN: usize = 32;

/// One per owner.
///
/// Layout (header v1):
///   [0..8]   header          (disc = 1, version = 1, data_len = 50)
///   --- payload ---
///   [8..40]  [u8; 32] owner
///   [40]     u8       mood
///   [41..49] u64      interaction_count
///   [49..57] i64      last_interaction (unix seconds)
///   [57]     u8       bump
///
/// Total: 8 + 50 = 58 bytes
#[derive(Clone, PartialEq, Eq)]
pub struct Companion {
    pub owner: Address,
    pub mood: u8,
    pub interaction_count: u64,
    pub last_interaction: i64,
    pub bump: u8,
}

impl Record for Companion {
    const DISCRIMINATOR: u8 = COMPANION_DISC;
    const VERSION: u8 = COMPANION_VERSION;
    const PAYLOAD_LEN: usize = 32 + 1 + 8 + 8 + 1;

    fn write_payload(&self, w: &mut DataWriter) -> Result<(), ProgramError> {
        w.write_address(&self.owner)?;
        w.write_u8(self.mood)?;
        w.write_u64(self.interaction_count)?;
        w.write_i64(self.last_interaction)?;
        w.write_u8(self.bump)
    }

    fn read_payload(cur: &mut SliceCursor) -> Result<Self, ProgramError> {
        Ok(Self {
            owner: cur.read_address()?,
            mood: cur.read_u8()?,
            interaction_count: cur.read_u64()?,
            last_interaction: cur.read_i64()?,
            bump: cur.read_u8()?,
        })
    }
}

/// Closed set of accessory kinds. The wire byte and seed label of a variant
/// never change once deployed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AccessoryType {
    YellowRibbon = 0,
}

impl AccessoryType {
    /// Seed label used in the accessory's address derivation.
    #[inline(always)]
    pub fn label(self) -> &'static [u8] {
        match self {
            Self::YellowRibbon => b"yellow_ribbon",
        }
    }
}

impl TryFrom<u8> for AccessoryType {
    type Error = CompanionError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(Self::YellowRibbon),
            _ => Err(CompanionError::UnknownAccessoryType),
        }
    }
}

/// Fixed-capacity UTF-8 accessory name.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AccessoryName {
    len: u8,
    bytes: [u8; MAX_NAME_LEN],
}

impl AccessoryName {
    pub fn new(name: &str) -> Result<Self, ProgramError> {
        Self::from_utf8(name.as_bytes())
    }

    /// Build from raw bytes, enforcing length and UTF-8.
    pub fn from_utf8(raw: &[u8]) -> Result<Self, ProgramError> {
        if raw.len() > MAX_NAME_LEN {
            return Err(CompanionError::NameTooLong.into());
        }
        core::str::from_utf8(raw).map_err(|_| ProgramError::InvalidInstructionData)?;
        let mut bytes = [0u8; MAX_NAME_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self {
            len: raw.len() as u8,
            bytes,
        })
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn as_str(&self) -> &str {
        // Constructors only admit valid UTF-8.
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One per (owner, accessory type).
///
/// Layout (header v1):
///   [0..8]   header          (disc = 2, version = 1, data_len = 76)
///   --- payload ---
///   [8..40]  [u8; 32] owner
///   [40]     u8       name_len
///   [41..73] [u8; 32] name (UTF-8, zero padded)
///   [73]     u8       accessory_type
///   [74]     u8       equipped (0 / 1)
///   [75..83] i64      mint_date (unix seconds)
///   [83]     u8       bump
///
/// Total: 8 + 76 = 84 bytes
#[derive(Clone, PartialEq, Eq)]
pub struct Accessory {
    pub owner: Address,
    pub name: AccessoryName,
    pub accessory_type: AccessoryType,
    pub equipped: bool,
    pub mint_date: i64,
    pub bump: u8,
}

impl Record for Accessory {
    const DISCRIMINATOR: u8 = ACCESSORY_DISC;
    const VERSION: u8 = ACCESSORY_VERSION;
    const PAYLOAD_LEN: usize = 32 + 1 + MAX_NAME_LEN + 1 + 1 + 8 + 1;

    fn write_payload(&self, w: &mut DataWriter) -> Result<(), ProgramError> {
        w.write_address(&self.owner)?;
        w.write_u8(self.name.len)?;
        w.write_bytes(&self.name.bytes)?;
        w.write_u8(self.accessory_type as u8)?;
        w.write_bool(self.equipped)?;
        w.write_i64(self.mint_date)?;
        w.write_u8(self.bump)
    }

    fn read_payload(cur: &mut SliceCursor) -> Result<Self, ProgramError> {
        let owner = cur.read_address()?;
        let name_len = cur.read_u8()? as usize;
        let name_bytes = cur.read_bytes(MAX_NAME_LEN)?;
        let name = name_bytes
            .get(..name_len)
            .ok_or(ProgramError::InvalidAccountData)
            .and_then(|raw| {
                AccessoryName::from_utf8(raw).map_err(|_| ProgramError::InvalidAccountData)
            })?;
        let accessory_type = AccessoryType::try_from(cur.read_u8()?)
            .map_err(|_| ProgramError::InvalidAccountData)?;
        Ok(Self {
            owner,
            name,
            accessory_type,
            equipped: cur.read_bool()?,
            mint_date: cur.read_i64()?,
            bump: cur.read_u8()?,
        })
    }
}
