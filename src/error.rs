use core::fmt;

use pinocchio::error::ProgramError;

/// Program-specific failures, surfaced to clients as `ProgramError::Custom`.
///
/// Codes start at 6000, the first Anchor custom error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum CompanionError {
    /// A record already exists at the derived address.
    AlreadyInitialized = 6000,
    /// No record exists at the derived address.
    NotFound = 6001,
    /// The caller is not the record's owner, or the owner did not sign.
    Unauthorized = 6002,
    /// Mood above 100.
    InvalidMoodValue = 6003,
    /// A supplied account address does not match its expected derivation.
    InvalidAccount = 6004,
    InteractionOverflow = 6005,
    /// Accessory name longer than [`MAX_NAME_LEN`](crate::state::MAX_NAME_LEN) bytes.
    NameTooLong = 6006,
    UnknownAccessoryType = 6007,
}

impl CompanionError {
    /// Map a `ProgramError::Custom` code back to the error it came from.
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            6000 => Self::AlreadyInitialized,
            6001 => Self::NotFound,
            6002 => Self::Unauthorized,
            6003 => Self::InvalidMoodValue,
            6004 => Self::InvalidAccount,
            6005 => Self::InteractionOverflow,
            6006 => Self::NameTooLong,
            6007 => Self::UnknownAccessoryType,
            _ => return None,
        })
    }

    #[inline(always)]
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::AlreadyInitialized => "Account already initialized",
            Self::NotFound => "Account not found",
            Self::Unauthorized => "Only the owner can perform this action",
            Self::InvalidMoodValue => "Mood value must be between 0 and 100",
            Self::InvalidAccount => "Account address does not match its derivation",
            Self::InteractionOverflow => "Interaction count overflow",
            Self::NameTooLong => "Accessory name is too long",
            Self::UnknownAccessoryType => "Unknown accessory type",
        }
    }
}

impl fmt::Display for CompanionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<CompanionError> for ProgramError {
    #[inline(always)]
    fn from(e: CompanionError) -> Self {
        ProgramError::Custom(e.code())
    }
}
