#![cfg_attr(target_os = "solana", no_std)]
//! **companion-program** - per-owner companion and accessory records on Solana.
//!
//! Every owner may hold one companion and one accessory per accessory type.
//! Records live at program-derived addresses, only their owner can change
//! them, and their byte layout is fixed and versioned so clients can decode
//! raw account data directly.
//!
//! Instructions (tag = byte 0 of instruction data):
//! - `0`: InitializeCompanion: create the owner's companion (mood 50)
//! - `1`: UpdateMood: set mood, 0..=100
//! - `2`: RecordInteraction: bump the interaction counter and timestamp
//! - `3`: MintYellowRibbon: create a named yellow ribbon accessory
//! - `4`: ToggleAccessory: equip / unequip an accessory
//!
//! # Layers
//!
//! | Module | Role |
//! |---|---|
//! | [`pda`] | derive record addresses (pure, identical on and off chain) |
//! | [`companion`] | companion lifecycle over a [`RecordStore`](store::RecordStore) |
//! | [`accessory`] | accessory lifecycle over a [`RecordStore`](store::RecordStore) |
//! | [`dispatch`] | signer / writable / derivation checks, then route |
//! | [`processor`] | runtime-backed store and clock, program entry |
//!
//! # Features
//!
//! - `bpf-entrypoint` (default): emit the program entrypoint on `target_os = "solana"`.
//! - `log`: one log line per successful operation via `pinocchio-log`.

use pinocchio::Address;

// ── Macros ───────────────────────────────────────────────────────────────────

/// Require a boolean condition: return `$err` (converted via `Into`) if false.
///
/// ```rust,ignore
/// require!(new_mood <= MAX_MOOD, CompanionError::InvalidMoodValue);
/// ```
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

/// Require two [`Address`] values to be equal.
///
/// ```rust,ignore
/// require_keys_eq!(&companion.owner, caller, CompanionError::Unauthorized);
/// ```
#[macro_export]
macro_rules! require_keys_eq {
    ($a:expr, $b:expr, $err:expr) => {
        if *$a != *$b {
            return Err($err.into());
        }
    };
}

/// Require `a == b` for scalar types.
#[macro_export]
macro_rules! require_eq {
    ($a:expr, $b:expr, $err:expr) => {
        if $a != $b {
            return Err($err.into());
        }
    };
}

#[cfg(feature = "log")]
macro_rules! program_log {
    ($($arg:tt)*) => {
        ::pinocchio_log::log!($($arg)*)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! program_log {
    ($msg:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

pub mod accessory;
pub mod accounts;
pub mod checks;
pub mod companion;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod header;
pub mod instruction;
#[cfg(not(target_os = "solana"))]
pub mod memory;
pub mod pda;
pub mod processor;
pub mod state;
pub mod store;

pub use error::CompanionError;

/// Deployed program id.
pub const ID: Address = Address::new_from_array(pinocchio_pubkey::pubkey!(
    "6HD4mpueEPSMWMFCVraYnKC4Kyg1KJyqZLMHPJEJgh63"
));

#[cfg(all(feature = "bpf-entrypoint", target_os = "solana"))]
mod entrypoint {
    use pinocchio::{no_allocator, nostd_panic_handler, program_entrypoint, AccountView, Address, ProgramResult};

    program_entrypoint!(process_instruction);
    no_allocator!();
    nostd_panic_handler!();

    pub fn process_instruction(
        program_id: &Address,
        accounts: &[AccountView],
        instruction_data: &[u8],
    ) -> ProgramResult {
        crate::processor::process(program_id, accounts, instruction_data)
    }
}
