//! Seams between the state-transition logic and the ledger.
//!
//! The companion and accessory stores never touch accounts directly; they
//! read and write records through a [`RecordStore`] and read time through a
//! [`Clock`]. On-chain both are backed by the runtime (see
//! [`processor`](crate::processor)); host tests use
//! [`MemoryStore`](crate::memory::MemoryStore) and
//! [`ManualClock`](crate::memory::ManualClock).

use pinocchio::{error::ProgramError, Address};

use crate::{header::Record, pda::Derived};

/// Key-value access to records at derived addresses.
///
/// `put` replaces the whole record in one write, so a failed operation
/// leaves whatever was stored before untouched.
pub trait RecordStore {
    /// `true` if any record occupies `key`'s address.
    fn exists(&self, key: &Derived) -> Result<bool, ProgramError>;

    /// Decode the record at `key`, or `None` if the address is empty.
    fn get<R: Record>(&self, key: &Derived) -> Result<Option<R>, ProgramError>;

    /// Store `record` at `key`, creating the backing account if needed.
    fn put<R: Record>(&mut self, key: &Derived, record: &R) -> Result<(), ProgramError>;
}

/// Source of the current unix timestamp.
pub trait Clock {
    fn unix_timestamp(&self) -> Result<i64, ProgramError>;
}

/// Fail with `Unauthorized` unless `caller` is the recorded owner.
#[inline(always)]
pub(crate) fn check_owner_is(recorded: &Address, caller: &Address) -> Result<(), ProgramError> {
    crate::require_keys_eq!(recorded, caller, crate::error::CompanionError::Unauthorized);
    Ok(())
}
