//! Host-side ledger fakes.
//!
//! [`MemoryStore`] keeps records as the exact bytes an account would hold,
//! so anything read back has gone through the same encoding external
//! readers see.

use std::{cell::Cell, collections::BTreeMap};

use pinocchio::{error::ProgramError, Address};

use crate::{
    checks::AccountInput,
    header::{decode_record, encode_record, Record},
    pda::Derived,
    store::{Clock, RecordStore},
};

#[derive(Default)]
pub struct MemoryStore {
    accounts: BTreeMap<[u8; 32], Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw account bytes at `address`.
    pub fn raw(&self, address: &Address) -> Option<&[u8]> {
        self.accounts.get(address.as_array()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, key: &Derived) -> Result<bool, ProgramError> {
        Ok(self.accounts.contains_key(key.address().as_array()))
    }

    fn get<R: Record>(&self, key: &Derived) -> Result<Option<R>, ProgramError> {
        self.raw(key.address()).map(decode_record::<R>).transpose()
    }

    fn put<R: Record>(&mut self, key: &Derived, record: &R) -> Result<(), ProgramError> {
        let mut data = vec![0u8; R::LEN];
        encode_record(record, &mut data)?;
        self.accounts.insert(key.address().to_bytes(), data);
        Ok(())
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: i64) {
        self.now.set(now);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn unix_timestamp(&self) -> Result<i64, ProgramError> {
        Ok(self.now.get())
    }
}

/// An instruction account as seen by the dispatcher, without a runtime.
#[derive(Clone)]
pub struct HostAccount {
    pub address: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl HostAccount {
    pub fn readonly(address: Address) -> Self {
        Self {
            address,
            is_signer: false,
            is_writable: false,
        }
    }

    pub fn writable(address: Address) -> Self {
        Self {
            is_writable: true,
            ..Self::readonly(address)
        }
    }

    pub fn signer(address: Address) -> Self {
        Self {
            is_signer: true,
            ..Self::readonly(address)
        }
    }

    pub fn writable_signer(address: Address) -> Self {
        Self {
            address,
            is_signer: true,
            is_writable: true,
        }
    }
}

impl AccountInput for HostAccount {
    fn address(&self) -> &Address {
        &self.address
    }

    fn is_signer(&self) -> bool {
        self.is_signer
    }

    fn is_writable(&self) -> bool {
        self.is_writable
    }
}
