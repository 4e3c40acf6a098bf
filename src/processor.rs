//! Runtime adapter: records in program-owned accounts, time from the Clock
//! sysvar.

use pinocchio::{
    cpi::{self, Seed, Signer},
    error::ProgramError,
    instruction::{InstructionAccount, InstructionView},
    sysvars::{clock::Clock as ClockSysvar, Sysvar},
    AccountView, Address, ProgramResult,
};

use crate::{
    checks::{check_owner, check_signer, check_writable, rent_exempt_min, SYSTEM_PROGRAM_ID},
    dispatch::dispatch,
    error::CompanionError,
    header::{decode_record, encode_record, Record},
    instruction::Instruction,
    pda::Derived,
    store::{Clock, RecordStore},
};

/// Decode the instruction and run it against the accounts the runtime passed in.
pub fn process(
    program_id: &Address,
    accounts: &[AccountView],
    instruction_data: &[u8],
) -> ProgramResult {
    let ix = Instruction::unpack(instruction_data)?;
    program_log!("Instruction: {}", ix.name());

    let mut store = AccountStore::new(program_id, accounts);
    dispatch(program_id, accounts, ix, &mut store, &SysvarClock)?;
    Ok(())
}

/// Reads time from the Clock sysvar.
pub struct SysvarClock;

impl Clock for SysvarClock {
    #[inline(always)]
    fn unix_timestamp(&self) -> Result<i64, ProgramError> {
        Ok(ClockSysvar::get()?.unix_timestamp)
    }
}

/// [`RecordStore`] over the instruction's accounts.
///
/// A record lives in the account whose address equals the derived address.
/// An account with no data holds no record; writing to one creates it
/// through the system program, funded by the record's owner and signed
/// with the derivation seeds.
pub struct AccountStore<'a> {
    program_id: &'a Address,
    accounts: &'a [AccountView],
}

impl<'a> AccountStore<'a> {
    pub fn new(program_id: &'a Address, accounts: &'a [AccountView]) -> Self {
        Self {
            program_id,
            accounts,
        }
    }

    fn find(&self, address: &Address) -> Result<&'a AccountView, ProgramError> {
        self.accounts
            .iter()
            .find(|acc| acc.address() == address)
            .ok_or_else(|| CompanionError::InvalidAccount.into())
    }

    /// Create the record account at `key`, funded by the record's owner.
    ///
    /// An address that already holds lamports cannot go through
    /// CreateAccount, so it is topped up to the rent floor and then
    /// allocated and assigned in place.
    fn create(&self, account: &AccountView, key: &Derived, space: usize) -> ProgramResult {
        let payer = self.find(key.owner())?;
        check_signer(payer)?;
        check_writable(payer)?;

        let required = rent_exempt_min(space);
        let bump = [key.bump()];
        let (raw_seeds, n) = key.signer_seeds(&bump);
        let seeds = [
            Seed::from(raw_seeds[0]),
            Seed::from(raw_seeds[1]),
            Seed::from(raw_seeds[2]),
            Seed::from(raw_seeds[3]),
        ];

        let balance = account.lamports();
        if balance == 0 {
            let ix = InstructionView {
                program_id: &SYSTEM_PROGRAM_ID,
                accounts: &[
                    InstructionAccount::writable_signer(payer.address()),
                    InstructionAccount::writable_signer(account.address()),
                ],
                data: &create_account_data(required, space as u64, self.program_id),
            };
            return cpi::invoke_signed(&ix, &[payer, account], &[Signer::from(&seeds[..n])]);
        }

        if balance < required {
            let ix = InstructionView {
                program_id: &SYSTEM_PROGRAM_ID,
                accounts: &[
                    InstructionAccount::writable_signer(payer.address()),
                    InstructionAccount::writable(account.address()),
                ],
                data: &transfer_data(required - balance),
            };
            cpi::invoke(&ix, &[payer, account])?;
        }

        let ix = InstructionView {
            program_id: &SYSTEM_PROGRAM_ID,
            accounts: &[InstructionAccount::writable_signer(account.address())],
            data: &allocate_data(space as u64),
        };
        cpi::invoke_signed(&ix, &[account], &[Signer::from(&seeds[..n])])?;

        let ix = InstructionView {
            program_id: &SYSTEM_PROGRAM_ID,
            accounts: &[InstructionAccount::writable_signer(account.address())],
            data: &assign_data(self.program_id),
        };
        cpi::invoke_signed(&ix, &[account], &[Signer::from(&seeds[..n])])
    }
}

impl RecordStore for AccountStore<'_> {
    fn exists(&self, key: &Derived) -> Result<bool, ProgramError> {
        Ok(!self.find(key.address())?.is_data_empty())
    }

    fn get<R: Record>(&self, key: &Derived) -> Result<Option<R>, ProgramError> {
        let account = self.find(key.address())?;
        if account.is_data_empty() {
            return Ok(None);
        }
        check_owner(account, self.program_id)?;
        let data = account.try_borrow()?;
        decode_record::<R>(&data).map(Some)
    }

    fn put<R: Record>(&mut self, key: &Derived, record: &R) -> Result<(), ProgramError> {
        let account = self.find(key.address())?;
        check_writable(account)?;
        if account.is_data_empty() {
            self.create(account, key, R::LEN)?;
        } else {
            check_owner(account, self.program_id)?;
        }
        let mut raw = account.try_borrow_mut()?;
        encode_record(record, &mut raw)
    }
}

// System program instruction indices.
const SYS_CREATE_ACCOUNT: u32 = 0;
const SYS_ASSIGN: u32 = 1;
const SYS_TRANSFER: u32 = 2;
const SYS_ALLOCATE: u32 = 8;

/// Build the 4 + 8 + 8 + 32 = 52 byte instruction data for CreateAccount.
fn create_account_data(lamports: u64, space: u64, owner: &Address) -> [u8; 52] {
    let mut data = [0u8; 52];
    data[0..4].copy_from_slice(&SYS_CREATE_ACCOUNT.to_le_bytes());
    data[4..12].copy_from_slice(&lamports.to_le_bytes());
    data[12..20].copy_from_slice(&space.to_le_bytes());
    data[20..52].copy_from_slice(owner.as_array());
    data
}

fn transfer_data(lamports: u64) -> [u8; 12] {
    let mut data = [0u8; 12];
    data[0..4].copy_from_slice(&SYS_TRANSFER.to_le_bytes());
    data[4..12].copy_from_slice(&lamports.to_le_bytes());
    data
}

fn allocate_data(space: u64) -> [u8; 12] {
    let mut data = [0u8; 12];
    data[0..4].copy_from_slice(&SYS_ALLOCATE.to_le_bytes());
    data[4..12].copy_from_slice(&space.to_le_bytes());
    data
}

fn assign_data(owner: &Address) -> [u8; 36] {
    let mut data = [0u8; 36];
    data[0..4].copy_from_slice(&SYS_ASSIGN.to_le_bytes());
    data[4..36].copy_from_slice(owner.as_array());
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_account_data_layout() {
        let owner = Address::new_from_array([5u8; 32]);
        let data = create_account_data(1_000, 58, &owner);
        assert_eq!(&data[0..4], &[0, 0, 0, 0]);
        assert_eq!(&data[4..12], &1_000u64.to_le_bytes());
        assert_eq!(&data[12..20], &58u64.to_le_bytes());
        assert_eq!(&data[20..52], &[5u8; 32]);
    }

    #[test]
    fn in_place_creation_data_layouts() {
        let transfer = transfer_data(7);
        assert_eq!(&transfer[0..4], &2u32.to_le_bytes());
        assert_eq!(&transfer[4..12], &7u64.to_le_bytes());

        let allocate = allocate_data(84);
        assert_eq!(&allocate[0..4], &8u32.to_le_bytes());
        assert_eq!(&allocate[4..12], &84u64.to_le_bytes());

        let owner = Address::new_from_array([6u8; 32]);
        let assign = assign_data(&owner);
        assert_eq!(&assign[0..4], &1u32.to_le_bytes());
        assert_eq!(&assign[4..36], &[6u8; 32]);
    }
}
