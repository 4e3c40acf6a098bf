use pinocchio::{error::ProgramError, AccountView, Address};

use crate::{error::CompanionError, pda::Derived};

/// The canonical system program address (all-zero pubkey).
pub const SYSTEM_PROGRAM_ID: Address = Address::new_from_array([0u8; 32]);

/// The parts of an instruction account the dispatcher looks at.
///
/// Implemented for the runtime's [`AccountView`] and, on the host, for
/// [`HostAccount`](crate::memory::HostAccount) so dispatch can be tested
/// without a validator.
pub trait AccountInput {
    fn address(&self) -> &Address;
    fn is_signer(&self) -> bool;
    fn is_writable(&self) -> bool;
}

impl AccountInput for AccountView {
    #[inline(always)]
    fn address(&self) -> &Address {
        AccountView::address(self)
    }

    #[inline(always)]
    fn is_signer(&self) -> bool {
        AccountView::is_signer(self)
    }

    #[inline(always)]
    fn is_writable(&self) -> bool {
        AccountView::is_writable(self)
    }
}

/// Verify the account signed the transaction. A missing owner signature is
/// an authorization failure, not a framing error.
#[inline(always)]
pub fn check_signer<A: AccountInput>(account: &A) -> Result<(), ProgramError> {
    if !account.is_signer() {
        return Err(CompanionError::Unauthorized.into());
    }
    Ok(())
}

/// Verify the account is marked writable in the transaction.
#[inline(always)]
pub fn check_writable<A: AccountInput>(account: &A) -> Result<(), ProgramError> {
    if !account.is_writable() {
        return Err(ProgramError::InvalidArgument);
    }
    Ok(())
}

/// Verify the account is the canonical system program.
#[inline(always)]
pub fn check_system_program<A: AccountInput>(account: &A) -> Result<(), ProgramError> {
    if *account.address() != SYSTEM_PROGRAM_ID {
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Verify the account's address equals its expected derivation.
#[inline(always)]
pub fn check_derived<A: AccountInput>(account: &A, expected: &Derived) -> Result<(), ProgramError> {
    if account.address() != expected.address() {
        return Err(CompanionError::InvalidAccount.into());
    }
    Ok(())
}

/// Verify the account is owned by `program_id`.
#[inline(always)]
pub fn check_owner(account: &AccountView, program_id: &Address) -> Result<(), ProgramError> {
    if !account.owned_by(program_id) {
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

/// Approximate minimum lamports for rent exemption at the current mainnet rate.
///
/// Formula: `(128 + data_len) * 6960`
#[inline(always)]
pub fn rent_exempt_min(data_len: usize) -> u64 {
    (128u64 + data_len as u64).saturating_mul(6960)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{memory::HostAccount, pda::derive_companion, testing::{owner, PROGRAM}};

    #[test]
    fn unsigned_owner_is_unauthorized() {
        let acc = HostAccount::writable(owner(1));
        assert_eq!(check_signer(&acc), Err(CompanionError::Unauthorized.into()));
        assert!(check_signer(&HostAccount::signer(owner(1))).is_ok());
    }

    #[test]
    fn readonly_account_is_not_writable() {
        let acc = HostAccount::readonly(owner(1));
        assert_eq!(check_writable(&acc), Err(ProgramError::InvalidArgument));
    }

    #[test]
    fn derived_address_must_match() {
        let alice = owner(1);
        let expected = derive_companion(&PROGRAM, &alice).unwrap();
        let right = HostAccount::writable(*expected.address());
        let wrong = HostAccount::writable(owner(2));
        assert!(check_derived(&right, &expected).is_ok());
        assert_eq!(
            check_derived(&wrong, &expected),
            Err(CompanionError::InvalidAccount.into())
        );
    }

    #[test]
    fn system_program_is_the_zero_address() {
        assert!(check_system_program(&HostAccount::readonly(SYSTEM_PROGRAM_ID)).is_ok());
        assert_eq!(
            check_system_program(&HostAccount::readonly(owner(1))),
            Err(ProgramError::IncorrectProgramId)
        );
    }

    #[test]
    fn rent_floor_grows_with_size() {
        assert_eq!(rent_exempt_min(0), 128 * 6960);
        assert!(rent_exempt_min(84) > rent_exempt_min(58));
    }
}
