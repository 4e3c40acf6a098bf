use pinocchio::error::ProgramError;

use crate::checks::{check_signer, check_system_program, check_writable, AccountInput};

/// Iterator-style account accessor with inline constraint checks.
///
/// Replaces index arithmetic in the dispatcher:
///
/// ```rust,ignore
/// let mut accs = AccountList::new(accounts);
/// let companion = accs.next_writable()?;
/// let owner     = accs.next_writable_signer()?;
/// let _system   = accs.next_system_program()?;
/// ```
pub struct AccountList<'a, A> {
    accounts: &'a [A],
    pos: usize,
}

impl<'a, A: AccountInput> AccountList<'a, A> {
    #[inline(always)]
    pub fn new(accounts: &'a [A]) -> Self {
        Self { accounts, pos: 0 }
    }

    /// Consume the next account with no additional checks.
    #[inline(always)]
    pub fn next(&mut self) -> Result<&'a A, ProgramError> {
        let acc = self
            .accounts
            .get(self.pos)
            .ok_or(ProgramError::NotEnoughAccountKeys)?;
        self.pos += 1;
        Ok(acc)
    }

    /// Consume the next account and verify it signed the transaction.
    #[inline(always)]
    pub fn next_signer(&mut self) -> Result<&'a A, ProgramError> {
        let acc = self.next()?;
        check_signer(acc)?;
        Ok(acc)
    }

    /// Consume the next account and verify it is marked writable.
    #[inline(always)]
    pub fn next_writable(&mut self) -> Result<&'a A, ProgramError> {
        let acc = self.next()?;
        check_writable(acc)?;
        Ok(acc)
    }

    /// Consume the next account and verify it is a writable signer.
    ///
    /// The owner when it also pays for a new record.
    #[inline(always)]
    pub fn next_writable_signer(&mut self) -> Result<&'a A, ProgramError> {
        let acc = self.next()?;
        check_signer(acc)?;
        check_writable(acc)?;
        Ok(acc)
    }

    /// Consume the next account and verify it is the system program.
    #[inline(always)]
    pub fn next_system_program(&mut self) -> Result<&'a A, ProgramError> {
        let acc = self.next()?;
        check_system_program(acc)?;
        Ok(acc)
    }
}
