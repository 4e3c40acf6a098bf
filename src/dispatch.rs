//! Instruction routing.
//!
//! [`dispatch`] validates the accounts an instruction names and hands the
//! call to the companion or accessory store. Validation always completes
//! before the store is touched:
//!
//! 1. record accounts are writable
//! 2. the owner account signed (`Unauthorized` otherwise), and is writable
//!    when it pays for a new record
//! 3. the record account's address equals the derivation from the owner
//!    (`InvalidAccount` otherwise)

use pinocchio::{error::ProgramError, Address};

use crate::{
    accessory::Accessories,
    accounts::AccountList,
    checks::{check_derived, AccountInput},
    companion::Companions,
    instruction::Instruction,
    pda::{derive_accessory, derive_companion},
    state::{Accessory, AccessoryType, Companion},
    store::{Clock, RecordStore},
};

/// What a successful instruction produced.
#[derive(Clone, PartialEq, Eq)]
pub enum Outcome {
    CompanionCreated(Companion),
    CompanionUpdated,
    AccessoryMinted(Accessory),
    /// New value of `equipped`.
    Equipped(bool),
}

pub fn dispatch<A, S, C>(
    program_id: &Address,
    accounts: &[A],
    ix: Instruction,
    store: &mut S,
    clock: &C,
) -> Result<Outcome, ProgramError>
where
    A: AccountInput,
    S: RecordStore,
    C: Clock,
{
    match ix {
        Instruction::InitializeCompanion => {
            let mut accs = AccountList::new(accounts);
            let companion = accs.next_writable()?;
            let owner = accs.next_writable_signer()?;
            accs.next_system_program()?;
            check_derived(companion, &derive_companion(program_id, owner.address())?)?;

            Companions::new(program_id, store, clock)
                .initialize(owner.address())
                .map(Outcome::CompanionCreated)
        }
        Instruction::UpdateMood { new_mood } => {
            let mut accs = AccountList::new(accounts);
            let companion = accs.next_writable()?;
            let owner = accs.next_signer()?;
            check_derived(companion, &derive_companion(program_id, owner.address())?)?;

            Companions::new(program_id, store, clock)
                .update_mood(owner.address(), owner.address(), new_mood)
                .map(|()| Outcome::CompanionUpdated)
        }
        Instruction::RecordInteraction => {
            let mut accs = AccountList::new(accounts);
            let companion = accs.next_writable()?;
            let owner = accs.next_signer()?;
            check_derived(companion, &derive_companion(program_id, owner.address())?)?;

            Companions::new(program_id, store, clock)
                .record_interaction(owner.address(), owner.address())
                .map(|()| Outcome::CompanionUpdated)
        }
        Instruction::MintYellowRibbon { name } => {
            let accessory_type = AccessoryType::YellowRibbon;
            let mut accs = AccountList::new(accounts);
            let accessory = accs.next_writable()?;
            let owner = accs.next_writable_signer()?;
            accs.next_system_program()?;
            check_derived(
                accessory,
                &derive_accessory(program_id, owner.address(), accessory_type)?,
            )?;

            Accessories::new(program_id, store, clock)
                .mint(owner.address(), owner.address(), accessory_type, name)
                .map(Outcome::AccessoryMinted)
        }
        Instruction::ToggleAccessory { accessory_type } => {
            let mut accs = AccountList::new(accounts);
            let accessory = accs.next_writable()?;
            let owner = accs.next_signer()?;
            check_derived(
                accessory,
                &derive_accessory(program_id, owner.address(), accessory_type)?,
            )?;

            Accessories::new(program_id, store, clock)
                .toggle_equip(owner.address(), owner.address(), accessory_type)
                .map(Outcome::Equipped)
        }
    }
}
