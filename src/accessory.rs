use pinocchio::{error::ProgramError, Address};

use crate::{
    error::CompanionError,
    pda::{derive_accessory, Derived},
    state::{Accessory, AccessoryName, AccessoryType},
    store::{check_owner_is, Clock, RecordStore},
};

/// Lifecycle of accessory records, one per (owner, accessory type).
///
/// Equipping only flips the accessory's own flag; the owner's companion
/// record is never read or written here.
pub struct Accessories<'a, S, C> {
    program_id: &'a Address,
    store: &'a mut S,
    clock: &'a C,
}

impl<'a, S: RecordStore, C: Clock> Accessories<'a, S, C> {
    pub fn new(program_id: &'a Address, store: &'a mut S, clock: &'a C) -> Self {
        Self {
            program_id,
            store,
            clock,
        }
    }

    /// Mint an unequipped accessory of `accessory_type` for `owner`.
    pub fn mint(
        &mut self,
        owner: &Address,
        caller: &Address,
        accessory_type: AccessoryType,
        name: &str,
    ) -> Result<Accessory, ProgramError> {
        check_owner_is(owner, caller)?;
        let name = AccessoryName::new(name)?;
        let key = derive_accessory(self.program_id, owner, accessory_type)?;
        crate::require!(
            !self.store.exists(&key)?,
            CompanionError::AlreadyInitialized
        );

        let accessory = Accessory {
            owner: *owner,
            name,
            accessory_type,
            equipped: false,
            mint_date: self.clock.unix_timestamp()?,
            bump: key.bump(),
        };
        self.store.put(&key, &accessory)?;

        program_log!("Accessory minted: {}", accessory.name.as_str());
        Ok(accessory)
    }

    /// Flip `equipped` and return the new value.
    pub fn toggle_equip(
        &mut self,
        owner: &Address,
        caller: &Address,
        accessory_type: AccessoryType,
    ) -> Result<bool, ProgramError> {
        let key = derive_accessory(self.program_id, owner, accessory_type)?;
        let mut accessory = self.load(&key)?;
        check_owner_is(&accessory.owner, caller)?;

        accessory.equipped = !accessory.equipped;
        self.store.put(&key, &accessory)?;

        program_log!("Accessory equipped: {}", accessory.equipped as u8);
        Ok(accessory.equipped)
    }

    pub fn get(
        &self,
        owner: &Address,
        accessory_type: AccessoryType,
    ) -> Result<Option<Accessory>, ProgramError> {
        let key = derive_accessory(self.program_id, owner, accessory_type)?;
        self.store.get(&key)
    }

    fn load(&self, key: &Derived) -> Result<Accessory, ProgramError> {
        let accessory: Accessory = self.store.get(key)?.ok_or(CompanionError::NotFound)?;
        crate::require_eq!(accessory.bump, key.bump(), CompanionError::InvalidAccount);
        Ok(accessory)
    }
}
