use pinocchio::{error::ProgramError, Address};

use crate::{
    error::CompanionError,
    pda::{derive_companion, Derived},
    state::{Companion, INITIAL_MOOD, MAX_MOOD},
    store::{check_owner_is, Clock, RecordStore},
};

/// Lifecycle of the one companion record each owner may hold.
pub struct Companions<'a, S, C> {
    program_id: &'a Address,
    store: &'a mut S,
    clock: &'a C,
}

impl<'a, S: RecordStore, C: Clock> Companions<'a, S, C> {
    pub fn new(program_id: &'a Address, store: &'a mut S, clock: &'a C) -> Self {
        Self {
            program_id,
            store,
            clock,
        }
    }

    /// Create `owner`'s companion with a neutral mood and no interactions.
    pub fn initialize(&mut self, owner: &Address) -> Result<Companion, ProgramError> {
        let key = derive_companion(self.program_id, owner)?;
        crate::require!(
            !self.store.exists(&key)?,
            CompanionError::AlreadyInitialized
        );

        let companion = Companion {
            owner: *owner,
            mood: INITIAL_MOOD,
            interaction_count: 0,
            last_interaction: self.clock.unix_timestamp()?,
            bump: key.bump(),
        };
        self.store.put(&key, &companion)?;

        program_log!("Companion initialized. Starting mood: {}", companion.mood);
        Ok(companion)
    }

    /// Set the mood. Only the upper bound is checked; `u8` has no negatives.
    pub fn update_mood(
        &mut self,
        owner: &Address,
        caller: &Address,
        new_mood: u8,
    ) -> Result<(), ProgramError> {
        let key = derive_companion(self.program_id, owner)?;
        let mut companion = self.load(&key)?;
        check_owner_is(&companion.owner, caller)?;
        crate::require!(new_mood <= MAX_MOOD, CompanionError::InvalidMoodValue);

        companion.mood = new_mood;
        self.store.put(&key, &companion)?;

        program_log!("Mood updated to: {}", new_mood);
        Ok(())
    }

    /// Count one interaction and refresh `last_interaction`.
    ///
    /// `last_interaction` always moves forward by at least one second, so
    /// two calls inside the same clock second still order strictly.
    pub fn record_interaction(
        &mut self,
        owner: &Address,
        caller: &Address,
    ) -> Result<(), ProgramError> {
        let key = derive_companion(self.program_id, owner)?;
        let mut companion = self.load(&key)?;
        check_owner_is(&companion.owner, caller)?;

        companion.interaction_count = companion
            .interaction_count
            .checked_add(1)
            .ok_or(CompanionError::InteractionOverflow)?;
        let floor = companion
            .last_interaction
            .checked_add(1)
            .ok_or(CompanionError::InteractionOverflow)?;
        companion.last_interaction = self.clock.unix_timestamp()?.max(floor);
        self.store.put(&key, &companion)?;

        program_log!("Interaction recorded. Total: {}", companion.interaction_count);
        Ok(())
    }

    pub fn get(&self, owner: &Address) -> Result<Option<Companion>, ProgramError> {
        let key = derive_companion(self.program_id, owner)?;
        self.store.get(&key)
    }

    fn load(&self, key: &Derived) -> Result<Companion, ProgramError> {
        let companion: Companion = self.store.get(key)?.ok_or(CompanionError::NotFound)?;
        crate::require_eq!(companion.bump, key.bump(), CompanionError::InvalidAccount);
        Ok(companion)
    }
}
