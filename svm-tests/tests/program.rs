//! End-to-end tests: the compiled program under Mollusk, driven with raw
//! instruction data.
//!
//! Requires the program .so. Build it first:
//!
//! ```sh
//! cargo build-sbf
//! ```
//!
//! Then run:
//!
//! ```sh
//! cd svm-tests && cargo test
//! ```

use companion_program::{
    checks::rent_exempt_min,
    header::{decode_record, Record},
    pda::{accessory_address, companion_address},
    state::{Accessory, AccessoryType, Companion},
    CompanionError, ID,
};
use mollusk_svm::{
    program::keyed_account_for_system_program,
    result::{InstructionResult, ProgramResult},
    Mollusk,
};
use pinocchio::Address;
use solana_account::Account;
use solana_instruction::{AccountMeta, Instruction};
use solana_program_error::ProgramError;
use solana_pubkey::Pubkey;

const T0: i64 = 1_700_000_000;

fn pubkey(address: &Address) -> Pubkey {
    Pubkey::new_from_array(address.to_bytes())
}

fn program_id() -> Pubkey {
    pubkey(&ID)
}

fn mollusk() -> Mollusk {
    let mut mollusk = Mollusk::new(&program_id(), "../target/deploy/companion_program");
    mollusk.sysvars.clock.unix_timestamp = T0;
    mollusk
}

/// The ledger as seen by the tests: every account the instructions touch.
struct Ledger {
    accounts: Vec<(Pubkey, Account)>,
}

impl Ledger {
    fn new(accounts: Vec<(Pubkey, Account)>) -> Self {
        Self { accounts }
    }

    fn get(&self, key: &Pubkey) -> &Account {
        &self
            .accounts
            .iter()
            .find(|(k, _)| k == key)
            .expect("account in ledger")
            .1
    }

    /// Run `ix`, keep the resulting accounts only if it succeeded.
    fn run(&mut self, mollusk: &Mollusk, ix: &Instruction) -> InstructionResult {
        let result = mollusk.process_instruction(ix, &self.accounts);
        if matches!(result.program_result, ProgramResult::Success) {
            for (key, account) in &result.resulting_accounts {
                if let Some(slot) = self.accounts.iter_mut().find(|(k, _)| k == key) {
                    slot.1 = account.clone();
                }
            }
        }
        result
    }
}

fn wallet(lamports: u64) -> Account {
    Account {
        lamports,
        data: vec![],
        owner: Pubkey::new_from_array([0u8; 32]),
        executable: false,
        rent_epoch: 0,
    }
}

fn owner_key(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

fn companion_key(owner: &Pubkey) -> Pubkey {
    let (address, _) = companion_address(&Address::new_from_array(owner.to_bytes())).unwrap();
    pubkey(&address)
}

fn ribbon_key(owner: &Pubkey) -> Pubkey {
    let (address, _) = accessory_address(
        &Address::new_from_array(owner.to_bytes()),
        AccessoryType::YellowRibbon,
    )
    .unwrap();
    pubkey(&address)
}

fn ledger_for(owner: &Pubkey) -> Ledger {
    Ledger::new(vec![
        (*owner, wallet(10_000_000_000)),
        (companion_key(owner), wallet(0)),
        (ribbon_key(owner), wallet(0)),
        keyed_account_for_system_program(),
    ])
}

fn with_system_program(record: Pubkey, owner: &Pubkey, data: Vec<u8>) -> Instruction {
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new(record, false),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(keyed_account_for_system_program().0, false),
        ],
        data,
    }
}

fn owner_signed(record: Pubkey, owner: &Pubkey, data: Vec<u8>) -> Instruction {
    Instruction {
        program_id: program_id(),
        accounts: vec![
            AccountMeta::new(record, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data,
    }
}

fn companion_error(result: &InstructionResult) -> Option<CompanionError> {
    match &result.program_result {
        ProgramResult::Failure(ProgramError::Custom(code)) => CompanionError::from_code(*code),
        _ => None,
    }
}

fn assert_success(result: &InstructionResult) {
    assert!(
        matches!(result.program_result, ProgramResult::Success),
        "{:?}",
        result.program_result
    );
}

fn companion_of(ledger: &Ledger, owner: &Pubkey) -> Companion {
    decode_record::<Companion>(&ledger.get(&companion_key(owner)).data).unwrap()
}

fn ribbon_of(ledger: &Ledger, owner: &Pubkey) -> Accessory {
    decode_record::<Accessory>(&ledger.get(&ribbon_key(owner)).data).unwrap()
}

fn mint_data(name: &str) -> Vec<u8> {
    let mut data = vec![3u8];
    data.extend_from_slice(&(name.len() as u32).to_le_bytes());
    data.extend_from_slice(name.as_bytes());
    data
}

#[test]
fn initialize_creates_a_rent_exempt_program_owned_record() {
    let mollusk = mollusk();
    let alice = owner_key(1);
    let mut ledger = ledger_for(&alice);

    let result = ledger.run(&mollusk, &with_system_program(companion_key(&alice), &alice, vec![0]));
    assert_success(&result);

    let account = ledger.get(&companion_key(&alice));
    assert_eq!(account.owner, program_id());
    assert_eq!(account.data.len(), Companion::LEN);
    assert_eq!(account.lamports, rent_exempt_min(Companion::LEN));

    let companion = companion_of(&ledger, &alice);
    assert_eq!(companion.owner.to_bytes(), alice.to_bytes());
    assert_eq!(companion.mood, 50);
    assert_eq!(companion.interaction_count, 0);
    assert_eq!(companion.last_interaction, T0);
}

#[test]
fn second_initialize_is_already_initialized() {
    let mollusk = mollusk();
    let alice = owner_key(1);
    let mut ledger = ledger_for(&alice);
    let init = with_system_program(companion_key(&alice), &alice, vec![0]);

    assert_success(&ledger.run(&mollusk, &init));
    assert_success(&ledger.run(&mollusk, &owner_signed(companion_key(&alice), &alice, vec![1, 90])));
    let before = ledger.get(&companion_key(&alice)).data.clone();

    let again = ledger.run(&mollusk, &init);
    assert_eq!(companion_error(&again), Some(CompanionError::AlreadyInitialized));
    assert_eq!(ledger.get(&companion_key(&alice)).data, before);
}

#[test]
fn full_workflow_over_raw_instruction_data() {
    let mut mollusk = mollusk();
    let alice = owner_key(1);
    let mut ledger = ledger_for(&alice);
    let companion = companion_key(&alice);
    let ribbon = ribbon_key(&alice);

    assert_success(&ledger.run(&mollusk, &with_system_program(companion, &alice, vec![0])));
    assert_eq!(companion_of(&ledger, &alice).mood, 50);

    assert_success(&ledger.run(&mollusk, &owner_signed(companion, &alice, vec![1, 80])));
    assert_eq!(companion_of(&ledger, &alice).mood, 80);

    let too_happy = ledger.run(&mollusk, &owner_signed(companion, &alice, vec![1, 101]));
    assert_eq!(companion_error(&too_happy), Some(CompanionError::InvalidMoodValue));

    mollusk.sysvars.clock.unix_timestamp = T0 + 5;
    assert_success(&ledger.run(&mollusk, &owner_signed(companion, &alice, vec![2])));
    let after_one = companion_of(&ledger, &alice);
    assert_eq!(after_one.interaction_count, 1);
    assert_eq!(after_one.last_interaction, T0 + 5);

    // Same clock second: still counted, still strictly later.
    assert_success(&ledger.run(&mollusk, &owner_signed(companion, &alice, vec![2])));
    let after_two = companion_of(&ledger, &alice);
    assert_eq!(after_two.interaction_count, 2);
    assert!(after_two.last_interaction > after_one.last_interaction);

    assert_success(&ledger.run(
        &mollusk,
        &with_system_program(ribbon, &alice, mint_data("Sunshine Ribbon")),
    ));
    let minted = ribbon_of(&ledger, &alice);
    assert_eq!(minted.name.as_str(), "Sunshine Ribbon");
    assert_eq!(minted.accessory_type, AccessoryType::YellowRibbon);
    assert!(!minted.equipped);
    assert_eq!(ledger.get(&ribbon).data.len(), Accessory::LEN);

    assert_success(&ledger.run(&mollusk, &owner_signed(ribbon, &alice, vec![4])));
    assert!(ribbon_of(&ledger, &alice).equipped);
    assert_success(&ledger.run(&mollusk, &owner_signed(ribbon, &alice, vec![4, 0])));
    assert!(!ribbon_of(&ledger, &alice).equipped);

    // Equipping never touched the companion.
    assert!(companion_of(&ledger, &alice) == after_two);
}

#[test]
fn prefunded_companion_address_still_initializes() {
    let mollusk = mollusk();
    let alice = owner_key(1);
    let mut ledger = ledger_for(&alice);
    let companion = companion_key(&alice);
    if let Some(slot) = ledger.accounts.iter_mut().find(|(k, _)| *k == companion) {
        slot.1 = wallet(1);
    }

    assert_success(&ledger.run(&mollusk, &with_system_program(companion, &alice, vec![0])));

    let account = ledger.get(&companion);
    assert_eq!(account.owner, program_id());
    assert_eq!(account.lamports, rent_exempt_min(Companion::LEN));
    assert_eq!(companion_of(&ledger, &alice).mood, 50);
}

#[test]
fn ribbon_address_funded_past_rent_still_mints() {
    let mollusk = mollusk();
    let alice = owner_key(1);
    let mut ledger = ledger_for(&alice);
    let ribbon = ribbon_key(&alice);
    let gift = rent_exempt_min(Accessory::LEN) + 1_000;
    if let Some(slot) = ledger.accounts.iter_mut().find(|(k, _)| *k == ribbon) {
        slot.1 = wallet(gift);
    }

    assert_success(&ledger.run(&mollusk, &with_system_program(ribbon, &alice, mint_data("Gift"))));

    let account = ledger.get(&ribbon);
    assert_eq!(account.owner, program_id());
    assert_eq!(account.lamports, gift);
    assert_eq!(ribbon_of(&ledger, &alice).name.as_str(), "Gift");
}

#[test]
fn stranger_cannot_update_someone_elses_companion() {
    let mollusk = mollusk();
    let alice = owner_key(1);
    let mallory = owner_key(66);
    let mut ledger = ledger_for(&alice);
    ledger.accounts.push((mallory, wallet(1_000_000_000)));
    let companion = companion_key(&alice);

    assert_success(&ledger.run(&mollusk, &with_system_program(companion, &alice, vec![0])));
    let before = ledger.get(&companion).data.clone();

    let result = ledger.run(&mollusk, &owner_signed(companion, &mallory, vec![1, 10]));
    assert_eq!(companion_error(&result), Some(CompanionError::InvalidAccount));
    assert_eq!(ledger.get(&companion).data, before);
}

#[test]
fn truncated_instruction_data_is_rejected() {
    let mollusk = mollusk();
    let alice = owner_key(1);
    let mut ledger = ledger_for(&alice);

    let result = ledger.run(&mollusk, &owner_signed(companion_key(&alice), &alice, vec![1]));
    assert!(matches!(
        result.program_result,
        ProgramResult::Failure(ProgramError::InvalidInstructionData)
    ));
}
