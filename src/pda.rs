//! Program-derived record addresses.
//!
//! Every record lives at an address derived from a namespace seed, the
//! owner's address and, for accessories, the accessory type label:
//!
//! ```text
//! companion: ["companion", owner]
//! accessory: ["accessory", owner, "yellow_ribbon"]
//! ```
//!
//! The address is `sha256(seeds.. || bump || program_id || "ProgramDerivedAddress")`
//! for the highest bump whose hash is not a valid ed25519 point, so no
//! keypair can ever sign for it.
//!
//! # On-chain vs off-chain
//!
//! - On `target_os = "solana"` the bump search goes through the
//!   `find_program_address` syscall.
//! - Off-chain the same search runs in pure Rust (`pinocchio_pubkey::derive_address`
//!   for the hash, ed25519-dalek for the curve check) and yields identical
//!   results, so clients and host tests derive the exact on-chain addresses.

use pinocchio::{error::ProgramError, Address};

use crate::state::AccessoryType;

pub const COMPANION_SEED: &[u8] = b"companion";
pub const ACCESSORY_SEED: &[u8] = b"accessory";

const MAX_SEED_LEN: usize = 32;

/// A derived record address plus the seeds and bump that produced it.
///
/// Holding the seeds lets the on-chain store sign for the address when it
/// has to create the account.
#[derive(Clone)]
pub struct Derived<'a> {
    namespace: &'static [u8],
    owner: &'a Address,
    label: Option<&'static [u8]>,
    address: Address,
    bump: u8,
}

impl<'a> Derived<'a> {
    #[inline(always)]
    pub fn address(&self) -> &Address {
        &self.address
    }

    #[inline(always)]
    pub fn bump(&self) -> u8 {
        self.bump
    }

    #[inline(always)]
    pub fn owner(&self) -> &'a Address {
        self.owner
    }

    /// Seeds including the trailing bump, as `(seeds, count)`.
    ///
    /// `bump` must be `[self.bump()]`; it is passed in so the returned
    /// slices can borrow it.
    pub fn signer_seeds<'b>(&'b self, bump: &'b [u8; 1]) -> ([&'b [u8]; 4], usize) {
        let mut seeds: [&[u8]; 4] = [&[]; 4];
        seeds[0] = self.namespace;
        seeds[1] = self.owner.as_ref();
        let mut n = 2;
        if let Some(label) = self.label {
            seeds[n] = label;
            n += 1;
        }
        seeds[n] = &bump[..];
        (seeds, n + 1)
    }
}

/// Derive a record address under `namespace` for `owner`.
///
/// Fails with `InvalidSeeds` for the all-zero (empty) owner.
pub fn derive<'a>(
    program_id: &Address,
    namespace: &'static [u8],
    owner: &'a Address,
    label: Option<&'static [u8]>,
) -> Result<Derived<'a>, ProgramError> {
    if owner.as_ref().iter().all(|b| *b == 0) {
        return Err(ProgramError::InvalidSeeds);
    }
    let (address, bump) = match label {
        Some(label) => find_program_address(&[namespace, owner.as_ref(), label], program_id)?,
        None => find_program_address(&[namespace, owner.as_ref()], program_id)?,
    };
    Ok(Derived {
        namespace,
        owner,
        label,
        address,
        bump,
    })
}

#[inline(always)]
pub fn derive_companion<'a>(
    program_id: &Address,
    owner: &'a Address,
) -> Result<Derived<'a>, ProgramError> {
    derive(program_id, COMPANION_SEED, owner, None)
}

#[inline(always)]
pub fn derive_accessory<'a>(
    program_id: &Address,
    owner: &'a Address,
    accessory_type: AccessoryType,
) -> Result<Derived<'a>, ProgramError> {
    derive(program_id, ACCESSORY_SEED, owner, Some(accessory_type.label()))
}

/// Companion address and bump for `owner` under this program's [`ID`](crate::ID).
pub fn companion_address(owner: &Address) -> Result<(Address, u8), ProgramError> {
    let derived = derive_companion(&crate::ID, owner)?;
    Ok((derived.address, derived.bump))
}

/// Accessory address and bump for `owner` under this program's [`ID`](crate::ID).
pub fn accessory_address(
    owner: &Address,
    accessory_type: AccessoryType,
) -> Result<(Address, u8), ProgramError> {
    let derived = derive_accessory(&crate::ID, owner, accessory_type)?;
    Ok((derived.address, derived.bump))
}

/// Hash seeds and a known bump into an address. No curve check, no search.
///
/// Uses `pinocchio_pubkey::derive_address`, which skips the bump search.
pub fn create_program_address<const N: usize>(
    seeds: &[&[u8]; N],
    bump: u8,
    program_id: &Address,
) -> Result<Address, ProgramError> {
    if seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(ProgramError::MaxSeedLengthExceeded);
    }
    Ok(Address::new_from_array(pinocchio_pubkey::derive_address(
        seeds,
        Some(bump),
        program_id.as_array(),
    )))
}

/// Search bumps from 255 down for the first off-curve address.
pub fn find_program_address<const N: usize>(
    seeds: &[&[u8]; N],
    program_id: &Address,
) -> Result<(Address, u8), ProgramError> {
    #[cfg(target_os = "solana")]
    {
        Ok(Address::find_program_address(seeds, program_id))
    }
    #[cfg(not(target_os = "solana"))]
    {
        for bump in (0..=u8::MAX).rev() {
            let candidate = create_program_address(seeds, bump, program_id)?;
            if !is_on_curve(candidate.as_array()) {
                return Ok((candidate, bump));
            }
        }
        Err(ProgramError::InvalidSeeds)
    }
}

/// `true` if `bytes` decompress to an ed25519 point, i.e. a usable public key.
#[cfg(not(target_os = "solana"))]
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    ed25519_dalek::VerifyingKey::from_bytes(bytes).is_ok()
}
