//! Versioned record header and the [`Record`] encoding contract.
//!
//! Every record starts with the same 8-byte header so external readers can
//! identify and version-check raw account bytes before decoding:
//!
//! ```text
//! [0]    u8   discriminator  (record type tag)
//! [1]    u8   version        (schema version, bumped on layout change)
//! [2]    u8   flags          (reserved for future use, 0)
//! [3]    u8   reserved       (0)
//! [4..8] u32  data_len       (payload length in bytes)
//! ```

use pinocchio::error::ProgramError;

use crate::cursor::{DataWriter, SliceCursor};

pub const HEADER_LEN: usize = 8;

/// A fixed-size record stored behind the standard header.
pub trait Record: Sized {
    const DISCRIMINATOR: u8;
    const VERSION: u8;
    /// Payload length, excluding the header.
    const PAYLOAD_LEN: usize;
    /// Total account size.
    const LEN: usize = HEADER_LEN + Self::PAYLOAD_LEN;

    fn write_payload(&self, w: &mut DataWriter) -> Result<(), ProgramError>;

    fn read_payload(cur: &mut SliceCursor) -> Result<Self, ProgramError>;
}

/// Write the header. The reserved byte is always zeroed.
#[inline(always)]
pub fn write_header(
    data: &mut [u8],
    discriminator: u8,
    version: u8,
    flags: u8,
    data_len: u32,
) -> Result<(), ProgramError> {
    if data.len() < HEADER_LEN {
        return Err(ProgramError::AccountDataTooSmall);
    }
    data[0] = discriminator;
    data[1] = version;
    data[2] = flags;
    data[3] = 0;
    data[4..8].copy_from_slice(&data_len.to_le_bytes());
    Ok(())
}

/// Validate discriminator and minimum version.
#[inline(always)]
pub fn check_header(data: &[u8], expected_disc: u8, min_version: u8) -> Result<(), ProgramError> {
    if data.len() < HEADER_LEN {
        return Err(ProgramError::AccountDataTooSmall);
    }
    if data[0] != expected_disc || data[1] < min_version {
        return Err(ProgramError::InvalidAccountData);
    }
    Ok(())
}

/// Read the `data_len` field.
#[inline(always)]
pub fn read_data_len(data: &[u8]) -> Result<u32, ProgramError> {
    if data.len() < HEADER_LEN {
        return Err(ProgramError::AccountDataTooSmall);
    }
    let mut len = [0u8; 4];
    len.copy_from_slice(&data[4..8]);
    Ok(u32::from_le_bytes(len))
}

#[inline(always)]
pub fn header_payload(data: &[u8]) -> &[u8] {
    data.get(HEADER_LEN..).unwrap_or(&[])
}

#[inline(always)]
pub fn header_payload_mut(data: &mut [u8]) -> &mut [u8] {
    data.get_mut(HEADER_LEN..).unwrap_or(&mut [])
}

/// Zero `data` and write `record` with its header.
///
/// The buffer must hold at least `R::LEN` bytes; trailing bytes stay zero.
pub fn encode_record<R: Record>(record: &R, data: &mut [u8]) -> Result<(), ProgramError> {
    if data.len() < R::LEN {
        return Err(ProgramError::AccountDataTooSmall);
    }
    data.fill(0);
    write_header(data, R::DISCRIMINATOR, R::VERSION, 0, R::PAYLOAD_LEN as u32)?;
    let mut w = DataWriter::new(header_payload_mut(data));
    record.write_payload(&mut w)?;
    crate::require_eq!(w.written(), R::PAYLOAD_LEN, ProgramError::InvalidAccountData);
    Ok(())
}

/// Check the header of `data` and decode the record behind it.
pub fn decode_record<R: Record>(data: &[u8]) -> Result<R, ProgramError> {
    check_header(data, R::DISCRIMINATOR, R::VERSION)?;
    if (read_data_len(data)? as usize) < R::PAYLOAD_LEN {
        return Err(ProgramError::InvalidAccountData);
    }
    let mut cur = SliceCursor::new(header_payload(data));
    R::read_payload(&mut cur)
}
