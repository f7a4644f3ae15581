//! File version extraction from PE executables.
//!
//! Windows executables carry a `VS_VERSIONINFO` resource whose fixed part,
//! `VS_FIXEDFILEINFO`, starts with the signature `0xFEEF04BD`. The file
//! version follows as two little-endian DWORDs (`MS`, `LS`), each holding
//! two 16-bit parts.

use std::fs;
use std::io;
use std::path::Path;

use genlib_core::FileVersionReader;
use tracing::debug;

use crate::error::PeError;

/// Game executables are a few megabytes; anything far larger is not one.
const MAX_PE_SIZE: u64 = 256 * 1024 * 1024;

const DOS_MAGIC: &[u8; 2] = b"MZ";
const PE_MAGIC: &[u8; 4] = b"PE\0\0";
/// Offset of `e_lfanew` in the DOS header.
const PE_OFFSET_FIELD: usize = 0x3C;

const FIXED_FILE_INFO_SIGNATURE: [u8; 4] = 0xFEEF_04BD_u32.to_le_bytes();
const FIXED_FILE_INFO_STRUC_VERSION: u32 = 0x0001_0000;

/// Extract the file version (`major.minor.build.revision`) from PE bytes.
pub fn parse_fixed_file_version(bytes: &[u8]) -> Result<String, PeError> {
    if bytes.get(..2) != Some(DOS_MAGIC.as_slice()) {
        return Err(PeError::NotPortableExecutable);
    }
    let pe_offset = read_u32(bytes, PE_OFFSET_FIELD).ok_or(PeError::NotPortableExecutable)? as usize;
    if bytes.get(pe_offset..pe_offset.saturating_add(4)) != Some(PE_MAGIC.as_slice()) {
        return Err(PeError::NotPortableExecutable);
    }

    let mut offset = pe_offset;
    while let Some(found) = bytes
        .get(offset..)
        .and_then(|rest| rest.windows(4).position(|w| w == FIXED_FILE_INFO_SIGNATURE))
    {
        let at = offset + found;
        if let Some(version) = read_fixed_file_info(bytes, at) {
            return Ok(version);
        }
        offset = at + 1;
    }

    Err(PeError::NoVersionResource)
}

fn read_fixed_file_info(bytes: &[u8], at: usize) -> Option<String> {
    if read_u32(bytes, at + 4)? != FIXED_FILE_INFO_STRUC_VERSION {
        return None;
    }
    let ms = read_u32(bytes, at + 8)?;
    let ls = read_u32(bytes, at + 12)?;
    Some(format!(
        "{}.{}.{}.{}",
        ms >> 16,
        ms & 0xFFFF,
        ls >> 16,
        ls & 0xFFFF
    ))
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(at..at.checked_add(4)?)?.try_into().ok()?;
    Some(u32::from_le_bytes(raw))
}

/// [`FileVersionReader`] for PE executables.
#[derive(Debug, Default, Clone, Copy)]
pub struct PeVersionReader;

impl PeVersionReader {
    /// Read and parse the version of the file at `path`.
    pub fn read(&self, path: &Path) -> Result<String, PeError> {
        let len = fs::metadata(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => PeError::NotFound(path.display().to_string()),
                _ => PeError::Io(e),
            })?
            .len();
        if len > MAX_PE_SIZE {
            return Err(PeError::TooLarge(len));
        }
        parse_fixed_file_version(&fs::read(path)?)
    }
}

impl FileVersionReader for PeVersionReader {
    fn read_file_version(&self, path: &Path) -> Option<String> {
        match self.read(path) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No file version");
                None
            }
        }
    }
}

/// Minimal PE image with a version block, for tests in this crate.
#[cfg(test)]
pub(crate) fn fake_pe(major: u16, minor: u16, build: u16, revision: u16) -> Vec<u8> {
    let mut bytes = vec![0u8; 0x100];
    bytes[..2].copy_from_slice(DOS_MAGIC);
    bytes[PE_OFFSET_FIELD..PE_OFFSET_FIELD + 4].copy_from_slice(&0x40_u32.to_le_bytes());
    bytes[0x40..0x44].copy_from_slice(PE_MAGIC);

    let at = 0x80;
    bytes[at..at + 4].copy_from_slice(&FIXED_FILE_INFO_SIGNATURE);
    bytes[at + 4..at + 8].copy_from_slice(&FIXED_FILE_INFO_STRUC_VERSION.to_le_bytes());
    let ms = (u32::from(major) << 16) | u32::from(minor);
    let ls = (u32::from(build) << 16) | u32::from(revision);
    bytes[at + 8..at + 12].copy_from_slice(&ms.to_le_bytes());
    bytes[at + 12..at + 16].copy_from_slice(&ls.to_le_bytes());
    bytes
}
