//! Resource extraction
//!
//! Walks the directory, slices each record's byte range out of its
//! bank and undoes bytekiller packing where it was applied. The
//! directory and bank store are read-only here, so records could be
//! processed in any order; extraction keeps directory order because
//! that order is the output contract.

use crate::bank::BankStore;
use crate::bytekiller;
use crate::error::{Error, Result};
use crate::memlist::{Resource, ResourceKind};

/// One fully decoded resource
#[derive(Debug, Clone)]
pub struct DecodedAsset {
    /// Resource id (position in the directory)
    pub id: usize,
    pub kind: ResourceKind,
    /// Decoded bytes, exactly `unpacked_size` long
    pub data: Vec<u8>,
    /// Declared unpacked size, emitted alongside the data so the
    /// consumer can size its own buffers
    pub unpacked_size: u32,
}

/// Decode a single directory record.
///
/// Returns `Ok(None)` for records skipped by policy: absent
/// placeholders (zero unpacked size), records whose bank was never
/// loaded, and audio resources. Out-of-bounds ranges and bytekiller
/// failures are errors; the archive is corrupt and partial output
/// would be worse than none.
pub fn extract_resource(
    id: usize,
    resource: &Resource,
    banks: &BankStore,
) -> Result<Option<DecodedAsset>> {
    if !resource.is_present() {
        return Ok(None);
    }
    let bank = match banks.get(resource.bank_id) {
        Some(bank) => bank,
        None => return Ok(None),
    };
    if resource.kind.is_audio() {
        return Ok(None);
    }

    let start = resource.offset as usize;
    let end = start + resource.packed_size as usize;
    if end > bank.len() {
        return Err(Error::SliceOutOfBounds(format!(
            "resource {:02x}: range {}..{} exceeds bank {:02x} ({} bytes)",
            id,
            start,
            end,
            resource.bank_id,
            bank.len()
        )));
    }
    let slice = &bank[start..end];

    let data = if resource.is_packed() {
        let mut out = vec![0u8; resource.unpacked_size as usize];
        bytekiller::unpack(&mut out, slice)?;
        out
    } else {
        slice.to_vec()
    };

    Ok(Some(DecodedAsset {
        id,
        kind: resource.kind,
        data,
        unpacked_size: resource.unpacked_size,
    }))
}

/// Decode every extractable resource, in directory order
pub fn extract_all(resources: &[Resource], banks: &BankStore) -> Result<Vec<DecodedAsset>> {
    let mut assets = Vec::new();
    for (id, resource) in resources.iter().enumerate() {
        if let Some(asset) = extract_resource(id, resource, banks)? {
            assets.push(asset);
        }
    }
    Ok(assets)
}
