//! `memlist.bin` directory parsing
//!
//! The directory is a fixed-size index describing every resource in the
//! game data: 146 records of 20 bytes each, terminated by a single 0xFF
//! sentinel byte. A record's position in the table is its resource id,
//! used everywhere downstream (bank addressing, embedding constants,
//! the bitmap index).

use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{Error, Result};

/// Number of records in `memlist.bin`
pub const RESOURCE_COUNT: usize = 146;

/// Byte terminating the record table
pub const MEMLIST_SENTINEL: u8 = 0xFF;

/// Size in bytes of one directory record
const RECORD_SIZE: usize = 20;

/// Resource kinds found in the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// 8-bit raw sound
    Sound,
    /// Soundfx music module
    Music,
    /// 320x200 4-bits-per-pixel bitmap
    Bitmap,
    /// Palette
    Palette,
    /// Script bytecode
    Bytecode,
    /// Cinematic polygon data
    Polygons,
    /// Shared polygon bank
    PolygonBank,
    /// Unrecognized kind byte
    Unknown(u8),
}

impl From<u8> for ResourceKind {
    fn from(value: u8) -> Self {
        match value {
            0 => ResourceKind::Sound,
            1 => ResourceKind::Music,
            2 => ResourceKind::Bitmap,
            3 => ResourceKind::Palette,
            4 => ResourceKind::Bytecode,
            5 => ResourceKind::Polygons,
            6 => ResourceKind::PolygonBank,
            other => ResourceKind::Unknown(other),
        }
    }
}

impl ResourceKind {
    /// Sounds and music modules are left out of conversion
    pub fn is_audio(&self) -> bool {
        matches!(self, ResourceKind::Sound | ResourceKind::Music)
    }
}

/// One directory record
#[derive(Debug, Clone)]
pub struct Resource {
    /// Kind of asset this record describes
    pub kind: ResourceKind,
    /// Bank holding this resource's bytes
    pub bank_id: u8,
    /// Byte offset into the bank buffer
    pub offset: u32,
    /// Length of the (possibly packed) slice in the bank
    pub packed_size: u32,
    /// Length after unpacking; equal to `packed_size` for stored resources
    pub unpacked_size: u32,
}

impl Resource {
    /// A zero unpacked size marks an absent placeholder record
    pub fn is_present(&self) -> bool {
        self.unpacked_size != 0
    }

    /// Whether the bank slice needs bytekiller unpacking
    pub fn is_packed(&self) -> bool {
        self.packed_size != self.unpacked_size
    }
}

/// Parse the full record table out of a `memlist.bin` buffer
///
/// Yields exactly [`RESOURCE_COUNT`] records in directory order. The
/// byte following the last record must be the 0xFF sentinel; anything
/// else means the directory is corrupt and the whole run must stop.
pub fn parse_memlist(data: &[u8]) -> Result<Vec<Resource>> {
    let needed = RESOURCE_COUNT * RECORD_SIZE + 1;
    if data.len() < needed {
        return Err(Error::MalformedMemlist(format!(
            "directory is {} bytes, need at least {}",
            data.len(),
            needed
        )));
    }

    let mut cursor = Cursor::new(data);
    let mut resources = Vec::with_capacity(RESOURCE_COUNT);

    for _ in 0..RESOURCE_COUNT {
        let _status = cursor.read_u8()?;
        let kind = ResourceKind::from(cursor.read_u8()?);
        // The pointer and rank fields only mean something to the engine
        // at runtime; the on-disk values are noise.
        let _pointer = cursor.read_u32::<BigEndian>()?;
        let _rank = cursor.read_u8()?;
        let bank_id = cursor.read_u8()?;
        let offset = cursor.read_u32::<BigEndian>()?;
        let packed_size = cursor.read_u32::<BigEndian>()?;
        let unpacked_size = cursor.read_u32::<BigEndian>()?;

        resources.push(Resource {
            kind,
            bank_id,
            offset,
            packed_size,
            unpacked_size,
        });
    }

    let sentinel = cursor.read_u8()?;
    if sentinel != MEMLIST_SENTINEL {
        return Err(Error::MalformedMemlist(format!(
            "expected 0x{:02X} sentinel after {} records, found 0x{:02X}",
            MEMLIST_SENTINEL, RESOURCE_COUNT, sentinel
        )));
    }

    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: u8, bank: u8, offset: u32, packed: u32, unpacked: u32) -> Vec<u8> {
        let mut rec = vec![0x01, kind];
        rec.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]); // runtime pointer
        rec.push(0x02); // rank
        rec.push(bank);
        rec.extend_from_slice(&offset.to_be_bytes());
        rec.extend_from_slice(&packed.to_be_bytes());
        rec.extend_from_slice(&unpacked.to_be_bytes());
        rec
    }

    fn directory() -> Vec<u8> {
        let mut buf = Vec::new();
        for i in 0..RESOURCE_COUNT as u32 {
            buf.extend_from_slice(&record((i % 7) as u8, i as u8, i * 10, i * 2, i * 3));
        }
        buf.push(MEMLIST_SENTINEL);
        buf
    }

    #[test]
    fn parses_all_records_in_order() {
        let resources = parse_memlist(&directory()).unwrap();
        assert_eq!(resources.len(), RESOURCE_COUNT);

        assert_eq!(resources[0].kind, ResourceKind::Sound);
        assert_eq!(resources[2].kind, ResourceKind::Bitmap);
        assert_eq!(resources[6].kind, ResourceKind::PolygonBank);

        let r = &resources[5];
        assert_eq!(r.bank_id, 5);
        assert_eq!(r.offset, 50);
        assert_eq!(r.packed_size, 10);
        assert_eq!(r.unpacked_size, 15);
    }

    #[test]
    fn rejects_missing_sentinel() {
        let mut buf = directory();
        *buf.last_mut().unwrap() = 0x00;
        assert!(matches!(
            parse_memlist(&buf),
            Err(Error::MalformedMemlist(_))
        ));
    }

    #[test]
    fn rejects_truncated_directory() {
        let buf = directory();
        assert!(matches!(
            parse_memlist(&buf[..buf.len() - 2]),
            Err(Error::MalformedMemlist(_))
        ));
    }

    #[test]
    fn maps_kind_bytes() {
        assert_eq!(ResourceKind::from(0), ResourceKind::Sound);
        assert_eq!(ResourceKind::from(1), ResourceKind::Music);
        assert_eq!(ResourceKind::from(2), ResourceKind::Bitmap);
        assert_eq!(ResourceKind::from(3), ResourceKind::Palette);
        assert_eq!(ResourceKind::from(4), ResourceKind::Bytecode);
        assert_eq!(ResourceKind::from(5), ResourceKind::Polygons);
        assert_eq!(ResourceKind::from(6), ResourceKind::PolygonBank);
        assert_eq!(ResourceKind::from(9), ResourceKind::Unknown(9));
    }

    #[test]
    fn present_and_packed_flags() {
        let resources = parse_memlist(&directory()).unwrap();
        // record 0 was written with unpacked size 0
        assert!(!resources[0].is_present());
        assert!(resources[1].is_present());
        // packed size 2*i never equals unpacked size 3*i for i > 0
        assert!(resources[1].is_packed());
    }
}
