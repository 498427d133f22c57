//! Source archive loading
//!
//! The DOS datafiles ship as a standard ZIP container holding the
//! `memlist.bin` directory and the numbered bank entries. This module
//! builds the two lookup tables everything downstream runs against.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use crate::bank::{bank_id_from_name, BankStore};
use crate::error::{Error, Result};
use crate::memlist::{parse_memlist, Resource};

/// Archive entry name of the resource directory
pub const MEMLIST_NAME: &str = "memlist.bin";

/// The loaded game data: directory records plus bank buffers
///
/// Both tables are built once while scanning the archive and are
/// immutable afterwards; extraction is a pure function over them.
pub struct DataFiles {
    resources: Vec<Resource>,
    banks: BankStore,
    entry_names: Vec<String>,
}

impl DataFiles {
    /// Open a datafile archive from disk
    ///
    /// # Example
    /// ```no_run
    /// use unbank::DataFiles;
    /// let files = DataFiles::open("another_world.zip")?;
    /// # Ok::<(), unbank::Error>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Load the directory and banks from any seekable ZIP source
    ///
    /// The entry named `memlist.bin` (case-insensitive) is parsed as
    /// the directory; entries matching the bank naming rule are loaded
    /// into the store; everything else is ignored.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let mut resources = None;
        let mut banks = BankStore::new();
        let mut entry_names = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();

            if name.eq_ignore_ascii_case(MEMLIST_NAME) {
                let mut data = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut data)?;
                resources = Some(parse_memlist(&data)?);
            } else if let Some(id) = bank_id_from_name(&name) {
                let mut data = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut data)?;
                banks.insert(id, data);
            }

            entry_names.push(name);
        }

        let resources =
            resources.ok_or_else(|| Error::EntryNotFound(MEMLIST_NAME.to_string()))?;

        Ok(DataFiles {
            resources,
            banks,
            entry_names,
        })
    }

    /// Directory records in directory order; a record's index is its
    /// resource id
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Loaded bank buffers
    pub fn banks(&self) -> &BankStore {
        &self.banks
    }

    /// Entry names as discovered in the archive, for diagnostics
    pub fn entry_names(&self) -> &[String] {
        &self.entry_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memlist::{MEMLIST_SENTINEL, RESOURCE_COUNT};
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn empty_memlist() -> Vec<u8> {
        let mut buf = vec![0u8; RESOURCE_COUNT * 20];
        buf.push(MEMLIST_SENTINEL);
        buf
    }

    fn build_zip(entries: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn loads_directory_and_banks() {
        let memlist = empty_memlist();
        let cursor = build_zip(&[
            ("MEMLIST.BIN", memlist.as_slice()),
            ("BANK01", b"first".as_slice()),
            ("demo1f", b"demo bank".as_slice()),
            ("bank1", b"wrong length".as_slice()),
            ("other0a", b"wrong prefix".as_slice()),
        ]);

        let files = DataFiles::from_reader(cursor).unwrap();
        assert_eq!(files.resources().len(), RESOURCE_COUNT);
        assert_eq!(files.banks().len(), 2);
        assert_eq!(files.banks().get(0x01), Some(&b"first"[..]));
        assert_eq!(files.banks().get(0x1F), Some(&b"demo bank"[..]));
        assert_eq!(files.entry_names().len(), 5);
    }

    #[test]
    fn requires_directory_entry() {
        let cursor = build_zip(&[("BANK01", b"bytes".as_slice())]);
        assert!(matches!(
            DataFiles::from_reader(cursor),
            Err(Error::EntryNotFound(_))
        ));
    }

    #[test]
    fn propagates_malformed_directory() {
        let mut memlist = empty_memlist();
        *memlist.last_mut().unwrap() = 0x42;
        let cursor = build_zip(&[("memlist.bin", memlist.as_slice())]);
        assert!(matches!(
            DataFiles::from_reader(cursor),
            Err(Error::MalformedMemlist(_))
        ));
    }
}
