//! Bank containers
//!
//! Resource bytes live in numbered bank entries of the source archive.
//! A bank entry's name is six characters: a `bank` prefix (`demo` in
//! the demo release) followed by the two-hex-digit bank id that
//! directory records refer to.

use std::collections::HashMap;

/// Parse a bank id out of an archive entry name.
///
/// The prefix match is case-insensitive: `BANK0A`, `bank0a` and
/// `Demo0a` all map to 0x0A. Names of the wrong length, prefix or
/// suffix yield `None`.
pub fn bank_id_from_name(name: &str) -> Option<u8> {
    let name = name.as_bytes();
    if name.len() != 6 {
        return None;
    }
    let (prefix, suffix) = name.split_at(4);
    if !prefix.eq_ignore_ascii_case(b"bank") && !prefix.eq_ignore_ascii_case(b"demo") {
        return None;
    }
    u8::from_str_radix(std::str::from_utf8(suffix).ok()?, 16).ok()
}

/// Raw bank buffers keyed by bank id
///
/// Built once while scanning the source archive and never mutated
/// afterwards. Not every id referenced by the directory has to be
/// present; records pointing at missing banks are skipped during
/// extraction.
#[derive(Debug, Default)]
pub struct BankStore {
    banks: HashMap<u8, Vec<u8>>,
}

impl BankStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a bank buffer. On duplicate ids the last insert wins,
    /// matching archive enumeration order.
    pub fn insert(&mut self, id: u8, data: Vec<u8>) {
        self.banks.insert(id, data);
    }

    /// Get a bank's raw bytes
    pub fn get(&self, id: u8) -> Option<&[u8]> {
        self.banks.get(&id).map(|data| data.as_slice())
    }

    pub fn contains(&self, id: u8) -> bool {
        self.banks.contains_key(&id)
    }

    /// Number of banks loaded
    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }

    /// Iterate over (id, buffer) pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[u8])> {
        self.banks.iter().map(|(id, data)| (*id, data.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_bank_and_demo_names() {
        assert_eq!(bank_id_from_name("BANK0A"), Some(0x0A));
        assert_eq!(bank_id_from_name("bank0a"), Some(0x0A));
        assert_eq!(bank_id_from_name("demo1f"), Some(0x1F));
        assert_eq!(bank_id_from_name("Bank05"), Some(0x05));
        assert_eq!(bank_id_from_name("DEMO01"), Some(0x01));
    }

    #[test]
    fn rejects_other_names() {
        assert_eq!(bank_id_from_name("bank1"), None); // wrong length
        assert_eq!(bank_id_from_name("bank011"), None); // wrong length
        assert_eq!(bank_id_from_name("other0a"), None); // wrong prefix
        assert_eq!(bank_id_from_name("bankzz"), None); // suffix not hex
        assert_eq!(bank_id_from_name("memlist.bin"), None);
        assert_eq!(bank_id_from_name(""), None);
    }

    #[test]
    fn last_duplicate_wins() {
        let mut banks = BankStore::new();
        banks.insert(0x0A, vec![1]);
        banks.insert(0x0A, vec![2]);
        assert_eq!(banks.get(0x0A), Some(&[2u8][..]));
        assert_eq!(banks.len(), 1);
    }

    #[test]
    fn lookup_and_membership() {
        let mut banks = BankStore::new();
        assert!(banks.is_empty());
        banks.insert(0x01, b"bytes".to_vec());
        assert!(banks.contains(0x01));
        assert!(!banks.contains(0x02));
        assert_eq!(banks.get(0x01), Some(&b"bytes"[..]));
        assert_eq!(banks.get(0x02), None);
    }
}
