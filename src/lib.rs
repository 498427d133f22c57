//! # unbank
//!
//! A Rust library for extracting and converting Another World (Out of
//! This World) DOS data files.
//!
//! The DOS release ships its assets in numbered `BANKxx` containers
//! indexed by a fixed-layout `memlist.bin` directory, all wrapped in a
//! standard ZIP archive. This library provides:
//!
//! - Parsing the `memlist.bin` resource directory
//! - Loading `BANKxx`/`DEMOxx` bank containers
//! - Undoing the bytekiller packing applied to most resources
//! - Re-encoding decoded assets (zlib + base64) for embedding in the
//!   JavaScript engine port
//!
//! ## Example - Extracting
//!
//! ```rust,no_run
//! use unbank::{extract_all, DataFiles};
//!
//! fn main() -> anyhow::Result<()> {
//!     let files = DataFiles::open("another_world.zip")?;
//!
//!     for asset in extract_all(files.resources(), files.banks())? {
//!         println!("{:02x}: {} bytes", asset.id, asset.data.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Example - Encoding for embedding
//!
//! ```rust,no_run
//! use unbank::{encode_asset, extract_all, write_bitmap_index, write_declarations, DataFiles};
//!
//! fn main() -> anyhow::Result<()> {
//!     let files = DataFiles::open("another_world.zip")?;
//!     let mut stdout = std::io::stdout();
//!
//!     let mut encoded = Vec::new();
//!     for asset in &extract_all(files.resources(), files.banks())? {
//!         let enc = encode_asset(asset)?;
//!         write_declarations(&mut stdout, &enc)?;
//!         encoded.push(enc);
//!     }
//!     write_bitmap_index(&mut stdout, &encoded)?;
//!
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod bank;
pub mod bytekiller;
pub mod embed;
pub mod error;
pub mod extract;
pub mod memlist;

pub use archive::{DataFiles, MEMLIST_NAME};
pub use bank::{bank_id_from_name, BankStore};
pub use embed::{encode_asset, write_bitmap_index, write_declarations, EncodedAsset};
pub use error::{Error, Result};
pub use extract::{extract_all, extract_resource, DecodedAsset};
pub use memlist::{parse_memlist, Resource, ResourceKind, RESOURCE_COUNT};
