//! Embeddable asset encoding
//!
//! Decoded assets are re-encoded for embedding in the engine port:
//! zlib at maximum compression, then base64 with the standard
//! alphabet. The consumer decodes each constant with `atob` and
//! inflates anything whose decoded length does not already match the
//! declared size, so both the text and the size constant are emitted
//! for every asset.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::Result;
use crate::extract::DecodedAsset;
use crate::memlist::ResourceKind;

/// One asset in its embeddable form
#[derive(Debug, Clone)]
pub struct EncodedAsset {
    /// Resource id (position in the directory)
    pub id: usize,
    pub kind: ResourceKind,
    /// base64 of the zlib-compressed asset bytes
    pub data: String,
    /// Unpacked size of the original asset
    pub unpacked_size: u32,
}

/// Compress and text-encode a decoded asset
///
/// Both stages are deterministic pure functions; encoding the same
/// asset twice yields identical text.
pub fn encode_asset(asset: &DecodedAsset) -> Result<EncodedAsset> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&asset.data)?;
    let compressed = encoder.finish()?;

    Ok(EncodedAsset {
        id: asset.id,
        kind: asset.kind,
        data: STANDARD.encode(compressed),
        unpacked_size: asset.unpacked_size,
    })
}

/// Write the two constant declarations for one asset
pub fn write_declarations<W: Write>(out: &mut W, asset: &EncodedAsset) -> Result<()> {
    writeln!(out, "const data{:02x} = \"{}\";", asset.id, asset.data)?;
    writeln!(out, "const size{:02x} = {};", asset.id, asset.unpacked_size)?;
    Ok(())
}

/// Write the index literal mapping bitmap resource ids to their
/// data/size constant pair
///
/// The index lets the consumer look bitmaps up by id without scanning
/// the declarations. Assets are expected in id order; every bitmap
/// appears exactly once.
pub fn write_bitmap_index<W: Write>(out: &mut W, assets: &[EncodedAsset]) -> Result<()> {
    writeln!(out, "const bitmaps = {{")?;
    for asset in assets {
        if asset.kind == ResourceKind::Bitmap {
            writeln!(
                out,
                "\t{:3} : [ data{:02x}, size{:02x} ],",
                asset.id, asset.id, asset.id
            )?;
        }
    }
    writeln!(out, "}};")?;
    Ok(())
}
