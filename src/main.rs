//! unbank - Extract and convert Another World DOS data files
//!
//! Usage:
//!   unbank <archive>                  - Print the embeddable asset listing (default)
//!   unbank convert <archive>          - Same as the default mode
//!   unbank list <archive>             - List directory records
//!   unbank info <archive>             - Show archive information
//!   unbank extract <archive> [-o dir] - Write decoded assets to a directory

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use unbank::{
    encode_asset, extract_all, extract_resource, write_bitmap_index, write_declarations,
    DataFiles, ResourceKind,
};

#[derive(Parser)]
#[command(name = "unbank")]
#[command(version = "0.1.0")]
#[command(about = "Extract and convert Another World DOS data files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the datafile archive (for quick convert mode)
    archive: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the embeddable asset listing to stdout
    Convert {
        /// Path to the datafile archive
        archive: PathBuf,
    },
    /// List directory records
    List {
        /// Path to the datafile archive
        archive: PathBuf,
    },
    /// Show archive information
    Info {
        /// Path to the datafile archive
        archive: PathBuf,
    },
    /// Write decoded assets to a directory
    Extract {
        /// Path to the datafile archive
        archive: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "data")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert { archive }) => convert(&archive)?,
        Some(Commands::List { archive }) => list(&archive)?,
        Some(Commands::Info { archive }) => info(&archive)?,
        Some(Commands::Extract { archive, output }) => extract(&archive, &output)?,
        None => {
            // Quick convert mode
            if let Some(archive) = cli.archive {
                convert(&archive)?;
            } else {
                eprintln!("Usage: unbank <archive>");
                eprintln!("       unbank convert <archive>");
                eprintln!("       unbank list <archive>");
                eprintln!("       unbank info <archive>");
                eprintln!("       unbank extract <archive> [-o output]");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Open the archive, printing discovery diagnostics to stderr so
/// stdout stays machine-consumable
fn open_datafiles(path: &Path) -> Result<DataFiles> {
    eprintln!("Opening {}...", path.display());

    let files = DataFiles::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    for name in files.entry_names() {
        eprintln!("{}", name.to_lowercase());
    }
    eprintln!(
        "Loaded {} directory records, {} banks",
        files.resources().len(),
        files.banks().len()
    );

    Ok(files)
}

fn convert(path: &Path) -> Result<()> {
    let files = open_datafiles(path)?;
    let assets = extract_all(files.resources(), files.banks())?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut encoded = Vec::with_capacity(assets.len());
    for asset in &assets {
        let enc = encode_asset(asset)?;
        write_declarations(&mut out, &enc)?;
        encoded.push(enc);
    }
    write_bitmap_index(&mut out, &encoded)?;
    out.flush()?;

    Ok(())
}

fn list(path: &Path) -> Result<()> {
    let files = open_datafiles(path)?;

    for (id, resource) in files.resources().iter().enumerate() {
        if !resource.is_present() {
            continue;
        }
        let missing = if files.banks().contains(resource.bank_id) {
            ""
        } else {
            " (bank missing)"
        };
        println!(
            "{:02x} {:>12} bank {:02x} offset {:>8} packed {:>6} unpacked {:>6}{}",
            id,
            kind_name(resource.kind),
            resource.bank_id,
            resource.offset,
            resource.packed_size,
            resource.unpacked_size,
            missing
        );
    }

    Ok(())
}

fn info(path: &Path) -> Result<()> {
    let files = open_datafiles(path)?;

    let mut present = 0u64;
    let mut packed = 0u64;
    let mut audio = 0u64;
    let mut bitmaps = 0u64;
    let mut total_packed = 0u64;
    let mut total_unpacked = 0u64;

    for resource in files.resources() {
        if !resource.is_present() {
            continue;
        }
        present += 1;
        total_packed += u64::from(resource.packed_size);
        total_unpacked += u64::from(resource.unpacked_size);
        if resource.is_packed() {
            packed += 1;
        }
        if resource.kind.is_audio() {
            audio += 1;
        }
        if resource.kind == ResourceKind::Bitmap {
            bitmaps += 1;
        }
    }

    println!();
    println!("Archive Information:");
    println!("  File: {}", path.display());
    println!("  Directory records: {}", files.resources().len());
    println!("  Present resources: {}", present);
    println!("  Packed resources: {}", packed);
    println!("  Audio resources (not converted): {}", audio);
    println!("  Bitmap resources: {}", bitmaps);
    println!("  Banks loaded: {}", files.banks().len());
    println!("  Packed size: {}", format_size(total_packed));
    println!("  Unpacked size: {}", format_size(total_unpacked));

    let mut banks: Vec<(u8, usize)> = files
        .banks()
        .iter()
        .map(|(id, data)| (id, data.len()))
        .collect();
    banks.sort_unstable();

    println!();
    println!("Banks:");
    for (id, len) in banks {
        println!("  {:02x}: {}", id, format_size(len as u64));
    }

    Ok(())
}

fn extract(path: &Path, output: &Path) -> Result<()> {
    let files = open_datafiles(path)?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let pb = ProgressBar::new(files.resources().len() as u64);
    pb.set_style(ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
    )?);

    let mut written = 0u64;
    for (id, resource) in files.resources().iter().enumerate() {
        if let Some(asset) = extract_resource(id, resource, files.banks())? {
            let dest = output.join(format!("{:02x}", id));
            let mut file = File::create(&dest)
                .with_context(|| format!("Failed to create {}", dest.display()))?;
            file.write_all(&asset.data)?;
            written += 1;
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    eprintln!("Wrote {} assets to {}", written, output.display());

    Ok(())
}

fn kind_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Sound => "sound",
        ResourceKind::Music => "music",
        ResourceKind::Bitmap => "bitmap",
        ResourceKind::Palette => "palette",
        ResourceKind::Bytecode => "bytecode",
        ResourceKind::Polygons => "polygons",
        ResourceKind::PolygonBank => "polygon bank",
        ResourceKind::Unknown(_) => "unknown",
    }
}

fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} B", size)
    }
}
