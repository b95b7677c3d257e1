use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use legacy_res::containers::ContainerHandler;
use legacy_res::report::ResourceReport;
use legacy_res::{EndianCursor, ItemFactory, LbmDecoder, Result, Sound};

#[derive(Parser)]
#[command(name = "legacy-res", about = "Inspect and convert legacy game resource files")]
struct Cli {
    /// Log every chunk and run while decoding.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect the type of each file without decoding it.
    Sniff {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Decode a file and describe the resulting item.
    Info {
        file: PathBuf,
        /// Print the description as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Decode an LBM bitmap and write it as a PNG.
    Export {
        file: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();

    // Built before any decode starts and never changed afterwards
    let factory = ItemFactory::global();

    let result = match &cli.command {
        Command::Sniff { files } => sniff(files, factory),
        Command::Info { file, json } => describe(file, *json, factory),
        Command::Export { file, output } => export(file, output, factory),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn sniff(files: &[PathBuf], factory: &ItemFactory) -> Result<()> {
    for path in files {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                error!("Could not open {:?}: {}", path, e);
                continue;
            }
        };

        if LbmDecoder::matches(&data) {
            println!("{}: bitmap (lbm)", path.display());
            continue;
        }

        let mut cursor = EndianCursor::little_endian(&data);
        match Sound::find_sub_type(&mut cursor, factory)? {
            Some(sound) => println!("{}: sound ({})", path.display(), sound.sound_type()),
            None => println!("{}: unrecognised", path.display()),
        }
    }
    Ok(())
}

fn describe(path: &Path, json: bool, factory: &ItemFactory) -> Result<()> {
    let data = fs::read(path)?;

    let report = if LbmDecoder::matches(&data) {
        match LbmDecoder::new(factory).deserialise(&data) {
            Ok(bitmap) => ResourceReport::bitmap(path, &bitmap),
            Err(e) => ResourceReport::rejected(path, e),
        }
    } else {
        let mut cursor = EndianCursor::little_endian(&data);
        match Sound::find_sub_type(&mut cursor, factory) {
            Ok(Some(sound)) => ResourceReport::sound(path, sound.sound_type()),
            Ok(None) => ResourceReport::rejected(path, "unrecognised container"),
            Err(e) => ResourceReport::rejected(path, e),
        }
    };

    if json {
        println!("{}", report.to_json());
    } else {
        match &report {
            ResourceReport::Bitmap(b) => println!(
                "{}: {}x{} {:?} bitmap, {} colours used",
                b.file, b.width, b.height, b.format, b.colours_used
            ),
            ResourceReport::Sound(s) => println!("{}: {} sound", s.file, s.sound_type),
            ResourceReport::Rejected(r) => println!("{}: rejected ({})", r.file, r.reason),
        }
    }
    Ok(())
}

fn export(path: &Path, output: &Path, factory: &ItemFactory) -> Result<()> {
    let data = fs::read(path)?;
    let bitmap = LbmDecoder::new(factory).deserialise(&data)?;
    let image = bitmap.to_rgba_image()?;
    image.save(output)?;

    info!(
        "Wrote {}x{} image to {:?}",
        bitmap.width(),
        bitmap.height(),
        output
    );
    Ok(())
}
