//! mcpixelate CLI - Turn an image into a block mural with build coordinates

use clap::Parser;
use mcpixelate::{BlockFamily, Converter, McPixelateError, Palette};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mcpixelate", about = "Turn an image into a block mural")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Mural width in blocks (height follows the aspect ratio)
    #[arg(short, long, default_value = "64")]
    width: u32,
    /// X coordinate of the upper left block
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    x: i64,
    /// Y coordinate of the upper left block
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    y: i64,
    /// Write the block preview image here (format from extension)
    #[arg(short, long)]
    preview: Option<PathBuf>,
    /// Write X,Y,Block coordinates here
    #[arg(short, long)]
    csv: Option<PathBuf>,
    /// Write the material list as JSON here
    #[arg(long)]
    json: Option<PathBuf>,
    /// Only use one block family
    #[arg(short, long, value_enum)]
    family: Option<BlockFamily>,
    /// JSON palette file replacing the built-in blocks
    #[arg(long)]
    palette: Option<PathBuf>,
    /// Don't print the material list
    #[arg(short, long)]
    quiet: bool,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), McPixelateError> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut palette = match &args.palette {
        Some(path) => Palette::from_json(path)?,
        None => Palette::builtin().clone(),
    };
    if let Some(family) = args.family {
        palette = palette.only(family)?;
    }

    let blocks = Converter::new(args.width)
        .with_origin(args.x, args.y)
        .with_palette(palette)
        .open(&args.input)?;

    if let Some(path) = &args.preview {
        blocks.save_preview(path)?;
    }
    if let Some(path) = &args.csv {
        blocks.save_coordinates(path)?;
    }
    if let Some(path) = &args.json {
        blocks.save_summary_json(path)?;
    }
    if !args.quiet {
        blocks.print_summary();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["mcpixelate", "in.png"]);
        assert_eq!(args.width, 64);
        assert_eq!((args.x, args.y), (0, 0));
        assert!(args.preview.is_none());
        assert!(args.family.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn test_negative_origin_and_family() {
        let args = Args::parse_from([
            "mcpixelate",
            "in.png",
            "--width",
            "32",
            "-x",
            "-120",
            "-y",
            "70",
            "--family",
            "terracotta",
            "--csv",
            "out.csv",
        ]);
        assert_eq!(args.width, 32);
        assert_eq!((args.x, args.y), (-120, 70));
        assert_eq!(args.family, Some(BlockFamily::Terracotta));
        assert_eq!(args.csv, Some(PathBuf::from("out.csv")));
    }
}
