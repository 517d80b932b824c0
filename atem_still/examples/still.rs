#[macro_use]
extern crate tracing;

use atem_still::{
    codec::{backend_error, selected_backend, Frame},
    decode_image_from_atem, encode_image_for_atem, solid_rgba, EncodingOptions, InputFormat,
};
use clap::{ArgGroup, Parser, ValueHint};
use palette::Srgba;
use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Read, Write},
    path::PathBuf,
};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

type Result<T = ()> = std::result::Result<T, Box<dyn std::error::Error>>;

/// ATEM still frame conversion tool.
///
/// Converts raw 8-bit RGBA frames to the switcher's bit-packed 10-bit YUVA
/// 4:2:2:4 format (`ay10`), and back. Frames use BT.709 when they have 720
/// lines or more, and BT.601 otherwise.
///
/// To convert a PNG to raw RGBA with ffmpeg, and then to `ay10`:
///
/// ```sh
/// ffmpeg -i /tmp/still.png -f rawvideo -pix_fmt rgba /tmp/still.rgba
/// still --encode --width 1920 --height 1080 /tmp/still.rgba -o /tmp/still.ay10
/// ```
///
/// And back again:
///
/// ```sh
/// still --decode --width 1920 --height 1080 /tmp/still.ay10 -o /tmp/still2.rgba
/// ffmpeg -f rawvideo -pixel_format rgba -video_size 1920x1080 \
///     -i /tmp/still2.rgba /tmp/still2.png
/// ```
#[derive(Debug, Parser)]
#[clap(verbatim_doc_comment)]
#[clap(group(
    ArgGroup::new("mode")
        .required(true)
        .args(&["encode", "decode"])
))]
struct CliParser {
    /// Encodes an image into a frame suitable for the ATEM switcher
    #[clap(short, long)]
    encode: bool,

    /// Decodes a frame from ATEM's switcher format
    #[clap(short, long)]
    decode: bool,

    /// Frame width, in pixels
    #[clap(long)]
    width: u32,

    /// Frame height, in pixels
    #[clap(long)]
    height: u32,

    /// Input pixel format, for --encode
    #[clap(long, value_enum, default_value_t)]
    format: InputFormat,

    /// Input filename
    #[clap(value_hint = ValueHint::FilePath, required_unless_present = "fill")]
    input: Option<PathBuf>,

    /// Instead of reading an input file, encode a frame filled with a single
    /// colour, as `RRGGBBAA` hex.
    #[clap(long, conflicts_with = "decode")]
    fill: Option<String>,

    /// Output filename
    #[clap(short, value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

fn parse_colour(s: &str) -> Result<Srgba<u8>> {
    let b = hex::decode(s)?;
    let [r, g, b, a]: [u8; 4] = b
        .try_into()
        .map_err(|_| format!("colour must be 4 bytes (RRGGBBAA): {s:?}"))?;
    Ok(Srgba::new(r, g, b, a))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .compact()
        .init();

    let opts = CliParser::parse();
    let frame = Frame::new(opts.width, opts.height)?;
    info!(
        "{}x{} frame in {}, using {} backend",
        frame.width(),
        frame.height(),
        frame.colourspace(),
        selected_backend().name()
    );
    if let Some(e) = backend_error() {
        warn!("preferred backend unavailable: {e}");
    }

    let input = if let Some(fill) = &opts.fill {
        solid_rgba(frame.width(), frame.height(), parse_colour(fill)?)?
    } else {
        let Some(input) = &opts.input else {
            unreachable!();
        };
        if !input.exists() || !input.is_file() {
            panic!(
                "input file {} does not exist, or is not a file!",
                input.display()
            );
        }

        let mut i = BufReader::new(File::open(input)?);
        let mut buf = Vec::with_capacity(frame.byte_len());
        i.read_to_end(&mut buf)?;
        buf
    };

    let output_path = opts.output.to_string_lossy().to_string();
    if opts.output.exists() {
        panic!("output file {output_path} already exists, refusing to overwrite!");
    }

    let data = if opts.encode {
        let info = encode_image_for_atem(
            frame.width(),
            frame.height(),
            &input,
            opts.format,
            &EncodingOptions::default(),
        )?;
        info!("frame hash: {}", info.hash.as_deref().unwrap_or("(empty)"));
        info.encoded_data
    } else if opts.decode {
        decode_image_from_atem(frame.width(), frame.height(), &input)?
    } else {
        unreachable!();
    };

    let mut o = BufWriter::new(
        OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&opts.output)?,
    );
    info!("writing {} bytes to {output_path}...", data.len());
    o.write_all(&data)?;
    o.flush()?;

    info!("all done!");
    Ok(())
}
