#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    clippy::dbg_macro
)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use ldk::nbt::json::to_json;
use ldk::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// File to read.
    input: PathBuf,
    /// Format of the input file. Detected from its first bytes by default.
    #[clap(short, long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,
    /// What to print.
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Mojangson)]
    output: OutputFormat,
    /// Compression of Base64 input, and of binary or Base64 output.
    #[clap(short, long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,
    /// Write to this file instead of stdout.
    #[clap(long)]
    out: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set.
    #[clap(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum InputFormat {
    Auto,
    Binary,
    Gzip,
    Base64,
    Mojangson,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum OutputFormat {
    Mojangson,
    Colored,
    Json,
    Binary,
    Base64,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum CompressionArg {
    None,
    Gzip,
}

impl From<CompressionArg> for Compression {
    fn from(value: CompressionArg) -> Self {
        match value {
            CompressionArg::None => Compression::None,
            CompressionArg::Gzip => Compression::Gzip,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let named = read_input(&cli.input, cli.format, cli.compression.into())?;
    info!(name = %named.name, tag_type = %named.tag.tag_type(), "read root tag");

    let compression = Compression::from(cli.compression);

    let bytes = match cli.output {
        OutputFormat::Mojangson => to_mojangson(&named.tag).into_bytes(),
        OutputFormat::Colored => to_mojangson_colored(&named.tag).into_bytes(),
        OutputFormat::Json => serde_json::to_vec_pretty(&to_json(&named.tag))?,
        OutputFormat::Base64 => named.to_base64(compression)?.into_bytes(),
        OutputFormat::Binary => {
            if let Some(path) = &cli.out {
                named
                    .write_file(path, compression)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                return Ok(());
            }
            named.to_bytes(compression)?
        }
    };

    match &cli.out {
        Some(path) => std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            if cli.output != OutputFormat::Binary {
                writeln!(stdout)?;
            }
        }
    }

    Ok(())
}

fn read_input(path: &Path, format: InputFormat, compression: Compression) -> anyhow::Result<NamedTag> {
    let format = match format {
        InputFormat::Auto => detect(path)?,
        other => other,
    };
    debug!(?format, "reading {}", path.display());

    let named = match format {
        InputFormat::Binary | InputFormat::Gzip => {
            let compression = if format == InputFormat::Gzip {
                Compression::Gzip
            } else {
                Compression::None
            };

            let Some(named) = NamedTag::read_file(path, compression)
                .with_context(|| format!("failed to decode {}", path.display()))?
            else {
                bail!("{} does not exist", path.display());
            };
            named
        }
        InputFormat::Base64 => {
            let text = read_text(path)?;
            NamedTag::from_base64(&text, compression)
                .with_context(|| format!("failed to decode {}", path.display()))?
        }
        InputFormat::Mojangson => {
            let text = read_text(path)?;
            let tag = from_mojangson(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            NamedTag::unnamed(tag)
        }
        InputFormat::Auto => unreachable!("format was detected above"),
    };

    Ok(named)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Guesses the format from the contents of the file.
fn detect(path: &Path) -> anyhow::Result<InputFormat> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(detect_bytes(&bytes))
}

fn detect_bytes(bytes: &[u8]) -> InputFormat {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        return InputFormat::Gzip;
    }

    // Binary NBT always holds a zero byte in the root name length.
    let text = bytes.trim_ascii();
    let is_text = !text.is_empty()
        && text
            .iter()
            .all(|b| !b.is_ascii_control() || b.is_ascii_whitespace());
    if !is_text {
        return InputFormat::Binary;
    }

    match text {
        [b'{' | b'[' | b'"' | b'\'', ..] => InputFormat::Mojangson,
        _ if is_base64_nbt(text) => InputFormat::Base64,
        _ => InputFormat::Mojangson,
    }
}

/// Base64 of binary NBT is at least 8 characters, padded to a multiple of 4,
/// and starts with `A` to `D` because the first byte is a tag id below 13.
fn is_base64_nbt(text: &[u8]) -> bool {
    text.len() >= 8
        && text.len() % 4 == 0
        && matches!(text[0], b'A'..=b'D')
        && text
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(*b, b'+' | b'/' | b'='))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn detects_formats() {
        let named = NamedTag::unnamed(compound! { "id" => "minecraft:stone", "Count" => 1_i8 });

        let binary = named.to_bytes(Compression::None).unwrap();
        let gzip = named.to_bytes(Compression::Gzip).unwrap();
        let base64 = named.to_base64(Compression::None).unwrap();

        assert_eq!(detect_bytes(&binary), InputFormat::Binary);
        assert_eq!(detect_bytes(&gzip), InputFormat::Gzip);
        assert_eq!(detect_bytes(base64.as_bytes()), InputFormat::Base64);
        assert_eq!(detect_bytes(b"CgAAAA==\n"), InputFormat::Base64);
    }

    #[test]
    fn detects_mojangson_after_whitespace_and_scalars() {
        for text in [
            "{a:1}",
            "\n\t{a:1}\n",
            "  [1, 2]",
            "\"quoted\"",
            "'single'",
            "5b",
            "12345678",
            "true",
        ] {
            assert_eq!(detect_bytes(text.as_bytes()), InputFormat::Mojangson, "{text:?}");
        }
    }

    #[test]
    fn empty_input_is_binary() {
        assert_eq!(detect_bytes(b""), InputFormat::Binary);
        assert_eq!(detect_bytes(b"\n"), InputFormat::Binary);
    }
}
