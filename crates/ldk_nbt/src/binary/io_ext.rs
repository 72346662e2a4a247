//! Buffer, Base64 and file helpers on top of the raw codec.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use base64::prelude::*;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::{debug, trace};

use super::{from_binary, to_binary, Result};
use crate::NamedTag;

/// How binary NBT is wrapped when stored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Compression {
    /// Raw NBT, as sent over the network.
    None,
    /// Gzip, as used by `level.dat` and player data files.
    #[default]
    Gzip,
}

impl Compression {
    fn encode(self, named: &NamedTag, writer: impl Write) -> Result<()> {
        match self {
            Compression::None => to_binary(&named.tag, writer, &named.name),
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(writer, flate2::Compression::default());
                to_binary(&named.tag, &mut encoder, &named.name)?;
                encoder.finish()?;
                Ok(())
            }
        }
    }

    fn decode(self, reader: impl Read) -> Result<NamedTag> {
        match self {
            Compression::None => from_binary(reader),
            Compression::Gzip => from_binary(GzDecoder::new(reader)),
        }
    }
}

impl NamedTag {
    /// Encodes this tag into a new buffer.
    pub fn to_bytes(&self, compression: Compression) -> Result<Vec<u8>> {
        let mut buf = vec![];
        compression.encode(self, &mut buf)?;
        Ok(buf)
    }

    /// Decodes a tag from a buffer produced by [`NamedTag::to_bytes`].
    ///
    /// Bytes after the first tag are ignored.
    pub fn from_bytes(bytes: &[u8], compression: Compression) -> Result<Self> {
        compression.decode(bytes)
    }

    /// Encodes this tag and returns it as standard Base64.
    pub fn to_base64(&self, compression: Compression) -> Result<String> {
        Ok(BASE64_STANDARD.encode(self.to_bytes(compression)?))
    }

    /// Decodes a tag from standard Base64 produced by
    /// [`NamedTag::to_base64`].
    pub fn from_base64(text: &str, compression: Compression) -> Result<Self> {
        let bytes = BASE64_STANDARD.decode(text.trim())?;
        Self::from_bytes(&bytes, compression)
    }

    /// Reads a tag from a file.
    ///
    /// Returns `Ok(None)` if the file does not exist. Any other I/O failure
    /// or malformed content is an error.
    pub fn read_file(path: impl AsRef<Path>, compression: Compression) -> Result<Option<Self>> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %path.display(), "no NBT file to read");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let named = compression.decode(BufReader::new(file))?;

        debug!(
            path = %path.display(),
            ?compression,
            name = %named.name,
            tag_type = %named.tag.tag_type(),
            "read NBT file"
        );

        Ok(Some(named))
    }

    /// Writes this tag to a file, creating parent directories as needed and
    /// replacing any existing file.
    pub fn write_file(&self, path: impl AsRef<Path>, compression: Compression) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        compression.encode(self, &mut writer)?;
        writer.flush()?;

        debug!(path = %path.display(), ?compression, "wrote NBT file");

        Ok(())
    }
}
