//! Format dispatch -- pick a decoder and turn input bytes into a [`Value`].
//!
//! The format is either given explicitly or inferred from the path's
//! extension:
//!
//! - `.yaml`, `.yml` -- YAML
//! - `.toml` -- TOML
//! - anything else, no extension, or standard input -- JSON

use crate::error::{DtmplError, Result};
use crate::value::Value;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Path sentinel meaning "standard input" (or "standard output" for sinks).
pub const STDIO_SENTINEL: &str = "-";

/// A serialization format the dispatcher can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Infer the format from a path's extension, defaulting to JSON.
    pub fn infer(path: &Path) -> Format {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Format::Yaml
        } else if ext.eq_ignore_ascii_case("toml") {
            Format::Toml
        } else {
            Format::Json
        }
    }

    /// Resolve the format for `source`: an explicit choice always wins.
    pub fn select(source: &Source, explicit: Option<Format>) -> Format {
        match (explicit, source) {
            (Some(format), _) => format,
            (None, Source::File(path)) => Format::infer(path),
            (None, Source::Stdin) => Format::Json,
        }
    }

    /// Decode a complete document.
    pub fn decode(self, bytes: &[u8]) -> Result<Value> {
        let decoded = match self {
            Format::Json => serde_json::from_slice::<serde_json::Value>(bytes)
                .map(Value::from)
                .map_err(|e| e.to_string()),
            Format::Yaml => serde_yaml::from_slice::<serde_yaml::Value>(bytes)
                .map(Value::from)
                .map_err(|e| e.to_string()),
            Format::Toml => std::str::from_utf8(bytes)
                .map_err(|e| e.to_string())
                .and_then(|text| toml::from_str::<toml::Value>(text).map_err(|e| e.to_string()))
                .map(Value::from),
        };
        decoded.map_err(|message| DtmplError::Decode {
            format: self,
            message,
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        })
    }
}

impl FromStr for Format {
    type Err = DtmplError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            _ => Err(DtmplError::UnknownFormat(s.to_string())),
        }
    }
}

/// Where input bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn is_stdin(&self) -> bool {
        matches!(self, Source::Stdin)
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        if path == STDIO_SENTINEL {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(path))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read a source to the end.
pub fn read_source(source: &Source) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let read = match source {
        Source::Stdin => std::io::stdin().lock().read_to_end(&mut buf),
        Source::File(path) => std::fs::File::open(path).and_then(|mut f| f.read_to_end(&mut buf)),
    };
    read.map_err(|source_err| DtmplError::Io {
        resource: source.to_string(),
        source: source_err,
    })?;
    tracing::debug!(%source, bytes = buf.len(), "read input");
    Ok(buf)
}

/// Load and decode the data document at `source`.
///
/// # Errors
/// Returns [`DtmplError::Io`] when the resource cannot be read and
/// [`DtmplError::Decode`] when its contents do not parse.
pub fn decode(source: &Source, explicit: Option<Format>) -> Result<Value> {
    let format = Format::select(source, explicit);
    tracing::debug!(%source, %format, explicit = explicit.is_some(), "decoding data");
    let bytes = read_source(source)?;
    format.decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_is_case_insensitive() {
        assert_eq!(Format::infer(Path::new("DATA.YML")), Format::Yaml);
        assert_eq!(Format::infer(Path::new("Cargo.Toml")), Format::Toml);
    }

    #[test]
    fn sentinel_is_stdin() {
        assert_eq!(Source::from("-"), Source::Stdin);
        assert_eq!(Source::from("./-"), Source::File(PathBuf::from("./-")));
    }

    #[test]
    fn format_names_roundtrip_through_display() {
        for format in [Format::Json, Format::Yaml, Format::Toml] {
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
    }
}
