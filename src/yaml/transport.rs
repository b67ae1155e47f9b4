//! Transports carrying schema text
//!
//! Both directions accept a small closed set of transports. Each is resolved
//! once at the entry point: sources into a string payload, sinks into a single
//! write of the fully rendered text.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Where schema text is read from
pub enum Source<'a> {
    /// Schema text held in memory
    Text(&'a str),
    /// An open readable stream, read to the end
    Reader(&'a mut dyn Read),
    /// A file on disk, opened and closed within the call
    Path(&'a Path),
}

impl<'a> Source<'a> {
    pub fn text(text: &'a str) -> Self {
        Source::Text(text)
    }

    pub fn reader<R: Read + 'a>(reader: &'a mut R) -> Self {
        Source::Reader(reader)
    }

    pub fn path<P: AsRef<Path> + ?Sized>(path: &'a P) -> Self {
        Source::Path(path.as_ref())
    }

    /// Short transport name for log fields
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Source::Text(_) => "text",
            Source::Reader(_) => "reader",
            Source::Path(_) => "path",
        }
    }

    /// Resolves the transport into the text payload
    pub(crate) fn read_text(self) -> io::Result<Cow<'a, str>> {
        match self {
            Source::Text(text) => Ok(Cow::Borrowed(text)),
            Source::Reader(reader) => {
                let mut text = String::new();
                reader.read_to_string(&mut text)?;
                Ok(Cow::Owned(text))
            }
            Source::Path(path) => {
                let mut file = File::open(path)?;
                let mut text = String::new();
                file.read_to_string(&mut text)?;
                Ok(Cow::Owned(text))
            }
        }
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Source::Text(text.as_str())
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Source::Path(path.as_path())
    }
}

/// Where schema text is written to
pub enum Sink<'a> {
    /// An open writable stream; flushed, left open
    Writer(&'a mut dyn Write),
    /// A file on disk, created or truncated, closed before returning
    Path(&'a Path),
}

impl<'a> Sink<'a> {
    pub fn writer<W: Write + 'a>(writer: &'a mut W) -> Self {
        Sink::Writer(writer)
    }

    pub fn path<P: AsRef<Path> + ?Sized>(path: &'a P) -> Self {
        Sink::Path(path.as_ref())
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Sink::Writer(_) => "writer",
            Sink::Path(_) => "path",
        }
    }

    /// Writes the rendered text in one go
    pub(crate) fn write_text(self, text: &str) -> io::Result<()> {
        match self {
            Sink::Writer(writer) => {
                writer.write_all(text.as_bytes())?;
                writer.flush()
            }
            Sink::Path(path) => {
                let mut file = File::create(path)?;
                file.write_all(text.as_bytes())?;
                file.flush()
            }
        }
    }
}

impl<'a> From<&'a Path> for Sink<'a> {
    fn from(path: &'a Path) -> Self {
        Sink::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for Sink<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Sink::Path(path.as_path())
    }
}
