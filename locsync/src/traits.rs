//! The seam between on-disk documents and their in-memory models.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

use crate::{error::Error, writer::write_if_needed};

/// A document locsync loads, edits and saves back.
///
/// Implementors only supply [`Parser::from_reader`] and [`Parser::to_writer`].
/// Saving renders into memory first, so a document that cannot be rendered
/// never truncates the file it came from.
///
/// ```rust,no_run
/// use locsync::formats::plist::Document;
/// use locsync::traits::Parser;
///
/// if let Some(plist) = Document::read_if_exists("Info.plist")? {
///     plist.save("Info.plist")?;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser: Sized {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>;

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Like [`Parser::read_from`], with `None` for a file that is not there.
    fn read_if_exists<P: AsRef<Path>>(path: P) -> Result<Option<Self>, Error> {
        match File::open(path) {
            Ok(file) => Self::from_reader(BufReader::new(file)).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_reader(s.as_bytes())
    }

    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.to_writer(&mut bytes)?;
        Ok(bytes)
    }

    /// Writes the rendered document unless `path` already holds the same bytes.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<bool, Error> {
        write_if_needed(path, self.to_bytes()?)
    }
}
