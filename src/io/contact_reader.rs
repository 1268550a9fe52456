//! Reader for the contact-detail feed
//!
//! The contact feed is a plain-text stream of `Key: value` lines. Blocks
//! are separated by a line of one or more repeated delimiter characters
//! (`-----`, `=====`, and the like); blank lines are ignored, as are lines
//! with no colon at all. The feed has no fixed field set, so this layer
//! does no validation beyond splitting keys from values; it hands
//! complete blocks to the importer, which decides what to keep.

use crate::types::{ContactBlock, ReportError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reader that parses a contact stream into blocks
#[derive(Debug)]
pub struct ContactReader<R: BufRead> {
    reader: R,
}

impl ContactReader<BufReader<File>> {
    /// Open a contact feed file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the contact feed
    ///
    /// # Returns
    ///
    /// * `Ok(ContactReader)` - If the file opened successfully
    /// * `Err(ReportError)` - `FileNotFound` for a missing path, `IoError`
    ///   for any other open failure
    pub fn open(path: &Path) -> Result<Self, ReportError> {
        let file = File::open(path).map_err(|error| match error.kind() {
            std::io::ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ReportError::from(error),
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ContactReader<R> {
    /// Wrap any buffered byte source in a contact reader
    pub fn from_reader(reader: R) -> Self {
        ContactReader { reader }
    }

    /// Read the whole stream into a list of blocks
    ///
    /// A trailing block not followed by a separator line is still
    /// produced; consecutive separators do not produce empty blocks.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ContactBlock>)` - The blocks, in feed order
    /// * `Err(ReportError)` - If reading the underlying stream fails
    pub fn read_blocks(self) -> Result<Vec<ContactBlock>, ReportError> {
        let mut blocks = Vec::new();
        let mut current = ContactBlock::new();

        for line in self.reader.lines() {
            let line = line?;
            if is_separator(&line) {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                current.push(key.trim().to_string(), value.trim().to_string());
            }
        }
        if !current.is_empty() {
            blocks.push(current);
        }

        Ok(blocks)
    }
}

/// Whether a line is a block separator
///
/// A separator is a non-empty run of one repeated character that is
/// neither alphanumeric nor a colon, e.g. `-----` or `=====`. The colon
/// exclusion keeps pathological `::` keys from eating a block boundary.
fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) if !first.is_alphanumeric() && first != ':' => chars.all(|c| c == first),
        _ => false,
    }
}
