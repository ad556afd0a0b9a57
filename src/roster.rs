use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{AccessMode, Result, RosterError};

pub const DEFAULT_DELIMITER: u8 = b';';

/// One data line of the roster.  Field 1 holds the department, field 2 the team and the last
/// field the salary; everything else is carried along untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: u64,
    fields: Vec<String>,
}

impl Row {
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Row { line, fields }
    }

    /// Physical line in the source file, starting at 1 for the header.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn department(&self) -> Result<&str> {
        self.field(1, "department")
    }

    pub fn team(&self) -> Result<&str> {
        self.field(2, "team")
    }

    /// Parse the last field as a whole, non-negative salary.  Decimal or negative values are
    /// rejected.
    pub fn salary(&self) -> Result<u64> {
        // a salary column on its own would also be the department column
        if self.fields.len() < 2 {
            return Err(self.too_short("salary", 2));
        }

        let raw = self.fields[self.fields.len() - 1].trim();

        u64::from_str(raw).map_err(|e| {
            RosterError::malformed(self.line, "salary", format!("'{}' is not a whole salary: {}", raw, e))
        })
    }

    fn field(&self, index: usize, name: &str) -> Result<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.too_short(name, index + 1))
    }

    fn too_short(&self, name: &str, needed: usize) -> RosterError {
        if self.fields.is_empty() {
            return RosterError::malformed(self.line, name, "blank line");
        }

        RosterError::malformed(
            self.line,
            name,
            format!("expected at least {} fields, found {}", needed, self.fields.len()),
        )
    }
}

/// Settings for opening a roster file.  Defaults to `;` and a discarded header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    delimiter: u8,
    include_header: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            delimiter: DEFAULT_DELIMITER,
            include_header: false,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn include_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<RosterReader> {
        RosterReader::open(path, self)
    }
}

/// Lazy, single-pass reader over a delimited roster file.
///
/// Every physical line is one row.  The first line is always the header, even when it is blank,
/// and is only handed out when `include_header` is set.  A blank line comes back as a row with
/// no fields so the aggregators can reject it.  The file handle is owned by the iterator: it is
/// dropped as soon as the input is exhausted or a read fails, and otherwise when the iterator
/// itself is dropped.
pub struct RosterReader {
    path: PathBuf,
    input: Option<BufReader<File>>,
    parser: ReaderBuilder,
    buffer: Vec<u8>,
    record: StringRecord,
    include_header: bool,
    line: u64,
}

impl RosterReader {
    pub fn open<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path)
            .map_err(|e| RosterError::file_access(&path, AccessMode::Read, e))?;

        let mut parser = ReaderBuilder::new();
        parser.delimiter(options.delimiter)
            .has_headers(false)
            .flexible(true);

        Ok(RosterReader {
            path,
            input: Some(BufReader::new(file)),
            parser,
            buffer: Vec::new(),
            record: StringRecord::new(),
            include_header: options.include_header,
            line: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_line(&mut self) -> Result<Row> {
        let line = self.line;
        let mut reader = self.parser.from_reader(self.buffer.as_slice());

        match reader.read_record(&mut self.record) {
            Ok(true) => Ok(Row::new(line, self.record.iter().map(String::from).collect())),
            Ok(false) => Ok(Row::new(line, Vec::new())),
            Err(e) => Err(convert(&self.path, line, e)),
        }
    }
}

fn convert(path: &Path, line: u64, error: csv::Error) -> RosterError {
    match error.into_kind() {
        csv::ErrorKind::Io(source) => RosterError::file_access(path, AccessMode::Read, source),
        csv::ErrorKind::Utf8 { err, .. } => {
            RosterError::malformed(line, err.field().to_string(), "field is not valid UTF-8")
        },
        other => RosterError::malformed(line, "row", format!("{:?}", other)),
    }
}

impl Iterator for RosterReader {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let input = self.input.as_mut()?;

            self.buffer.clear();
            match input.read_until(b'\n', &mut self.buffer) {
                Ok(0) => {
                    self.input = None;
                    return None;
                },
                Ok(_) => self.line += 1,
                Err(e) => {
                    self.input = None;
                    return Some(Err(RosterError::file_access(&self.path, AccessMode::Read, e)));
                },
            }

            if self.line == 1 && !self.include_header {
                continue;
            }

            let row = self.parse_line();
            if row.is_err() {
                self.input = None;
            }
            return Some(row);
        }
    }
}

impl FusedIterator for RosterReader {}

/// Open `path` with the default delimiter, skipping the header line.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<RosterReader> {
    ReaderOptions::default().open(path)
}
