use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use serde::Serialize;

use crate::department::Hierarchy;
use crate::error::{AccessMode, Result, RosterError};
use crate::roster::DEFAULT_DELIMITER;
use crate::statistics::Statistics;

pub const HIERARCHY_TITLE: &str = "Иерархия команд:";
pub const STATISTICS_TITLE: &str = "Сводный отчет по департаментам:";

pub const STATISTICS_HEADER: [&str; 5] = [
    "Департамент",
    "Численность",
    "Минимальная зарплата",
    "Максимальная зарплата",
    "Средняя зарплата",
];

/// Write the department → team listing.  Teams come out in whatever order the set yields them.
pub fn print_hierarchy<W: Write>(out: &mut W, hierarchy: &Hierarchy) -> io::Result<()> {
    writeln!(out, "\n{}\n", HIERARCHY_TITLE)?;

    for department in hierarchy {
        writeln!(out, "{}", department.name())?;
        for team in department.teams() {
            writeln!(out, "\t{}", team)?;
        }
    }

    writeln!(out)?;
    out.flush()
}

/// Write the per-department summary.  The average is always shown with two decimals.
pub fn print_statistics<W: Write>(out: &mut W, statistics: &Statistics) -> io::Result<()> {
    writeln!(out, "\n{}\n", STATISTICS_TITLE)?;

    for (department, stats) in statistics.iter() {
        writeln!(out, "{}", department)?;
        writeln!(out, "\tЧисленность: {} человек", stats.count)?;
        writeln!(out, "\tВилка зарплат: {} - {} рублей", stats.min_salary, stats.max_salary)?;
        writeln!(out, "\tСредняя зарплата: {:.2} рублей", stats.average())?;
    }

    writeln!(out)?;
    out.flush()
}

/// How `save_statistics` lays out its file.  Defaults to `;`, a header line and two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    delimiter: u8,
    include_header: bool,
    precision: u32,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            delimiter: DEFAULT_DELIMITER,
            include_header: true,
            precision: 2,
        }
    }
}

impl SaveOptions {
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

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

#[derive(Debug, Serialize)]
struct StatisticsRecord<'a> {
    department: &'a str,
    count: u64,
    min_salary: u64,
    max_salary: u64,
    average_salary: f64,
}

/// Persist `statistics` to `path`, one line per department, replacing any existing file.
pub fn save_statistics<P: AsRef<Path>>(
    statistics: &Statistics,
    path: P,
    options: SaveOptions,
) -> Result<()> {
    let path = path.as_ref();

    let file = File::create(path)
        .map_err(|e| RosterError::file_access(path, AccessMode::Write, e))?;

    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    if options.include_header {
        writer.write_record(&STATISTICS_HEADER)
            .map_err(|e| write_error(path, e))?;
    }

    for (department, stats) in statistics.iter() {
        let record = StatisticsRecord {
            department,
            count: stats.count,
            min_salary: stats.min_salary,
            max_salary: stats.max_salary,
            average_salary: round_to(stats.average(), options.precision),
        };

        writer.serialize(record).map_err(|e| write_error(path, e))?;
    }

    writer.flush()
        .map_err(|e| RosterError::file_access(path, AccessMode::Write, e))?;

    info!("saved statistics for {} departments to {}", statistics.len(), path.display());

    Ok(())
}

// f64 carries at most 17 significant digits, so more decimals change nothing
const MAX_PRECISION: u32 = 17;

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * factor).round() / factor
}

fn write_error(path: &Path, error: csv::Error) -> RosterError {
    let source = match error.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, format!("{:?}", other)),
    };

    RosterError::file_access(path, AccessMode::Write, source)
}
