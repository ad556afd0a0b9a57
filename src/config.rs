use std::path::PathBuf;

use crate::report::SaveOptions;
use crate::roster::{ReaderOptions, DEFAULT_DELIMITER};

pub const INPUT_FILE: &str = "Corp_Summary.csv";
pub const OUTPUT_FILE: &str = "Corp_Summary_Statistics.csv";

/// File locations and formats used by the menu.  The binary always runs with the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub delimiter: u8,
    pub save: SaveOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_path: PathBuf::from(INPUT_FILE),
            output_path: PathBuf::from(OUTPUT_FILE),
            delimiter: DEFAULT_DELIMITER,
            save: SaveOptions::default(),
        }
    }
}

impl Settings {
    pub fn with_paths(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Settings {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Settings::default()
        }
    }

    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions::new().delimiter(self.delimiter)
    }
}
