// Reads Corp_Summary.csv from the working directory and offers three reports: the team
// hierarchy per department, salary statistics per department, and those statistics saved to
// Corp_Summary_Statistics.csv.
use std::process;

use env_logger::Env;
use log::debug;

use corp_summary::config::Settings;
use corp_summary::textinterface::{TextIO, TextInterface};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut interface = TextInterface::init(Settings::default(), TextIO::stdio());

    if let Err(e) = interface.run() {
        debug!("menu aborted: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
