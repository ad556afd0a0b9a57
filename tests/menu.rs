use std::fs;
use std::path::Path;

use corp_summary::config::Settings;
use corp_summary::roster::{ReaderOptions, Row};
use corp_summary::textinterface::{TextIO, TextInterface, TextInterfaceError};
use corp_summary::RosterError;

const ROSTER: &str = "ФИО полностью;Департамент;Отдел;Должность;Оценка;Оклад\n\
                      Иванов Иван;Engineering;Backend;Developer;4.5;90000\n\
                      Петров Пётр;Engineering;Frontend;Developer;4;70000\n\
                      Сидорова Анна;Sales;Closers;Manager;5;50000\n\
                      Смирнов Олег;Engineering;Backend;Tester;3.5;80000\n";

fn settings_in(dir: &Path, roster: &str) -> Settings {
    let input = dir.join("Corp_Summary.csv");
    fs::write(&input, roster).unwrap();
    Settings::with_paths(input, dir.join("Corp_Summary_Statistics.csv"))
}

fn run_menu(settings: Settings, input: &str) -> (Result<(), TextInterfaceError>, String) {
    let mut menu = TextInterface::init(settings, TextIO::new(input.as_bytes(), Vec::new()));
    let result = menu.run();
    let output = String::from_utf8(menu.output().clone()).unwrap();
    (result, output)
}

#[test]
fn report_then_save_then_exit() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path(), ROSTER);
    let output_path = settings.output_path.clone();

    let (result, output) = run_menu(settings, "2\n3\nx\n");
    result.unwrap();

    assert!(output.contains("Сводный отчет по департаментам:"));
    assert!(output.contains("Engineering\n\tЧисленность: 3 человек\n\tВилка зарплат: 70000 - 90000 рублей\n\tСредняя зарплата: 80000.00 рублей\n"));
    assert!(output.contains("Sales\n\tЧисленность: 1 человек\n"));
    assert_eq!(output.matches("Меню:").count(), 3);

    let rows: Vec<Row> = ReaderOptions::new()
        .include_header(true)
        .open(&output_path)
        .unwrap()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].fields()[0], "Департамент");
    assert_eq!(rows[1].fields(), ["Engineering", "3", "70000", "90000", "80000.0"]);
    assert_eq!(rows[2].fields(), ["Sales", "1", "50000", "50000", "50000.0"]);
}

#[test]
fn hierarchy_then_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path(), ROSTER);

    let (result, output) = run_menu(settings, "1\n");
    result.unwrap();

    let report = output.split("Иерархия команд:").nth(1).unwrap();
    let lines: Vec<&str> = report.lines().filter(|l| !l.is_empty()).collect();

    let engineering = lines.iter().position(|l| *l == "Engineering").unwrap();
    let sales = lines.iter().position(|l| *l == "Sales").unwrap();
    assert!(engineering < sales);

    let mut teams: Vec<&str> = lines[engineering + 1..sales].to_vec();
    teams.sort();
    assert_eq!(teams, vec!["\tBackend", "\tFrontend"]);
    assert_eq!(lines[sales + 1], "\tClosers");
}

#[test]
fn statistics_scan_happens_once() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path(), ROSTER);
    let input_path = settings.input_path.clone();
    let output_path = settings.output_path.clone();

    let mut menu = TextInterface::init(settings, TextIO::new(&b""[..], Vec::new()));

    assert!(menu.dispatch("2").unwrap());
    fs::remove_file(&input_path).unwrap();
    assert!(menu.dispatch("3").unwrap());
    assert!(!menu.dispatch("x").unwrap());

    assert!(output_path.exists());
}

#[test]
fn malformed_salary_stops_the_program() {
    let dir = tempfile::tempdir().unwrap();
    let roster = "h;d;t;s\nA;Ops;Night;100\nB;Ops;Day;сто\n";
    let settings = settings_in(dir.path(), roster);
    let output_path = settings.output_path.clone();

    let (result, _) = run_menu(settings, "3\n1\n");

    match result {
        Err(TextInterfaceError::Roster(RosterError::MalformedRow { line, field, .. })) => {
            assert_eq!(line, 3);
            assert_eq!(field, "salary");
        },
        other => panic!("expected malformed row, got {:?}", other),
    }
    assert!(!output_path.exists());
}

#[test]
fn blank_row_stops_the_program() {
    let dir = tempfile::tempdir().unwrap();
    let roster = "h;d;t;s\nA;Ops;Night;100\n\nB;Ops;Day;200\n";
    let settings = settings_in(dir.path(), roster);

    let (result, output) = run_menu(settings, "1\n");

    match result {
        Err(TextInterfaceError::Roster(RosterError::MalformedRow { line, reason, .. })) => {
            assert_eq!(line, 3);
            assert_eq!(reason, "blank line");
        },
        other => panic!("expected malformed row, got {:?}", other),
    }
    assert!(!output.contains("Иерархия команд:"));
}

#[test]
fn missing_roster_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::with_paths(dir.path().join("Corp_Summary.csv"), dir.path().join("out.csv"));

    let (result, _) = run_menu(settings, "2\n");
    let message = result.unwrap_err().to_string();

    assert!(message.contains("Corp_Summary.csv"));
    assert!(message.contains("reading"));
}

#[test]
fn default_settings_use_fixed_file_names() {
    let settings = Settings::default();

    assert_eq!(settings.input_path, Path::new("Corp_Summary.csv"));
    assert_eq!(settings.output_path, Path::new("Corp_Summary_Statistics.csv"));
    assert_eq!(settings.delimiter, b';');
}
