use std::io::{self, prelude::*, StdinLock, Stdout};

use log::{debug, info};
use thiserror::Error;

use crate::config::Settings;
use crate::department::Hierarchy;
use crate::error::RosterError;
use crate::report;
use crate::statistics::Statistics;

pub type Result<T> = std::result::Result<T, TextInterfaceError>;

struct Command<R, W> {
    keyword: &'static str,
    description: &'static str,
    operation: fn(&mut TextInterface<R, W>) -> Result<()>,
}

/// The numbered report menu.  Hierarchy and statistics are computed on first use and then
/// reused for the rest of the session, even if the roster changes on disk in the meantime.
pub struct TextInterface<R, W> {
    io: TextIO<R, W>,
    settings: Settings,
    hierarchy: Option<Hierarchy>,
    statistics: Option<Statistics>,
    commands: Vec<Command<R, W>>,
}

impl<R: BufRead, W: Write> TextInterface<R, W> {
    pub fn init(settings: Settings, io: TextIO<R, W>) -> Self {
        let mut commands: Vec<Command<R, W>> = Vec::new();

        commands.push(Command {
            keyword: "1",
            description: "Вывести в понятном виде иерархию команд",
            operation: Self::show_hierarchy,
        });

        commands.push(Command {
            keyword: "2",
            description: "Вывести сводный отчёт по департаментам",
            operation: Self::show_statistics,
        });

        commands.push(Command {
            keyword: "3",
            description: "Сохранить сводный отчёт из предыдущего пункта в виде csv-файла",
            operation: Self::save_statistics,
        });

        TextInterface {
            io,
            settings,
            hierarchy: None,
            statistics: None,
            commands,
        }
    }

    /// Loop over menu choices until the user picks something that is not a command or input
    /// runs out.  Any roster or console error ends the loop and is handed back to the caller.
    pub fn run(&mut self) -> Result<()> {
        let mut io_buff = String::new();

        loop {
            self.print_menu()?;

            io_buff.clear();
            if self.io.input.read_line(&mut io_buff)? == 0 {
                debug!("input closed, leaving menu");
                return Ok(());
            }

            if !self.dispatch(io_buff.trim())? {
                return Ok(());
            }
        }
    }

    /// Run the command bound to `choice`.  Returns false when the choice means "exit".
    pub fn dispatch(&mut self, choice: &str) -> Result<bool> {
        let op = self.commands
            .iter()
            .find(|item| item.keyword == choice)
            .map(|item| item.operation);

        match op {
            Some(op) => {
                (op)(self)?;
                Ok(true)
            },
            None => {
                info!("leaving menu on input {:?}", choice);
                Ok(false)
            },
        }
    }

    pub fn hierarchy(&self) -> Option<&Hierarchy> {
        self.hierarchy.as_ref()
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn output(&self) -> &W {
        &self.io.output
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.io.output, "Меню:")?;
        for item in &self.commands {
            writeln!(self.io.output, "{}. {}", item.keyword, item.description)?;
        }
        writeln!(self.io.output, "Любой символ, чтобы выйти")?;

        self.io.output.write_all("Введите номер нужного действия: ".as_bytes())?;
        self.io.output.flush()?;
        Ok(())
    }

    fn show_hierarchy(&mut self) -> Result<()> {
        let settings = &self.settings;
        let hierarchy = memoized(&mut self.hierarchy, || {
            Hierarchy::load(&settings.input_path, settings.reader_options())
        })?;

        report::print_hierarchy(&mut self.io.output, hierarchy)?;
        Ok(())
    }

    fn show_statistics(&mut self) -> Result<()> {
        let settings = &self.settings;
        let statistics = memoized(&mut self.statistics, || {
            Statistics::load(&settings.input_path, settings.reader_options())
        })?;

        report::print_statistics(&mut self.io.output, statistics)?;
        Ok(())
    }

    fn save_statistics(&mut self) -> Result<()> {
        let settings = &self.settings;
        let statistics = memoized(&mut self.statistics, || {
            Statistics::load(&settings.input_path, settings.reader_options())
        })?;

        report::save_statistics(statistics, &settings.output_path, settings.save)?;

        writeln!(self.io.output, "\nОтчёт сохранён в {}\n", settings.output_path.display())?;
        Ok(())
    }
}

/// Fill `slot` with `load` the first time through, then keep handing back the stored value.
fn memoized<T, F>(slot: &mut Option<T>, load: F) -> crate::error::Result<&T>
where
    F: FnOnce() -> crate::error::Result<T>,
{
    let value = match slot.take() {
        Some(value) => value,
        None => load()?,
    };

    let value: &T = slot.insert(value);
    Ok(value)
}

/// Console endpoints for the menu.  The binary binds these to stdin and stdout.
pub struct TextIO<R, W> {
    input: R,
    output: W,
}

impl TextIO<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        TextIO {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }
}

impl<R: BufRead, W: Write> TextIO<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TextIO { input, output }
    }
}

#[derive(Error, Debug)]
pub enum TextInterfaceError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("Console IO Error({0})")]
    IOError(#[from] io::Error),
}
