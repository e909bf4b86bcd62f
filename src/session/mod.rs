mod command;

pub use command::Command;

use std::io::{self, BufRead, Write};

use log::debug;

use crate::errors::UpdateError;
use crate::record::{RunKey, TestRun};
use crate::results_table::{ResultsTable, StoreBackend};

/// The interactive read-eval loop. Generic over its input and output streams
/// so scripted sessions can drive it in tests.
///
/// One command runs to completion, including all nested prompts and the
/// store round trip, before the next prompt is shown.
pub struct Session<'t, B, R, W> {
    table: &'t ResultsTable<B>,
    input: R,
    output: W,
}

impl<'t, B, R, W> Session<'t, B, R, W>
where
    B: StoreBackend,
    R: BufRead,
    W: Write,
{
    pub fn new(table: &'t ResultsTable<B>, input: R, output: W) -> Self {
        Self {
            table,
            input,
            output,
        }
    }

    /// Runs until the quit command or end of input. Only I/O failures on the
    /// session's own streams are fatal; every command failure is printed and
    /// the loop re-prompts.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(line) =
                self.prompt("Enter command (add, update, delete, find, list, check, quit):")?
            else {
                break;
            };

            if line.is_empty() {
                writeln!(self.output, "No command entered. Try again.")?;
                continue;
            }

            match Command::parse(&line) {
                Some(Command::Add) => self.add().await?,
                Some(Command::Update) => self.update().await?,
                Some(Command::Delete) => self.delete().await?,
                Some(Command::Find) => self.find().await?,
                Some(Command::List) => self.list().await?,
                Some(Command::Check) => self.check().await?,
                Some(Command::Quit) => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                None => {
                    debug!("unrecognized command: {line:?}");
                    writeln!(self.output, "Invalid command. Try again.")?;
                }
            }
        }

        Ok(())
    }

    /// Prints `message`, then reads one line. Returns `None` at end of
    /// input. The trailing line terminator is stripped; the rest of the
    /// line is returned untouched.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        Ok(Some(line))
    }

    /// Prompts for one required field; a blank answer aborts the command
    /// before any store call is made.
    fn required_field(&mut self, message: &str, error: &str) -> io::Result<Option<String>> {
        let Some(value) = self.prompt(message)? else {
            return Ok(None);
        };

        let value = value.trim();
        if value.is_empty() {
            writeln!(self.output, "{error}")?;
            return Ok(None);
        }

        Ok(Some(value.to_string()))
    }

    fn load_record_from_prompt(&mut self, message: &str) -> io::Result<Option<TestRun>> {
        let Some(path) = self.required_field(
            message,
            "No file location entered. Please provide a valid file.",
        )?
        else {
            return Ok(None);
        };

        match TestRun::from_json_file(&path) {
            Ok(run) => Ok(Some(run)),
            Err(e) => {
                writeln!(self.output, "Error processing the file: {e}")?;
                Ok(None)
            }
        }
    }

    async fn add(&mut self) -> io::Result<()> {
        let Some(run) =
            self.load_record_from_prompt("Enter file location containing JSON data for the entry:")?
        else {
            return Ok(());
        };

        match self.table.put(&run).await {
            Ok(()) => writeln!(self.output, "Entry added successfully."),
            Err(e) => writeln!(self.output, "Error adding entry: {e}"),
        }
    }

    async fn update(&mut self) -> io::Result<()> {
        let Some(run) = self.load_record_from_prompt(
            "Enter file location containing JSON data for the entry (includes date and application):",
        )?
        else {
            return Ok(());
        };

        match self.table.update(&run).await {
            Ok(()) => writeln!(self.output, "Entry updated successfully."),
            Err(UpdateError::NotFound) => writeln!(
                self.output,
                "No entry found for date={} application={}. Nothing was updated.",
                run.date, run.application
            ),
            Err(e) => writeln!(self.output, "Error updating entry: {e}"),
        }
    }

    async fn delete(&mut self) -> io::Result<()> {
        let Some(date) = self.required_field(
            "Enter date to delete:",
            "Date is required to delete the entry.",
        )?
        else {
            return Ok(());
        };

        let Some(application) = self.required_field(
            "Enter application to delete:",
            "Application is required to delete the entry.",
        )?
        else {
            return Ok(());
        };

        let key = RunKey::new(date, application);
        match self.table.delete(&key).await {
            Ok(()) => writeln!(self.output, "Entry deleted or was not found."),
            Err(e) => writeln!(self.output, "Error deleting entry: {e}"),
        }
    }

    async fn find(&mut self) -> io::Result<()> {
        let Some(date) =
            self.required_field("Enter date to find:", "Date is required to find the entry.")?
        else {
            return Ok(());
        };

        let Some(application) = self.required_field(
            "Enter application to find:",
            "Application is required to find the entry.",
        )?
        else {
            return Ok(());
        };

        let key = RunKey::new(date, application);
        match self.table.get(&key).await {
            Ok(Some(run)) => writeln!(self.output, "Found entry: {run}"),
            Ok(None) => writeln!(self.output, "No entry found."),
            Err(e) => writeln!(self.output, "Error finding entry: {e}"),
        }
    }

    async fn list(&mut self) -> io::Result<()> {
        let Some(date) = self.prompt("Enter date for filter (leave blank to skip):")? else {
            return Ok(());
        };

        let Some(application) = self.prompt("Enter application for filter (leave blank to skip):")?
        else {
            return Ok(());
        };

        let mut scan = self.table.scan();
        let date = date.trim();
        if !date.is_empty() {
            scan = scan.date(date);
        }
        let application = application.trim();
        if !application.is_empty() {
            scan = scan.application(application);
        }

        match scan.send().await {
            Ok(runs) if runs.is_empty() => writeln!(self.output, "No entries found."),
            Ok(runs) => {
                for run in &runs {
                    writeln!(self.output, "{run}")?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "Error listing entries: {e}"),
        }
    }

    async fn check(&mut self) -> io::Result<()> {
        match self.table.check().await {
            Ok(status) => writeln!(
                self.output,
                "DynamoDB is accessible. Table status: {status}"
            ),
            Err(e) => writeln!(self.output, "Error accessing DynamoDB: {e}"),
        }
    }
}
