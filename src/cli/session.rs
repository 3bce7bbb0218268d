//! Interactive session.
//!
//! Runs entered during a session live only as long as the process.

use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
};

use clap::{Parser, ValueHint};
use runlog::Config;
use tracing::{debug, instrument};

use super::{
    render::View,
    report_validation_errors,
    terminal::{is_narrow, Palette},
    RunLog,
};

const HELP: &str = "\
Commands:
  add [DISTANCE TIME [DATE]]  log a run (prompts for missing fields)
  import FILE...              import runs from .csv or .txt files
                              (quote paths that contain spaces)
  table                       show every run, most recent first
  recent                      show the most recent runs
  help                        show this message
  quit                        end the session";

#[derive(Debug, Default, Parser)]
#[command(about = "Start an interactive session")]
pub struct Session {
    /// Files to import when the session starts
    #[arg(value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,
}

impl Session {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        let stdout = io::stdout();

        let mut shell = Shell {
            log: RunLog::new(config),
            input: stdin.lock(),
            out: stdout.lock(),
            narrow: is_narrow(),
            interactive,
            palette: Palette::stdout(),
        };

        if !self.files.is_empty() {
            shell.import(&self.files)?;
        }
        shell.run()
    }
}

/// A read-eval-print loop over a [`RunLog`].
struct Shell<R, W> {
    log: RunLog,
    input: R,
    out: W,
    narrow: bool,
    interactive: bool,
    palette: Palette,
}

enum Flow {
    Continue,
    Quit,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    fn run(&mut self) -> anyhow::Result<()> {
        if self.interactive {
            let hint = self.palette.dim("Type 'help' for a list of commands.");
            writeln!(self.out, "{hint}")?;
        }

        while let Some(line) = self.read_line("runlog> ")? {
            if let Flow::Quit = self.execute(&line)? {
                break;
            }
        }
        Ok(())
    }

    /// Reads one trimmed line, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.interactive {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
        }

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        let words = split_words(line);
        let Some((command, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        debug!(command = command.as_str(), ?args, "session command");

        match command.as_str() {
            "add" => self.add(&args)?,
            "import" => {
                if args.is_empty() {
                    writeln!(self.out, "{}", self.palette.error("Usage: import FILE..."))?;
                } else {
                    let paths: Vec<PathBuf> = args.iter().map(PathBuf::from).collect();
                    self.import(&paths)?;
                }
            }
            "table" | "list" => self.show(&View::default())?,
            "recent" => self.show(&View::recent())?,
            "help" | "?" => writeln!(self.out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => writeln!(
                self.out,
                "{}",
                self.palette.error(&format!(
                    "Unknown command '{other}'. Type 'help' for a list of commands."
                ))
            )?,
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let mut fields: Vec<String> = args.iter().map(ToString::to_string).collect();

        let prompts = ["distance: ", "time (h:mm:ss): ", "date (yyyy/mm/dd): "];
        for prompt in prompts.iter().skip(fields.len()) {
            if args.is_empty() {
                fields.push(self.read_line(prompt)?.unwrap_or_default());
            } else {
                // inline arguments without a date leave it empty
                fields.push(String::new());
            }
        }

        match self.log.add(&fields[0], &fields[1], &fields[2]) {
            Ok(()) => {
                writeln!(self.out, "{}", self.palette.success("Run added"))?;
                self.show(&View::default())?;
            }
            Err(errors) => report_validation_errors(&mut self.out, self.palette, &errors)?,
        }
        Ok(())
    }

    fn import(&mut self, paths: &[PathBuf]) -> anyhow::Result<()> {
        let before = self.log.runs().len();
        self.log.import_all(paths, &mut self.out, self.palette)?;
        let added = self.log.runs().len() - before;
        let message = self.palette.info(&format!("Imported {added} run(s)"));
        writeln!(self.out, "{message}")?;
        Ok(())
    }

    fn show(&mut self, view: &View) -> anyhow::Result<()> {
        view.write(&mut self.out, self.log.runs(), self.log.config(), self.narrow)
    }
}

/// Splits a command line into words.
///
/// Text inside single or double quotes is kept together, so `import "my
/// runs.csv"` names one file. An unterminated quote runs to the end of the
/// line.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => word.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            None => {
                word.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(word);
    }
    words
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write as _};

    use runlog::RunDate;
    use test_case::test_case;

    use super::*;

    fn session(script: &str) -> (RunLog, String) {
        let mut shell = Shell {
            log: RunLog::with_today(Config::default(), RunDate::new(2024, 3, 1).unwrap()),
            input: Cursor::new(script.as_bytes().to_vec()),
            out: Vec::new(),
            narrow: false,
            interactive: false,
            palette: Palette::plain(),
        };
        shell.run().unwrap();
        let out = String::from_utf8(shell.out).unwrap();
        (shell.log, out)
    }

    #[test]
    fn adds_runs_inline_and_by_prompt() {
        let (log, out) = session("add 5 0:40:00 2023/05/10\nadd\n3\n0:21:00\n2023-06-15\n");
        assert_eq!(log.runs().len(), 2);
        assert_eq!(out.matches("Run added").count(), 2);
        assert_eq!(
            log.runs().all_sorted()[0].date(),
            RunDate::new(2023, 6, 15).unwrap()
        );
    }

    #[test]
    fn reports_every_error_and_keeps_going() {
        let (log, out) = session("add -1\nadd 5 0:40:00 2023/05/10\n");
        assert!(out.contains("the time for the run was not properly formatted"));
        assert!(out.contains("run distance is negative or 0"));
        assert!(out.contains("no date for the run was provided"));
        assert_eq!(log.runs().len(), 1);
    }

    #[test]
    fn imports_files() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"5,0:40:00,2023/05/10\n3,0:21:00\n").unwrap();

        let script = format!("import {}\nrecent\n", file.path().display());
        let (log, out) = session(&script);

        assert_eq!(log.runs().len(), 2);
        assert!(out.contains("Imported 2 run(s)"));
        assert!(out.contains("2024/03/01"));
    }

    #[test]
    fn imports_paths_containing_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("morning runs.csv");
        std::fs::write(&path, "5,0:40:00,2023/05/10\n").unwrap();

        let script = format!("import \"{}\"\n", path.display());
        let (log, out) = session(&script);

        assert_eq!(log.runs().len(), 1);
        assert!(out.contains("Imported 1 run(s)"));
    }

    #[test_case("add 5 0:40:00", &["add", "5", "0:40:00"]; "plain words")]
    #[test_case("  import   a.csv  ", &["import", "a.csv"]; "extra whitespace")]
    #[test_case("import \"my runs.csv\" b.txt", &["import", "my runs.csv", "b.txt"]; "double quotes")]
    #[test_case("import 'my runs.csv'", &["import", "my runs.csv"]; "single quotes")]
    #[test_case("import \"\"", &["import", ""]; "empty quotes")]
    #[test_case("", &[]; "empty line")]
    fn splits_words(line: &str, expected: &[&str]) {
        assert_eq!(split_words(line), expected);
    }

    #[test]
    fn stops_at_quit() {
        let (log, out) = session("quit\nadd 5 0:40:00 2023/05/10\n");
        assert!(log.runs().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn empty_table_and_unknown_commands() {
        let (_, out) = session("table\n\nfrobnicate\n");
        assert!(out.contains("No runs added yet."));
        assert!(out.contains("Unknown command 'frobnicate'"));
    }
}
