use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

mod add;
mod import;
mod pace;
mod render;
mod session;
mod terminal;

use add::Add;
use clap::ArgAction;
use import::Import;
use nonempty::NonEmpty;
use pace::{Compare, PaceCommand};
use runlog::{
    storage::import_file, Config, ImportError, RunCollection, RunDate, RunRecordParser,
    ValidationError,
};
use session::Session;
use terminal::Palette;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file (ignored if it does not exist)
    #[arg(short, long, default_value = "runlog.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = Config::load_or_default(&self.config)
            .map_err(|e| anyhow::anyhow!("{}: {e}", self.config.display()))?;

        self.command
            .unwrap_or_else(|| Command::Session(Session::default()))
            .run(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Log a run by hand and show the log
    Add(Add),

    /// Import runs from CSV or plain-text files and show them
    ///
    /// Each line is 'distance,h:mm:ss[,yyyy/mm/dd]'. Lines without a date are
    /// dated today. Import of a file stops at its first invalid line.
    Import(Import),

    /// Start an interactive session (default)
    Session(Session),

    /// Calculate the pace of a run
    Pace(PaceCommand),

    /// Compare two paces
    Compare(Compare),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Add(command) => command.run(config)?,
            Self::Import(command) => command.run(config)?,
            Self::Session(command) => command.run(config)?,
            Self::Pace(command) => command.run(&config)?,
            Self::Compare(command) => command.run()?,
        }
        Ok(())
    }
}

/// The state of one session: the runs entered so far and how to parse more.
///
/// Nothing outlives the process; the log is dropped when the command ends.
#[derive(Debug)]
pub struct RunLog {
    config: Config,
    parser: RunRecordParser,
    runs: RunCollection,
}

impl RunLog {
    pub fn new(config: Config) -> Self {
        Self::with_today(config, RunDate::today())
    }

    pub fn with_today(config: Config, today: RunDate) -> Self {
        let parser = RunRecordParser::new(today).with_rounding(config.pace_rounding());
        Self {
            config,
            parser,
            runs: RunCollection::new(),
        }
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn runs(&self) -> &RunCollection {
        &self.runs
    }

    /// Validates and stores a manually entered run.
    pub fn add(
        &mut self,
        distance: &str,
        time: &str,
        date: &str,
    ) -> Result<(), NonEmpty<ValidationError>> {
        let record = self.parser.parse_manual_input(distance, time, date)?;
        self.runs.insert(record);
        Ok(())
    }

    /// Imports a file, keeping whatever was read before an invalid line.
    #[instrument(level = "debug", skip(self))]
    pub fn import(&mut self, path: &Path) -> Result<usize, ImportError> {
        import_file(path, &mut self.runs, &self.parser)
    }

    /// Imports each file in turn, reporting problems to `out`.
    ///
    /// A bad file does not prevent the following files from being imported.
    /// Returns `true` if every file was imported completely.
    pub fn import_all<W: Write>(
        &mut self,
        paths: &[PathBuf],
        out: &mut W,
        palette: Palette,
    ) -> io::Result<bool> {
        let mut clean = true;
        for path in paths {
            match self.import(path) {
                Ok(count) => {
                    tracing::info!(path = %path.display(), count, "imported runs");
                }
                Err(error) => {
                    clean = false;
                    report_import_error(out, palette, path, &error)?;
                }
            }
        }
        Ok(clean)
    }
}

/// Writes every validation error of a rejected manual entry.
fn report_validation_errors<W: Write>(
    out: &mut W,
    palette: Palette,
    errors: &NonEmpty<ValidationError>,
) -> io::Result<()> {
    for error in errors.iter() {
        writeln!(out, "{}", palette.error(&format!("Error, {error}")))?;
    }
    Ok(())
}

fn report_import_error<W: Write>(
    out: &mut W,
    palette: Palette,
    path: &Path,
    error: &ImportError,
) -> io::Result<()> {
    match error {
        ImportError::InvalidLine {
            line_number,
            content,
            imported,
            source,
        } => {
            writeln!(
                out,
                "{}",
                palette.error(&format!(
                    "Error in {} at line {line_number}: {content}",
                    path.display()
                ))
            )?;
            writeln!(out, "  {source}")?;
            writeln!(
                out,
                "{}",
                palette.dim(&format!(
                    "  {imported} run(s) before this line were imported"
                ))
            )?;
        }
        other => writeln!(out, "{}", palette.error(&format!("Error, {other}")))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn log() -> RunLog {
        RunLog::with_today(Config::default(), RunDate::new(2024, 3, 1).unwrap())
    }

    #[test]
    fn add_stores_valid_run() {
        let mut log = log();
        log.add("5", "0:40:00", "2023-05-10").unwrap();
        assert_eq!(log.runs().len(), 1);
    }

    #[test]
    fn add_reports_all_errors() {
        let mut log = log();
        let errors = log.add("-1", "", "").unwrap_err();

        let mut out = Vec::new();
        report_validation_errors(&mut out, Palette::plain(), &errors).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("the time for the run was not properly formatted"));
        assert!(out.contains("run distance is negative or 0"));
        assert!(out.contains("no date for the run was provided"));
        assert!(log.runs().is_empty());
    }

    #[test]
    fn import_all_continues_after_bad_file() {
        let mut bad = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        bad.write_all(b"3,0:21:00,2023/01/01\nnot a run\n5,0:40:00\n")
            .unwrap();
        let mut good = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        good.write_all(b"10,1:40:00,2022/12/31\n").unwrap();

        let mut log = log();
        let mut out = Vec::new();
        let clean = log
            .import_all(
                &[bad.path().to_path_buf(), good.path().to_path_buf()],
                &mut out,
                Palette::plain(),
            )
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(!clean);
        assert!(out.contains("at line 2: not a run"));
        assert!(out.contains("1 run(s) before this line were imported"));
        assert_eq!(log.runs().len(), 2);
    }
}
