use std::{path::PathBuf, process};

use clap::Parser;
use runlog::Config;
use tracing::instrument;

use super::{render::View, report_validation_errors, terminal::Palette, RunLog};

#[derive(Debug, Parser)]
#[command(about = "Log a run by hand and show the log")]
pub struct Add {
    /// Distance covered (e.g. 5 or 3.1)
    #[arg(long, short, allow_hyphen_values = true)]
    distance: String,

    /// Elapsed time as h:mm:ss
    #[arg(long, short, allow_hyphen_values = true)]
    time: String,

    /// Date as yyyy/mm/dd (hyphens are accepted and read in the same order)
    #[arg(long, short = 'D', default_value = "")]
    date: String,

    /// Files to import before adding the run
    #[arg(long, value_name = "FILE")]
    import: Vec<PathBuf>,

    #[command(flatten)]
    view: View,
}

impl Add {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let mut log = RunLog::new(config);
        let palette = Palette::stderr();
        let mut stderr = std::io::stderr();
        let mut clean = log.import_all(&self.import, &mut stderr, palette)?;

        match log.add(&self.distance, &self.time, &self.date) {
            Ok(()) => eprintln!("{}", palette.success("Run added")),
            Err(errors) => {
                report_validation_errors(&mut stderr, palette, &errors)?;
                clean = false;
            }
        }

        self.view.print(log.runs(), log.config())?;

        if !clean {
            process::exit(1);
        }
        Ok(())
    }
}
