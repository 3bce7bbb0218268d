use std::{path::PathBuf, process};

use clap::{Parser, ValueHint};
use runlog::Config;
use tracing::instrument;

use super::{render::View, terminal::Palette, RunLog};

#[derive(Debug, Parser)]
#[command(about = "Import runs from CSV or plain-text files and show them")]
pub struct Import {
    /// `.csv` or `.txt` files, one 'distance,h:mm:ss[,yyyy/mm/dd]' run per line
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    view: View,
}

impl Import {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let mut log = RunLog::new(config);
        let clean = log.import_all(&self.files, &mut std::io::stderr(), Palette::stderr())?;

        // runs read before an invalid line are still shown
        self.view.print(log.runs(), log.config())?;

        if !clean {
            process::exit(1);
        }
        Ok(())
    }
}
