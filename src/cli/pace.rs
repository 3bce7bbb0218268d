use std::cmp::Ordering;

use anyhow::Context;
use clap::Parser;
use runlog::{
    domain::{
        pace::{calculate_pace_with, compare_pace, has_representable_pace},
        ValidationError,
    },
    Config, RunDuration,
};

#[derive(Debug, Parser)]
#[command(about = "Calculate the pace of a run")]
pub struct PaceCommand {
    /// Distance covered
    #[arg(long, short, allow_hyphen_values = true)]
    distance: f64,

    /// Elapsed time as h:mm:ss
    #[arg(long, short)]
    time: String,
}

impl PaceCommand {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        if self.distance <= 0.0 || !self.distance.is_finite() {
            return Err(ValidationError::NonPositiveDistance(self.distance.to_string()).into());
        }
        let duration: RunDuration = self
            .time
            .parse()
            .map_err(ValidationError::MalformedDuration)?;
        if !has_representable_pace(self.distance, &duration) {
            return Err(ValidationError::DistanceTooSmall(self.distance.to_string()).into());
        }

        let pace = calculate_pace_with(self.distance, &duration, config.pace_rounding());
        println!("{pace} min/{}", config.distance_unit());
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Compare two paces (m:ss)")]
pub struct Compare {
    /// The first pace
    first: String,

    /// The second pace
    second: String,
}

impl Compare {
    pub fn run(self) -> anyhow::Result<()> {
        let ordering =
            compare_pace(&self.first, &self.second).context("cannot compare paces")?;
        println!("{}", describe(&self.first, &self.second, ordering));
        Ok(())
    }
}

fn describe(first: &str, second: &str, ordering: Ordering) -> String {
    match ordering {
        Ordering::Less => format!("{first} is faster than {second}"),
        Ordering::Greater => format!("{first} is slower than {second}"),
        Ordering::Equal => format!("{first} and {second} are the same pace"),
    }
}
