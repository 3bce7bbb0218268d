//! Table, JSON and CSV views of a [`RunCollection`].
//!
//! Views are projections of the collection; nothing here is kept between
//! renders.

use std::io::Write;

use anyhow::Context;
use clap::ValueEnum;
use runlog::{domain::Totals, Config, RunCollection, RunRecord};

use super::terminal::is_narrow;

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Sortable fields.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum SortField {
    /// Most recent first
    #[default]
    Date,
    /// Fastest first
    Pace,
}

/// Options shared by every command that shows runs.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct View {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Sort order (default: date, most recent first).
    #[arg(long, value_enum, default_value_t)]
    sort: SortField,

    /// Show only the most recent runs (see `recent_count` in the config).
    #[arg(long)]
    recent: bool,

    /// Suppress headers and totals for scripting.
    #[arg(long)]
    quiet: bool,
}

impl View {
    /// The recent-runs view, as a table.
    pub fn recent() -> Self {
        Self {
            recent: true,
            ..Self::default()
        }
    }

    /// Prints the runs to stdout.
    pub fn print(&self, runs: &RunCollection, config: &Config) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.write(&mut out, runs, config, is_narrow())
    }

    /// Writes the runs selected by this view to `out`.
    pub fn write<W: Write>(
        &self,
        out: &mut W,
        runs: &RunCollection,
        config: &Config,
        narrow: bool,
    ) -> anyhow::Result<()> {
        let selected = if self.recent {
            runs.most_recent(config.recent_count())
        } else {
            runs.all_sorted()
        };

        let mut rows: Vec<&RunRecord> = selected.iter().collect();
        if self.sort == SortField::Pace {
            rows.sort_by_key(|run| run.pace());
        }

        match self.output {
            OutputFormat::Table => {
                if rows.is_empty() {
                    writeln!(out, "No runs added yet.")?;
                    return Ok(());
                }
                write_table(out, &rows, config.distance_unit(), self.quiet, narrow)?;
                if !self.quiet {
                    write_totals(out, &rows, config)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &rows)
                    .context("failed to render json output")?;
                writeln!(out)?;
            }
            OutputFormat::Csv => write_csv(out, &rows, self.quiet)?,
        }
        Ok(())
    }
}

/// Formats a distance without trailing zeros (`5`, `3.1`, `13.11`).
pub fn format_distance(distance: f64) -> String {
    let formatted = format!("{distance:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn write_table<W: Write>(
    out: &mut W,
    rows: &[&RunRecord],
    unit: &str,
    quiet: bool,
    narrow: bool,
) -> std::io::Result<()> {
    let headers: Vec<String> = if narrow {
        vec!["Date".into(), format!("Dist ({unit})"), "Pace".into()]
    } else {
        vec![
            "Date".into(),
            format!("Distance ({unit})"),
            "Time".into(),
            format!("Pace (min/{unit})"),
        ]
    };

    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|run| {
            if narrow {
                vec![
                    run.date().to_string(),
                    format_distance(run.distance()),
                    run.pace().to_string(),
                ]
            } else {
                vec![
                    run.date().to_string(),
                    format_distance(run.distance()),
                    run.duration().to_string(),
                    run.pace().to_string(),
                ]
            }
        })
        .collect();

    if quiet {
        for row in data {
            writeln!(out, "{}", row.join("\t"))?;
        }
        return Ok(());
    }

    // Determine column widths for alignment.
    let widths = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            data.iter()
                .map(|row| row[idx].len())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect::<Vec<_>>();

    write_row(out, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_row(out, &rule, &widths)?;

    for row in &data {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

/// Writes the footer, summarising only the rows that were shown.
fn write_totals<W: Write>(out: &mut W, rows: &[&RunRecord], config: &Config) -> std::io::Result<()> {
    let totals = Totals::from_runs(rows.iter().copied(), config.pace_rounding());
    let unit = config.distance_unit();
    write!(
        out,
        "\n{} run(s), {} {unit} in {}",
        totals.runs,
        format_distance(totals.distance),
        totals.duration
    )?;
    if let Some(pace) = totals.average_pace {
        write!(out, ", average pace {pace} min/{unit}")?;
    }
    writeln!(out)
}

fn write_csv<W: Write>(out: &mut W, rows: &[&RunRecord], quiet: bool) -> std::io::Result<()> {
    if !quiet {
        writeln!(out, "distance,time,date,pace")?;
    }
    for run in rows {
        writeln!(
            out,
            "{},{},{},{}",
            format_distance(run.distance()),
            run.duration(),
            run.date(),
            run.pace()
        )?;
    }
    Ok(())
}
