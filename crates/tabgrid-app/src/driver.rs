// ABOUTME: Line-oriented command loop between a UI script and the engine.
// ABOUTME: Applies one JSON command per line and reports the resulting state.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tabgrid_layout::{Command, ContainerState, ContainerStateMachine, Placement};

/// What gets written after each command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// The full container state
    #[default]
    Snapshot,
    /// Pixel rectangles per window, as a renderer would consume them
    Placements,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub rejected: usize,
    pub malformed: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    op: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(flatten)]
    body: Body<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Body<'a> {
    Snapshot { state: &'a ContainerState },
    Placements { placements: Vec<Placement> },
}

pub fn run<R: BufRead, W: Write>(
    machine: &mut ContainerStateMachine,
    input: R,
    mut output: W,
    mode: OutputMode,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read command line")?;
        let line = line.trim();
        // Blank lines and # comments are allowed in scripts
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command: Command = match serde_json::from_str(line) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(line = index + 1, "Skipping malformed command: {}", e);
                summary.malformed += 1;
                continue;
            }
        };

        let op = command.name();
        let error = match machine.dispatch(command) {
            Ok(()) => {
                summary.applied += 1;
                None
            }
            Err(e) => {
                summary.rejected += 1;
                Some(e.to_string())
            }
        };

        let state = machine.state();
        let body = match mode {
            OutputMode::Snapshot => Body::Snapshot { state },
            OutputMode::Placements => Body::Placements {
                placements: state.placements(),
            },
        };
        serde_json::to_writer(&mut output, &Report { op, error, body })
            .context("Failed to write report")?;
        writeln!(output)?;
    }

    output.flush()?;
    Ok(summary)
}
