use anyhow::Result;
use clap::Parser;
use gridlock::scenarios::{self, ScenarioKind};
use gridlock::{Gridlock, HoldStrategy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Gridlock - A Playground Of Deliberately Deadlocking Threads",
    arg_required_else_help = true
)]
struct Cli {
    /// Deadlock scenario to perform
    #[arg(value_enum)]
    scenario: ScenarioKind,

    /// Append every lock event as a JSON line to this file
    #[arg(long)]
    trace_log: Option<PathBuf>,

    /// Hold never-released locks by parking instead of busy-spinning
    #[arg(long)]
    parked_hold: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut gridlock = Gridlock::new();
    if let Some(path) = &cli.trace_log {
        gridlock = gridlock.with_trace_log(path);
    }
    if cli.parked_hold {
        gridlock = gridlock.hold_strategy(HoldStrategy::Park);
    }
    let opts = gridlock.start()?;

    // Most scenarios never come back from this call; kill the process to
    // end the demonstration.
    scenarios::run(cli.scenario, &opts);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn unknown_scenario_is_rejected_with_the_manual() {
        let err = Cli::try_parse_from(["gridlock", "bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let rendered = err.to_string();
        for token in ["mutex", "holdnwait", "nopreemption", "circularwait"] {
            assert!(rendered.contains(token), "manual should list {token}");
        }
    }

    #[test]
    fn no_arguments_shows_the_manual() {
        let err = Cli::try_parse_from(["gridlock"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );

        let rendered = err.to_string();
        for token in ["mutex", "holdnwait", "nopreemption", "circularwait"] {
            assert!(rendered.contains(token), "manual should list {token}");
        }
    }
}
