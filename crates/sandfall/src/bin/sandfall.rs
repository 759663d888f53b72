//! Reads a board configuration from stdin, pours sand until the inlet is
//! blocked (or `STEPS` particles were placed) and prints the result.

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use sandfall::config::BoardConfig;
use sandfall::settler;

/// Pour sand onto a board read from stdin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Stop after this many particles even if the inlet is still open.
    #[arg(value_name = "STEPS", value_parser = clap::value_parser!(usize))]
    steps: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read configuration: {err}");
        return ExitCode::FAILURE;
    }

    let mut grid = match BoardConfig::parse(&input).and_then(|config| config.build()) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = settler::run(&mut grid, args.steps);
    println!("{grid}");
    println!();
    println!("Grains: {}", summary.placed);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn steps_is_optional() {
        assert_eq!(Args::try_parse_from(["sandfall"]).unwrap().steps, None);
        assert_eq!(Args::try_parse_from(["sandfall", "25"]).unwrap().steps, Some(25));
    }

    #[test]
    fn negative_or_non_numeric_steps_are_rejected() {
        assert!(Args::try_parse_from(["sandfall", "-5"]).is_err());
        assert!(Args::try_parse_from(["sandfall", "lots"]).is_err());
        assert!(Args::try_parse_from(["sandfall", "1", "2"]).is_err());
    }
}
