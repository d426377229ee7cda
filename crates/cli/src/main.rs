use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pointcmp::compare::Strategy;
use pointcmp::input::{read_points_file, read_points_until_blank, InputError};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod report;

use report::{exit_status, version_info, Report, EXIT_INTERNAL_ERROR};

#[derive(Parser)]
#[command(name = "pointcmp")]
#[command(about = "Compare two sets of 2D points: equal, subset, or not equal")]
#[command(
    after_help = "Exit status: 0 equal, 1 A subset of B, 2 B subset of A, 3 not equal, 4 input error"
)]
struct Cmd {
    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print a JSON report instead of the relationship name
    #[arg(long, global = true)]
    json: bool,

    /// Comparison algorithm
    #[arg(long, value_enum, default_value = "sort-merge", global = true)]
    strategy: StrategyArg,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Compare two files of whitespace-separated `x y` pairs
    Files { a: PathBuf, b: PathBuf },
    /// Read set A, then set B, from stdin; each set ends with an empty line
    Stdin,
    /// Print version and code revision as JSON
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    SortMerge,
    TreeSet,
}

impl From<StrategyArg> for Strategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::SortMerge => Strategy::SortMerge,
            StrategyArg::TreeSet => Strategy::TreeSet,
        }
    }
}

fn main() -> ExitCode {
    let cmd = Cmd::parse();
    init_tracing(cmd.verbose);
    let strategy = Strategy::from(cmd.strategy);
    let outcome = match &cmd.action {
        Action::Files { a, b } => files(a, b, strategy),
        Action::Stdin => {
            let stdin = std::io::stdin();
            stdin_sets(&mut stdin.lock(), std::io::stderr(), strategy)
        }
        Action::Version => return version(),
    };
    ExitCode::from(finish(outcome, std::io::stdout().lock(), cmd.json))
}

/// Print the report and map the outcome to a process exit status.
fn finish<W: Write>(outcome: Result<Report>, out: W, as_json: bool) -> u8 {
    let status = outcome.and_then(|report| {
        report.write_to(out, as_json)?;
        Ok(exit_status(report.relationship))
    });
    match status {
        Ok(code) => code,
        Err(e) => {
            let kind = e.downcast_ref::<InputError>().map(InputError::kind);
            tracing::error!(kind = ?kind, "{e:#}");
            EXIT_INTERNAL_ERROR
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn files(a: &Path, b: &Path, strategy: Strategy) -> Result<Report> {
    tracing::info!(a = %a.display(), b = %b.display(), ?strategy, "files");
    let pa = read_points_file(a).with_context(|| format!("reading set A from {}", a.display()))?;
    let pb = read_points_file(b).with_context(|| format!("reading set B from {}", b.display()))?;
    Ok(Report::build(strategy.comparator().as_ref(), &pa, &pb))
}

fn stdin_sets<R: BufRead, W: Write>(
    input: &mut R,
    mut prompt: W,
    strategy: Strategy,
) -> Result<Report> {
    tracing::info!(?strategy, "stdin");
    writeln!(prompt, "Set A: one `x y` point per line, finish with an empty line")?;
    let (pa, used) = read_points_until_blank(input, 0).context("reading set A from stdin")?;
    writeln!(prompt, "Set B: one `x y` point per line, finish with an empty line")?;
    let (pb, _) = read_points_until_blank(input, used).context("reading set B from stdin")?;
    Ok(Report::build(strategy.comparator().as_ref(), &pa, &pb))
}

fn version() -> ExitCode {
    match serde_json::to_string_pretty(&version_info()) {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointcmp::compare::Relationship;
    use pointcmp::input::ErrorKind;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, body).unwrap();
        p
    }

    #[test]
    fn files_mode_scenarios() {
        let dir = tempdir().unwrap();
        let one = write(dir.path(), "1.txt", "0 0\n1 1\n");
        let two = write(dir.path(), "2.txt", "0 0\n1 1\n2 2\n");
        let three = write(dir.path(), "3.txt", "0 0\n5 5\n");
        let empty = write(dir.path(), "empty.txt", "");
        let trip = write(dir.path(), "trip.txt", "1 1\n1 1\n1 1\n");
        let single = write(dir.path(), "single.txt", "1 1\n");

        let cases = [
            (&one, &one, Relationship::Equal),
            (&one, &two, Relationship::ASubsetOfB),
            (&two, &one, Relationship::BSubsetOfA),
            (&one, &three, Relationship::NotEqual),
            (&three, &one, Relationship::NotEqual),
            (&empty, &single, Relationship::ASubsetOfB),
            (&trip, &single, Relationship::Equal),
        ];
        for strategy in [Strategy::SortMerge, Strategy::TreeSet] {
            for (a, b, expected) in &cases {
                let report = files(a, b, strategy).unwrap();
                assert_eq!(report.relationship, *expected, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn files_mode_errors_keep_kind() {
        let dir = tempdir().unwrap();
        let good = write(dir.path(), "good.txt", "0 0\n");
        let bad = write(dir.path(), "bad.txt", "0 0\n1 oops\n");
        let missing = dir.path().join("missing.txt");

        let err = files(&good, &bad, Strategy::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>().map(InputError::kind),
            Some(ErrorKind::ParseFailure)
        );
        assert!(format!("{err:#}").contains("set B"));

        let err = files(&missing, &good, Strategy::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>().map(InputError::kind),
            Some(ErrorKind::IoFailure)
        );
    }

    #[test]
    fn stdin_mode_reads_two_sets() {
        let mut input = Cursor::new("0 0\n1 1\n\n1 1\n\n");
        let mut prompt = Vec::new();
        let report = stdin_sets(&mut input, &mut prompt, Strategy::default()).unwrap();
        assert_eq!(report.relationship, Relationship::BSubsetOfA);
        assert_eq!(report.unique_a, 2);
        assert!(String::from_utf8(prompt).unwrap().contains("Set B"));
    }

    #[test]
    fn stdin_mode_unterminated_second_set() {
        let mut input = Cursor::new("0 0\n\n1 1\n");
        let err = stdin_sets(&mut input, std::io::sink(), Strategy::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>().map(InputError::kind),
            Some(ErrorKind::IoFailure)
        );
    }

    #[test]
    fn stdin_mode_bad_line_number_spans_sets() {
        let mut input = Cursor::new("0 0\n\n1 1\nnope 2\n\n");
        let err = stdin_sets(&mut input, std::io::sink(), Strategy::default()).unwrap_err();
        match err.downcast_ref::<InputError>() {
            Some(InputError::Parse { line, .. }) => assert_eq!(*line, 4),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn finish_maps_outcomes_to_exit_status() {
        let dir = tempdir().unwrap();
        let one = write(dir.path(), "1.txt", "0 0\n1 1\n");
        let two = write(dir.path(), "2.txt", "0 0\n1 1\n2 2\n");
        let bad = write(dir.path(), "bad.txt", "0 0\n1 oops\n");
        let missing = dir.path().join("missing.txt");

        let mut out = Vec::new();
        assert_eq!(finish(files(&one, &two, Strategy::default()), &mut out, false), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "ASubsetOfB\n");

        let mut out = Vec::new();
        assert_eq!(finish(files(&two, &one, Strategy::TreeSet), &mut out, true), 2);
        assert!(String::from_utf8(out).unwrap().contains("\"BSubsetOfA\""));

        let mut out = Vec::new();
        let code = finish(files(&one, &bad, Strategy::default()), &mut out, false);
        assert_eq!(code, EXIT_INTERNAL_ERROR);
        assert!(out.is_empty());

        let code = finish(files(&missing, &one, Strategy::default()), std::io::sink(), false);
        assert_eq!(code, EXIT_INTERNAL_ERROR);

        let mut input = Cursor::new("0 0\n\n1 1\n");
        let code = finish(
            stdin_sets(&mut input, std::io::sink(), Strategy::default()),
            std::io::sink(),
            false,
        );
        assert_eq!(code, EXIT_INTERNAL_ERROR);
    }

    #[test]
    fn cli_parses_flags() {
        let argv = [
            "pointcmp", "-vv", "--json", "--strategy", "tree-set", "files", "a", "b",
        ];
        let cmd = Cmd::try_parse_from(argv).unwrap();
        assert_eq!(cmd.verbose, 2);
        assert!(cmd.json);
        assert_eq!(Strategy::from(cmd.strategy), Strategy::TreeSet);
        assert!(matches!(cmd.action, Action::Files { .. }));

        let cmd = Cmd::try_parse_from(["pointcmp", "stdin"]).unwrap();
        assert_eq!(Strategy::from(cmd.strategy), Strategy::SortMerge);
    }
}
