//! `callgraph` - extract Go declarations and call references into callgraph.json

use anyhow::{anyhow, bail, Context, Result};
use callgraph::logging::init_tracing;
use callgraph::{CallgraphConfig, CancellationToken, CliOverrides};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

enum Command {
    Run(CliOverrides),
    Help,
    Version,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<()> {
    let cli = match parse_args(args)? {
        Command::Run(cli) => cli,
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            println!("callgraph {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    init_tracing();

    let config = CallgraphConfig::load(&cli).context("invalid configuration")?;
    let report = callgraph::run(&config, CancellationToken::new())
        .with_context(|| format!("failed to write {}", config.output.display()))?;

    for failure in &report.failures {
        eprintln!("skipped {}: {}", failure.path, failure.error);
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Command> {
    let mut cli = CliOverrides::default();

    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-o" | "--output" => cli.output = Some(PathBuf::from(value_for(&arg, iter.next())?)),
            "--suffix" => cli.suffixes.push(value_for(&arg, iter.next())?),
            "--exclude" => cli.exclude.push(value_for(&arg, iter.next())?),
            "--threads" => {
                let value = value_for(&arg, iter.next())?;
                let threads = value
                    .parse()
                    .map_err(|_| anyhow!("invalid --threads value: {}", value))?;
                cli.threads = Some(threads);
            }
            "--with-content" => cli.with_content = true,
            "--replace" => cli.replace = true,
            "--include-unattached-comments" => cli.include_unattached_comments = true,
            "--reject-duplicates" => cli.reject_duplicates = true,
            flag if flag.starts_with('-') => bail!("unknown option: {}", flag),
            path => {
                if cli.root.is_some() {
                    bail!("unexpected extra argument: {}", path);
                }
                cli.root = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Command::Run(cli))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn print_help() {
    println!(
        "callgraph {}

Extract functions, globals, structs, calls and comments from Go sources.

USAGE:
    callgraph [ROOT] [OPTIONS]

ARGS:
    ROOT                            Directory to scan (default: .)

OPTIONS:
    -o, --output PATH               Output file (default: callgraph.json)
        --suffix EXT                Source suffix, repeatable (default: .go)
        --exclude GLOB              Exclude pattern, repeatable
        --with-content              Capture source text per declaration
        --replace                   Overwrite the output instead of appending
        --threads N                 Worker threads
        --include-unattached-comments
                                    Emit comments no declaration claimed
        --reject-duplicates         Fail files with two declarations on one line
    -h, --help                      Print help
    -V, --version                   Print version

ENVIRONMENT:
    CALLGRAPH_ROOT, CALLGRAPH_OUTPUT, CALLGRAPH_WITH_CONTENT,
    CALLGRAPH_WRITE_MODE, CALLGRAPH_THREADS, CALLGRAPH_LOG",
        env!("CARGO_PKG_VERSION")
    );
}
