use clap::Parser;
use sweepscan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
