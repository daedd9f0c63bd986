use std::{env, process};

use money_tracker::{cli, init};

fn main() {
    init();

    if let Err(err) = cli::run_cli(env::args().skip(1)) {
        cli::output::error(&err);
        if matches!(err, cli::CliError::Usage(_)) {
            eprint!("{}", cli::commands::usage());
        }
        process::exit(1);
    }
}
