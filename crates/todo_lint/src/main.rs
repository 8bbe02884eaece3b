use anyhow::{Context, Result};
use std::env;
use std::io::{self, IsTerminal, Write};
use std::process;

use lint_config::LintConfig;
use todo_lint::cli;

fn main() {
    let code = match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(code);
}

fn try_main() -> Result<i32> {
    let matches = cli::build_cli().get_matches();
    let options = cli::options_from(&matches);

    init_logging(options.verbose);
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let config = LintConfig::assemble(options, &current_dir).context("Failed to load configuration")?;
    log::debug!("{:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = todo_lint::run(&config, &mut out);
    out.flush()?;
    Ok(result?.exit_code())
}

/// `--verbose` turns on debug output; `RUST_LOG` still wins when set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
