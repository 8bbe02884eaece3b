// crates/todo_lint/src/cli.rs

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use lint_config::CliOptions;
use std::path::PathBuf;

pub fn build_cli() -> Command {
    Command::new("todo_lint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds TODO comments that are overdue or missing a due date")
        .override_usage("todo_lint [options] [files]")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("CONFIG_FILE")
                .num_args(1)
                .value_parser(value_parser!(PathBuf))
                .help("Specify which config file you want to use"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .value_name("EXT1,...")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .help("List of extensions to include"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("FILE1,...")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .help("List of files or globs to exclude"),
        )
        .arg(
            Arg::new("report")
                .short('r')
                .long("report")
                .action(ArgAction::SetTrue)
                .help("List every todo, most urgent first, instead of linting"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
        .arg(
            Arg::new("files")
                .num_args(0..)
                .value_parser(value_parser!(PathBuf))
                .help("Check only these files"),
        )
}

pub fn options_from(matches: &ArgMatches) -> CliOptions {
    let strings = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .unwrap_or_default()
            .map(|s| s.to_string())
            .collect()
    };

    let extensions = strings("include");
    CliOptions {
        config_file: matches.get_one::<PathBuf>("config").cloned(),
        extensions: (!extensions.is_empty()).then_some(extensions),
        excluded_files: strings("exclude"),
        report: matches.get_flag("report"),
        verbose: matches.get_flag("verbose"),
        files: matches
            .get_many::<PathBuf>("files")
            .unwrap_or_default()
            .cloned()
            .collect(),
    }
}
