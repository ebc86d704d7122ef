//! Command-line interface for forge
//! Lists, inspects, renders and validates prompt templates.
//!
//! Usage:
//!   forge vars `<path>`                                  - Variables a template needs
//!   forge inspect `<path>`                               - Metadata, role, phase and sections
//!   forge render `<path>` [--set k=v]... [--context f]   - Fill placeholders and print the prompt
//!   forge validate `<path>` [--strict]                   - Check a prompt for compliance
//!   forge list `<dir>`                                   - One line per template in a directory
//!
//! Every command takes `--format text|json`. `--config <file>` layers a TOML
//! file over the built-in validation defaults (a `forge.toml` in the working
//! directory is picked up when present). Exit status is 1 on errors and 2
//! when `--strict` finds a non-compliant prompt.

mod commands;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

fn path_arg(help: &'static str) -> Arg {
    Arg::new("path").help(help).required(true).index(1)
}

fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .help("Exit with status 2 when the prompt is not compliant")
        .action(ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new("forge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for rendering and validating prompt templates")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the default validation settings")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress to stderr (-vv for trace output)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("vars")
                .about("Print the variables a template needs, in order of first use")
                .arg(path_arg("Path to the template")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show a template's metadata, role, phase, variables and sections")
                .arg(path_arg("Path to the template")),
        )
        .subcommand(
            Command::new("render")
                .about("Fill a template's placeholders and print the prompt")
                .arg(path_arg("Path to the template"))
                .arg(
                    Arg::new("set")
                        .long("set")
                        .short('s')
                        .value_name("NAME=VALUE")
                        .help("Value for one variable; repeatable, wins over --context")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .value_name("FILE")
                        .help("JSON object of variable values"),
                )
                .arg(
                    Arg::new("validate")
                        .long("validate")
                        .help("Print the compliance report to stderr after the prompt")
                        .action(ArgAction::SetTrue),
                )
                .arg(strict_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Check a prompt for required sections and leftover placeholders")
                .arg(path_arg("Path to the prompt"))
                .arg(strict_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List the markdown templates in a directory")
                .arg(path_arg("Directory to scan")),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let json = matches
        .get_one::<String>("format")
        .map(|f| f == "json")
        .unwrap_or(false);

    let Some((name, sub)) = matches.subcommand() else {
        return;
    };
    let path = path_of(sub);
    tracing::debug!(command = name, path, "running");

    match name {
        "vars" => commands::handle_vars_command(path, json),
        "inspect" => commands::handle_inspect_command(path, json),
        "render" => {
            let options = commands::RenderOptions {
                assignments: sub
                    .get_many::<String>("set")
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default(),
                context_file: sub.get_one::<String>("context").cloned(),
                validate: sub.get_flag("validate"),
                strict: sub.get_flag("strict"),
            };
            commands::handle_render_command(path, config_of(sub), &options, json)
        }
        "validate" => {
            commands::handle_validate_command(path, config_of(sub), sub.get_flag("strict"), json)
        }
        "list" => commands::handle_list_command(path, json),
        other => {
            eprintln!("Unknown command '{}'", other);
            std::process::exit(1);
        }
    }
}

fn path_of(sub: &ArgMatches) -> &str {
    sub.get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default()
}

fn config_of(sub: &ArgMatches) -> Option<&str> {
    sub.get_one::<String>("config").map(String::as_str)
}
