mod commands;
mod config;
mod exit_code;
mod interact;

use clap::parser::ValueSource;
use clap::{ArgGroup, ArgMatches, CommandFactory, FromArgMatches, Parser};
use colored::Colorize;
use commands::docs::DocsLookup;
use commands::list::Listing;
use commands::{Action, Session, Status};
use config::Config;
use exit_code::ExitCode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gql")]
#[command(about = "Query a GraphQL endpoint and browse its schema docs", long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("docs_lookup").multiple(false)))]
#[command(after_help = "Actions run in the order they are given, e.g. `gql --refresh-schema --types`.")]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Directory holding schema.json and queries/ [default: <config dir>/graphql]
    #[arg(long, env = "GQL_HOME", value_name = "DIR")]
    home: Option<PathBuf>,

    /// GraphQL endpoint; https:// is assumed when no scheme is given
    #[arg(long, env = "GQL_HOST", value_name = "HOST")]
    host: Option<String>,

    /// Bearer token sent in the Authorization header
    #[arg(long, env = "GQL_BEARER", value_name = "TOKEN", hide_env_values = true)]
    bearer: Option<String>,

    /// Print the schema, fetching it only if it is not cached
    #[arg(long, help_heading = "Actions")]
    schema: bool,

    /// Fetch the schema again, cache it and print it
    #[arg(long, help_heading = "Actions")]
    refresh_schema: bool,

    /// List type names
    #[arg(long, help_heading = "Actions")]
    types: bool,

    /// List mutation names
    #[arg(long, help_heading = "Actions")]
    mutations: bool,

    /// List query names
    #[arg(long, help_heading = "Actions")]
    queries: bool,

    /// Docs for a type, query or mutation (first match in that order)
    #[arg(long, value_name = "NAME", group = "docs_lookup", help_heading = "Actions")]
    docs: Option<String>,

    /// Docs for a type
    #[arg(long, value_name = "NAME", group = "docs_lookup", help_heading = "Actions")]
    type_docs: Option<String>,

    /// Docs for a query
    #[arg(long, value_name = "NAME", group = "docs_lookup", help_heading = "Actions")]
    query_docs: Option<String>,

    /// Docs for a mutation
    #[arg(long, value_name = "NAME", group = "docs_lookup", help_heading = "Actions")]
    mutation_docs: Option<String>,

    /// Send the query stored in <home>/queries/<FILE>
    #[arg(long, value_name = "FILE", help_heading = "Actions")]
    query: Option<String>,

    /// Variables for --query, as a JSON object
    #[arg(long, value_name = "JSON", requires = "query", value_parser = commands::request::parse_variables)]
    input: Option<serde_json::Value>,

    /// Send --query without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// Force colored output even when not a TTY
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    no_color: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = match Cli::command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => exit_on_parse_error(&e),
    };
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => exit_on_parse_error(&e),
    };

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    run(cli, &matches).await.exit();
}

async fn run(cli: Cli, matches: &ArgMatches) -> ExitCode {
    let actions = actions_from(&cli, matches);
    if actions.is_empty() {
        return usage_error("no action given");
    }

    let config = match Config::resolve(cli.home, cli.host, cli.bearer) {
        Ok(config) => config,
        Err(e) => return usage_error(&format!("{e:#}")),
    };
    tracing::debug!(
        home = %config.home().display(),
        endpoint = config.endpoint().url(),
        ?actions,
        "Resolved invocation"
    );

    let result = match Session::new(config, interact::detect(), cli.yes) {
        Ok(mut session) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            commands::run(&mut session, &actions, &mut out).await
        }
        Err(e) => Err(e),
    };

    exit_code_for(result)
}

/// Maps the outcome of a run to the process exit code, reporting errors on stderr.
///
/// A documentation miss has already printed its "not found" document but still
/// fails the run.
fn exit_code_for(result: anyhow::Result<Status>) -> ExitCode {
    match result {
        Ok(Status::Success) => ExitCode::Success,
        Ok(Status::NotFound) => ExitCode::Failure,
        Err(e) => {
            eprintln!("{} {} {e:#}", "gql:".bold(), "error:".red().bold());
            ExitCode::Failure
        }
    }
}

/// Builds the action list in the order the flags appeared on the command line.
fn actions_from(cli: &Cli, matches: &ArgMatches) -> Vec<Action> {
    let position = |id: &str| {
        (matches.value_source(id) == Some(ValueSource::CommandLine))
            .then(|| matches.index_of(id).unwrap_or(usize::MAX))
    };

    let mut actions: Vec<(usize, Action)> = Vec::new();
    let flags = [
        ("schema", Action::Schema),
        ("refresh_schema", Action::RefreshSchema),
        ("types", Action::List(Listing::Types)),
        ("mutations", Action::List(Listing::Mutations)),
        ("queries", Action::List(Listing::Queries)),
    ];
    for (id, action) in flags {
        if let Some(index) = position(id) {
            actions.push((index, action));
        }
    }

    let lookups = [
        ("docs", &cli.docs, DocsLookup::Any as fn(String) -> DocsLookup),
        ("type_docs", &cli.type_docs, DocsLookup::Type),
        ("query_docs", &cli.query_docs, DocsLookup::Query),
        ("mutation_docs", &cli.mutation_docs, DocsLookup::Mutation),
    ];
    for (id, value, lookup) in lookups {
        if let (Some(name), Some(index)) = (value, position(id)) {
            actions.push((index, Action::Docs(lookup(name.clone()))));
        }
    }

    if let (Some(file), Some(index)) = (&cli.query, position("query")) {
        let variables = cli
            .input
            .clone()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
        actions.push((
            index,
            Action::Request {
                file: file.clone(),
                variables,
            },
        ));
    }

    actions.sort_by_key(|(index, _)| *index);
    actions.into_iter().map(|(_, action)| action).collect()
}

/// Prints clap's message and exits: 0 for help/version, 1 for errors.
fn exit_on_parse_error(error: &clap::Error) -> ! {
    let code = if error.use_stderr() {
        ExitCode::Failure
    } else {
        ExitCode::Success
    };
    error.print().ok();
    code.exit()
}

fn usage_error(message: &str) -> ExitCode {
    eprintln!("{} {} {message}", "gql:".bold(), "error:".red().bold());
    eprintln!("\n{}", Cli::command().render_usage());
    eprintln!("For more information, try '--help'.");
    ExitCode::Failure
}

/// Initialize basic tracing on stderr, silent unless `RUST_LOG` is set.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    let env = |name: &str| std::env::var_os(name).map(|v| v.to_string_lossy().into_owned());
    if let Some(enabled) = color_override(force_color, no_color, env) {
        colored::control::set_override(enabled);
    }
}

fn color_override(
    force_color: bool,
    no_color: bool,
    env: impl Fn(&str) -> Option<String>,
) -> Option<bool> {
    if force_color {
        Some(true)
    } else if no_color || env("NO_COLOR").is_some() {
        Some(false)
    } else if let Some(val) = env("CLICOLOR_FORCE") {
        (!val.is_empty() && val != "0").then_some(true)
    } else if env("CLICOLOR").as_deref() == Some("0") {
        Some(false)
    } else {
        None
    }
}
