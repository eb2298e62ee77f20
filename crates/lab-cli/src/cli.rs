use clap::{Parser, Subcommand, ValueEnum};

/// Output mode for `lab query`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Top-level CLI parser for the `lab` binary.
#[derive(Debug, Parser)]
#[command(name = "lab", version, about = "Learning lab SQL sandbox")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve `POST /api/duckdb` over HTTP
    Serve(ServeArgs),

    /// Run one statement against a fresh seeded database and print the result
    Query(QueryArgs),
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Debug, clap::Args)]
pub struct QueryArgs {
    /// SQL statement, executed verbatim
    pub sql: String,

    /// Output format: json, table, raw
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_overrides_parse() {
        let cli = Cli::try_parse_from(["lab", "serve", "--host", "0.0.0.0", "-p", "8080"])
            .expect("cli should parse");
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn query_takes_sql_and_format() {
        let cli = Cli::try_parse_from(["lab", "-v", "query", "SELECT 1", "--format", "table"])
            .expect("cli should parse");
        assert!(cli.verbose);
        let Commands::Query(args) = cli.command else {
            panic!("expected query");
        };
        assert_eq!(args.sql, "SELECT 1");
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["lab", "-q", "-v", "query", "SELECT 1"]).is_err());
    }
}
