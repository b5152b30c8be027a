//! vartemplate CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "vartemplate")]
#[command(version)]
#[command(about = "Expand &-variable text templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template with variables from a context file and the command line
    Render {
        /// Template file (use '-' for stdin)
        template: String,

        /// JSON or YAML file with variable bindings
        #[arg(short = 'c', long)]
        context: Option<String>,

        /// Variable binding (KEY=VALUE), overrides the context file
        #[arg(short = 's', long = "set")]
        set: Vec<String>,

        /// Bind KEY to null so its references render as nothing
        #[arg(long)]
        null: Vec<String>,

        /// Character introducing a variable reference
        #[arg(long, default_value = "&")]
        varchar: String,

        /// Write output to FILE (use '--output -' for stdout)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Print the token stream of a template as JSON
    Tokens {
        /// Template file (use '-' for stdin)
        template: String,

        /// Character introducing a variable reference
        #[arg(long, default_value = "&")]
        varchar: String,

        /// Scan the text as-is, without dedenting multi-line templates
        #[arg(long)]
        raw: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries rendered output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vartemplate=warn,vartemplate_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            template,
            context,
            set,
            null,
            varchar,
            output,
        } => commands::render::execute(commands::render::RenderArgs {
            template,
            context,
            set,
            null,
            varchar,
            output,
        }),
        Commands::Tokens {
            template,
            varchar,
            raw,
        } => commands::tokens::execute(commands::tokens::TokensArgs {
            template,
            varchar,
            raw,
        }),
    }
}
