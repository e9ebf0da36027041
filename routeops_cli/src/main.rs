use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{matrix::MatrixArgs, schema::SchemaArgs, solve::SolveArgs};

mod matrix;
mod request;
mod schema;
mod solve;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solves a request and prints the response
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Prints the travel matrices of a request
    Matrix {
        #[command(flatten)]
        args: MatrixArgs,
    },
    /// Prints the JSON schema of a solve request
    Schema {
        #[command(flatten)]
        args: SchemaArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Solve { args } => solve::run(args).await?,
        Commands::Matrix { args } => matrix::run(args).await?,
        Commands::Schema { args } => schema::run(args)?,
    }

    Ok(())
}
