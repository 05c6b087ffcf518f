use clap::{Parser, Subcommand};
use commands::{
    delete::{run_delete, DeleteArgs},
    get::{run_get, GetArgs},
    inspect::{run_inspect, InspectArgs},
    put::{run_put, PutArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Path to the data store
    #[arg(
        long,
        short,
        global = true,
        env = "SPATIA_STORE",
        default_value = "store"
    )]
    store: String,

    /// Log debug messages (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Inspect(InspectArgs),
    Put(PutArgs),
    Get(GetArgs),
    Delete(DeleteArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    match cli.command {
        Commands::Inspect(args) => run_inspect(args),
        Commands::Put(args) => run_put(&cli.store, args),
        Commands::Get(args) => run_get(&cli.store, args),
        Commands::Delete(args) => run_delete(&cli.store, args),
    }
}
