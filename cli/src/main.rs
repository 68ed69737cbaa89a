mod commands;
mod server;
mod terminal;

use sweepr_core::CidrRegistry;

use commands::{CommandLine, Commands, registry, scan, serve};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);

    let cidrs = CidrRegistry::open(&commands.registry);

    match commands.command {
        Commands::Scan { cidr, tuning, json } => scan::scan(&cidr, tuning.to_config(), json).await,
        Commands::Serve { bind, tuning } => serve::serve(bind, cidrs, tuning.to_config()).await,
        Commands::Add { cidr } => registry::add(&cidrs, &cidr),
        Commands::Remove { cidr } => registry::remove(&cidrs, &cidr),
        Commands::List => registry::list(&cidrs),
    }
}
