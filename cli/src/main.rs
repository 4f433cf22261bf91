mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, info};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg = commands.config();

    match commands.command {
        Commands::Info => {
            print::header("local network");
            info::info()
        }
        Commands::Discover { target } => {
            print::header("getting ready for discovery");
            discover::discover(target, &cfg).await
        }
    }
}
