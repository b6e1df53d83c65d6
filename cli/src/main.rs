mod commands;
mod terminal;

use commands::{CommandLine, Commands, crack, cracked, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.quiet);

    let cfg = commands.to_config();
    print::banner(cfg.quiet);

    match commands.command {
        Commands::Scan(_) => {
            print::header("scanning for targets", cfg.quiet);
            scan::scan(&cfg).await
        }
        Commands::Crack(_) => {
            print::header("cracking handshakes", cfg.quiet);
            crack::crack(&cfg).await
        }
        Commands::Cracked => {
            print::header("cracked networks", cfg.quiet);
            cracked::cracked(&cfg)
        }
    }
}
