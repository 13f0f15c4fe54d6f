#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::net::{IpAddr, Ipv4Addr};

#[cfg(feature = "std")]
use battleship_tracker::{
    init_logging, server, Board, ResolverMode, ServerConfig, ServerAuthoritative, ShotResolver,
    Shot, DEFAULT_PORT,
};
#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};

#[cfg(feature = "std")]
#[derive(Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    serve: ServeArgs,
}

#[cfg(feature = "std")]
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Server knows the ships and decides outcomes.
    Server,
    /// Callers assert hit/miss/sunk for each cell.
    Client,
}

#[cfg(feature = "std")]
impl From<Mode> for ResolverMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Server => ResolverMode::ServerAuthoritative,
            Mode::Client => ResolverMode::ClientAuthoritative,
        }
    }
}

#[cfg(feature = "std")]
#[derive(Args)]
struct ServeArgs {
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    bind: IpAddr,
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(long, value_enum, env = "BATTLESHIP_MODE", default_value_t = Mode::Server)]
    mode: Mode,
    #[arg(long, help = "Random ship layout from this seed instead of the standard one")]
    seed: Option<u64>,
}

#[cfg(feature = "std")]
#[derive(Subcommand)]
enum Commands {
    /// Print the ship layout the server would use.
    ShowLayout {
        #[arg(long, help = "Random ship layout from this seed instead of the standard one")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ShowLayout { seed }) => show_layout(seed),
        None => {
            let args = cli.serve;
            let config = ServerConfig {
                bind: args.bind,
                port: args.port,
                mode: args.mode.into(),
                layout_seed: args.seed,
            };
            if let Some(s) = config.layout_seed {
                log::info!("using layout seed {} (layout is reproducible)", s);
            }
            server::serve(config).await
        }
    }
}

/// Sink every ship on a scratch board and print it, so operators can see where
/// the ships are.
#[cfg(feature = "std")]
fn show_layout(seed: Option<u64>) -> anyhow::Result<()> {
    let config = ServerConfig {
        layout_seed: seed,
        ..ServerConfig::default()
    };
    let layout = config.layout()?;
    let resolver = ServerAuthoritative::new(layout);
    let mut board = Board::new();
    for ship in resolver.layout().ships() {
        for cell in ship.cells() {
            resolver.resolve(&mut board, &Shot::at(cell.row() as i64, cell.col() as i64))?;
        }
    }
    println!("{}", board);
    for (i, ship) in resolver.layout().ships().iter().enumerate() {
        let cells: Vec<String> = ship.cells().iter().map(|c| c.label()).collect();
        println!("ship {}: {}", i, cells.join(" "));
    }
    Ok(())
}
