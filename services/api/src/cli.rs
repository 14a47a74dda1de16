use crate::demo::{run_hotels, run_quote, run_token, HotelsArgs, QuoteArgs, TokenArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hotelbook::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HotelBook",
    about = "Run the HotelBook API and inspect its catalog and pricing from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the bundled demo hotels through the catalog filters
    Hotels(HotelsArgs),
    /// Price a stay the same way bookings are priced
    Quote(QuoteArgs),
    /// Mint a development access token signed with AUTH_JWT_SECRET
    Token(TokenArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed demo hotels, ratings and bookings before accepting traffic
    #[arg(long)]
    pub(crate) seed: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Hotels(args) => run_hotels(args),
        Command::Quote(args) => run_quote(args),
        Command::Token(args) => run_token(args),
    }
}
