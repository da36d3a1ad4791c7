use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "PorkChop recipe API server", long_about = None)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 5001)]
    pub port: u16,

    /// Path to the primary recipe CSV
    #[arg(long, default_value = "recipes.csv")]
    pub csv: String,

    /// Mirror path tried when the primary CSV is unavailable
    #[arg(long, default_value = "assets/csv/recipes_rows.csv")]
    pub mirror: String,

    /// Remote catalog URL tried before the local files
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Re-run the tag classifier over a recipe CSV", long_about = None)]
pub struct BackfillArgs {
    /// Input recipe CSV
    #[arg(short, long)]
    pub input: String,

    /// Output CSV with detailed tag columns
    #[arg(short, long)]
    pub output: String,
}

pub fn parse_server_args() -> ServerArgs {
    ServerArgs::parse()
}

pub fn parse_backfill_args() -> BackfillArgs {
    BackfillArgs::parse()
}
