use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::*;

mod combine;
mod credentials;
mod interactive;
mod probe;
mod profile_manager;
mod provision;

use combine::CombineSource;
use interactive::{handle_response, InteractiveApp};
use loja_tools::DEFAULT_SNAPSHOT_FILE;
use provision::ProvisionOptions;

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Tools for syncing a Loja Integrada catalog into Baserow")]
pub struct Arguments {
    /// Leave out the subcommand to use the interactive menu
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "probe", about = "Fetch one page of products, report its shape and save it as a snapshot")]
    Probe(ProbeParams),
    #[clap(name = "validate", about = "Check a saved snapshot for the fields the catalog sync needs")]
    Validate(ValidateParams),
    #[clap(name = "combine", about = "Merge product and price pages into catalog rows")]
    Combine(CombineParams),
    #[clap(name = "provision", about = "Find or create the product table in Baserow")]
    Provision(ProvisionParams),
}

#[derive(Debug, Args)]
pub struct LojaCredentials {
    /// The store's API key (chave_api). Falls back to LI_API_KEY, then the saved profile
    #[arg(short = 'k', long = "api-key")]
    api_key: Option<String>,
    /// The application id (aplicacao). Falls back to LI_APP_ID, then the saved profile
    #[arg(short = 'a', long = "app-id")]
    app_id: Option<String>,
    /// Save the credentials to the profile file once they are known
    #[arg(long = "save-profile")]
    save_profile: bool,
}

#[derive(Debug, Args)]
pub struct ProbeParams {
    #[command(flatten)]
    credentials: LojaCredentials,
    #[arg(short = 'l', long = "limit", default_value = "5")]
    limit: u32,
    #[arg(short = 'o', long = "offset", default_value = "0")]
    offset: u32,
    /// Where to save the raw response
    #[arg(short = 'f', long = "output", default_value = DEFAULT_SNAPSHOT_FILE)]
    output: PathBuf,
}

#[derive(Debug, Args)]
pub struct ValidateParams {
    /// The snapshot saved by `probe`
    #[arg(default_value = DEFAULT_SNAPSHOT_FILE)]
    file: PathBuf,
}

#[derive(Debug, Args)]
pub struct CombineParams {
    /// A saved product page (or list of pages)
    #[arg(short = 'p', long = "products", requires = "prices", conflicts_with_all = ["fetch", "self_test"])]
    products: Option<PathBuf>,
    /// A saved price page (or list of pages)
    #[arg(short = 'r', long = "prices", requires = "products", conflicts_with_all = ["fetch", "self_test"])]
    prices: Option<PathBuf>,
    /// Fetch one page of products and one of prices from the API instead of reading files
    #[arg(long = "fetch", conflicts_with = "self_test")]
    fetch: bool,
    /// Combine the built-in sample and check the result
    #[arg(long = "self-test")]
    self_test: bool,
    /// Page size when fetching
    #[arg(short = 'l', long = "limit", default_value = "20")]
    limit: u32,
    /// Write the combined records to this file as JSON
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
    #[command(flatten)]
    credentials: LojaCredentials,
}

#[derive(Debug, Args)]
pub struct ProvisionParams {
    /// Baserow URL, e.g. https://api.baserow.io. Falls back to BASEROW_URL, then the saved profile
    #[arg(short = 'u', long = "url")]
    url: Option<String>,
    /// Baserow API token. Falls back to BASEROW_TOKEN, then the saved profile
    #[arg(short = 't', long = "token")]
    token: Option<String>,
    /// Use this workspace instead of asking
    #[arg(short = 'w', long = "workspace")]
    workspace: Option<i64>,
    /// Use this database instead of asking
    #[arg(short = 'd', long = "database")]
    database: Option<i64>,
    /// Name of the table to create when there is no product table yet
    #[arg(short = 'n', long = "table-name", default_value = baserow_tools::PRODUCT_TABLE_NAME)]
    table_name: String,
    /// Save the URL and token to the profile file once they are known
    #[arg(long = "save-profile")]
    save_profile: bool,
}

fn loja_config(credentials: LojaCredentials) -> anyhow::Result<loja_tools::LojaIntegradaConfig> {
    let config = credentials::loja_config(credentials.api_key, credentials.app_id)?;
    if credentials.save_profile {
        credentials::save_loja_profile(&config)?;
    }
    Ok(config)
}

async fn run_probe(params: ProbeParams) {
    let res = match loja_config(params.credentials) {
        Ok(config) => probe::probe_products(config, params.limit, params.offset, &params.output).await,
        Err(e) => Err(e),
    };
    handle_response(res)
}

async fn run_combine(params: CombineParams) {
    let source = match (params.products, params.prices) {
        (Some(products), Some(prices)) => Ok(CombineSource::Files { products, prices }),
        _ if params.self_test => Ok(CombineSource::SelfTest),
        _ if params.fetch => {
            loja_config(params.credentials).map(|config| CombineSource::Live { config, limit: params.limit })
        },
        _ => Err(anyhow::anyhow!("Give --products and --prices, or use --fetch or --self-test")),
    };
    let res = match source {
        Ok(source) => combine::combine(source, params.output.as_deref()).await,
        Err(e) => Err(e),
    };
    handle_response(res)
}

async fn run_provision(params: ProvisionParams) {
    let config = match credentials::baserow_config(params.url, params.token) {
        Ok(config) => config,
        Err(e) => return handle_response::<String>(Err(e)),
    };
    if params.save_profile {
        if let Err(e) = credentials::save_baserow_profile(&config) {
            warn!("Could not save the Baserow profile. {e}");
        }
    }
    let options =
        ProvisionOptions { workspace: params.workspace, database: params.database, table_name: params.table_name };
    handle_response(provision::provision(config, options).await)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    match cli.command {
        Some(Command::Probe(params)) => run_probe(params).await,
        Some(Command::Validate(params)) => handle_response(probe::validate_snapshot(&params.file)),
        Some(Command::Combine(params)) => run_combine(params).await,
        Some(Command::Provision(params)) => run_provision(params).await,
        None => {
            let mut app = InteractiveApp::new();
            if let Err(e) = app.run().await {
                eprintln!("{e}");
            }
        },
    }
}
