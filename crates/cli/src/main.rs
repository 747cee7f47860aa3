//! Command-line driver for cheapchain.
//!
//! Finds the cheapest test network, switches a wallet to it, and sends a donation. The
//! wallet is reached over HTTP JSON-RPC at `--wallet-url` / `WALLET_URL`; without one,
//! wallet commands fail with a "no wallet" error before any request is made.

use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cheapchain_shared::chains::{chain_by_id, ChainDescriptor, CHAINS};
use cheapchain_shared::config::Settings;
use cheapchain_shared::donation::{donate, format_ether, parse_ether, DONATION_ADDRESS};
use cheapchain_shared::resolver::{GasQuote, Resolver};
use cheapchain_shared::rpc::RpcClient;
use cheapchain_shared::wallet::{switch_to_chain, HttpWallet, SwitchOutcome, Wallet};

/// Wallet calls wait on user confirmation, so they get far more time than node calls.
const WALLET_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Wallet JSON-RPC endpoint
    #[arg(long, env = "WALLET_URL", global = true)]
    wallet_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List supported chains
    Chains,
    /// Find the chain with the cheapest native transfer
    Cheapest,
    /// Show every chain's current quote
    Quotes,
    /// Switch the wallet to a chain, adding it first if needed
    Switch {
        #[arg(long)]
        chain_id: u64,
    },
    /// Send a donation, on the cheapest chain unless one is given
    Donate {
        /// Amount in whole native units, e.g. 0.01
        #[arg(long)]
        amount: String,
        #[arg(long)]
        chain_id: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env();
    let resolver = Resolver::new(std::sync::Arc::new(RpcClient::try_new(settings.rpc_timeout)?));
    let wallet = cli
        .wallet_url
        .map(|url| HttpWallet::try_new(url, WALLET_TIMEOUT))
        .transpose()?;
    let wallet = wallet.as_ref().map(|w| w as &dyn Wallet);

    match cli.command {
        Command::Chains => {
            for chain in CHAINS {
                println!(
                    "{:>10}  {:<10}  {:<20}  {}",
                    chain.chain_id, chain.chain_id_hex, chain.name, chain.native_symbol
                );
            }
        }
        Command::Cheapest => match resolver.cheapest_chain().await {
            Some(quote) => print_quote(&quote),
            None => bail!("no chain answered with a gas price, try again later"),
        },
        Command::Quotes => {
            for outcome in resolver.quote_all(CHAINS).await {
                match outcome.result {
                    Ok(quote) => print_quote(&quote),
                    Err(e) => println!("{:<20}  unavailable: {e}", outcome.chain.name),
                }
            }
        }
        Command::Switch { chain_id } => {
            let chain = lookup(chain_id)?;
            match switch_to_chain(wallet, chain).await? {
                SwitchOutcome::Switched => println!("switched to {}", chain.name),
                SwitchOutcome::Added => println!(
                    "added {} to the wallet; switch again if it is not active",
                    chain.name
                ),
            }
        }
        Command::Donate { amount, chain_id } => {
            let amount_wei = parse_ether(&amount)?;
            let chain = match chain_id {
                Some(id) => lookup(id)?,
                None => {
                    let quote = resolver
                        .cheapest_chain()
                        .await
                        .context("no chain answered with a gas price, try again later")?;
                    print_quote(&quote);
                    quote.chain
                }
            };

            let receipt = donate(wallet, chain, &amount_wei).await?;
            println!(
                "donated {} {} to {DONATION_ADDRESS} on {}",
                format_ether(&receipt.amount_wei),
                chain.native_symbol,
                chain.name
            );
            println!("tx: {}", receipt.tx_hash);
            if let Some(url) = receipt.explorer_url {
                println!("{url}");
            }
        }
    }

    Ok(())
}

fn lookup(chain_id: u64) -> anyhow::Result<&'static ChainDescriptor> {
    chain_by_id(chain_id).with_context(|| format!("chain {chain_id} is not supported"))
}

fn print_quote(quote: &GasQuote<'_>) {
    println!(
        "{:<20}  gas price {} wei  transfer cost {} {}",
        quote.chain.name,
        quote.gas_price,
        format_ether(&quote.estimated_cost),
        quote.chain.native_symbol
    );
}
