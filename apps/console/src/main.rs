use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use contract::{ContractClient, LoopbackContractClient};
use page_core::{NotificationSink, PageController, PageEvent, TracingNotificationSink};
use shared::command::{ContractCommand, PingCommand, TrafficCommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use wallet::{AccountSession, DevWalletProvider};

mod config;

use config::{contract_config, load_settings, PageKind};

#[derive(Parser, Debug)]
#[command(about = "Drives a contract page from the terminal")]
struct Args {
    /// Page to drive.
    #[arg(long, value_enum, default_value_t = PageKind::PingPong)]
    page: PageKind,
    /// Wallet account address to act as; falls back to the configured one,
    /// then to the first listed account.
    #[arg(long)]
    account: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let settings = load_settings();
    let config = contract_config(&settings, args.page)?;

    let session = Arc::new(AccountSession::new(Arc::new(
        DevWalletProvider::with_dev_accounts(),
    )));
    let remembered = args.account.as_deref().or(settings.account.as_deref());
    match session.restore(remembered).await? {
        Some(account) => info!(address = %account.address, "acting as wallet account"),
        None => warn!("no wallet accounts available; commands will be rejected"),
    }

    let contract: Arc<dyn ContractClient> = Arc::new(LoopbackContractClient::new(config));
    let notifier: Arc<dyn NotificationSink> = Arc::new(TracingNotificationSink);

    match args.page {
        PageKind::PingPong => run_page::<PingCommand>(contract, session, notifier, parse_ping).await,
        PageKind::TrafficLight => {
            run_page::<TrafficCommand>(contract, session, notifier, parse_traffic).await
        }
    }
}

fn parse_ping(input: &str) -> Option<PingCommand> {
    match input {
        "ping" => Some(PingCommand::Ping),
        "pong" => Some(PingCommand::Pong),
        _ => None,
    }
}

fn parse_traffic(input: &str) -> Option<TrafficCommand> {
    match input {
        "green" => Some(TrafficCommand::Green),
        "yellow" => Some(TrafficCommand::Yellow),
        "red" => Some(TrafficCommand::Red),
        _ => None,
    }
}

async fn run_page<Cmd: ContractCommand>(
    contract: Arc<dyn ContractClient>,
    session: Arc<AccountSession>,
    notifier: Arc<dyn NotificationSink>,
    parse: fn(&str) -> Option<Cmd>,
) -> Result<()> {
    let controller = Arc::new(PageController::<Cmd>::new(contract, session, notifier));

    let mut events = controller.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                PageEvent::LoadingChanged(true) => info!("loading contract state..."),
                PageEvent::LoadingChanged(false) => {}
                PageEvent::ResultUpdated(result) => {
                    info!(
                        result = result.as_deref().unwrap_or("no data available"),
                        "contract state"
                    );
                }
                PageEvent::BlockRecorded(block_hash) => {
                    info!(%block_hash, "block hash recorded");
                }
            }
        }
    });

    controller.attach().await;

    println!(
        "{} page ready. Type a command, 'state', 'refresh', or 'quit'.",
        Cmd::PAGE_TITLE
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim().to_ascii_lowercase();
        match input.as_str() {
            "" => {}
            "quit" | "exit" => break,
            "state" => {
                let view = controller.view().await;
                println!(
                    "last result: {} | last block: {} | loading: {}",
                    view.last_result.as_deref().unwrap_or("-"),
                    view.last_tx_hash
                        .as_ref()
                        .map(|hash| hash.as_str())
                        .unwrap_or("-"),
                    view.is_loading
                );
            }
            "refresh" => controller.refresh_state().await,
            other => match parse(other) {
                Some(command) => controller.send_command(command).await,
                None => println!("unknown command '{other}'"),
            },
        }
    }

    Ok(())
}
