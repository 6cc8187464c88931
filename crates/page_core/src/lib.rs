//! Page controller: resolves the active account and its signer, dispatches
//! contract commands, relays transaction lifecycle events to the
//! notification sink, and publishes view-state changes to subscribers.

use std::{
    marker::PhantomData,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use contract::{CommandCall, ContractClient};
use futures::StreamExt;
use serde_json::Value;
use shared::{
    command::ContractCommand,
    domain::BlockHash,
    event::TxEvent,
    notify::{Notification, Severity},
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};
use wallet::{AccountSession, SignerError};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything a page failure can be; each is recovered locally with a
/// notification and a diagnostic log, never surfaced to callers.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("contract client is not started")]
    ClientNotStarted,
    #[error("account is not ready")]
    AccountNotReady,
    #[error("another command is already in flight")]
    CommandInFlight,
    #[error("signing failed: {0}")]
    Signing(#[from] SignerError),
    #[error("command submission failed: {0}")]
    Submission(String),
    #[error("contract query failed: {0}")]
    Query(String),
}

/// View state owned by one page controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub last_result: Option<String>,
    pub last_tx_hash: Option<BlockHash>,
    pub is_loading: bool,
}

/// State-change announcements for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    LoadingChanged(bool),
    ResultUpdated(Option<String>),
    BlockRecorded(BlockHash),
}

/// Fire-and-forget toast surface. Delivery never reports back.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Routes notifications onto the diagnostic stream; the default sink for
/// headless presentations.
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info | Severity::Success => {
                info!(title = %notification.title, "{}", notification.body);
            }
            Severity::Error => {
                error!(title = %notification.title, "{}", notification.body);
            }
        }
    }
}

pub struct PageController<Cmd: ContractCommand> {
    contract: Arc<dyn ContractClient>,
    session: Arc<AccountSession>,
    notifier: Arc<dyn NotificationSink>,
    state: Mutex<ViewState>,
    in_flight: AtomicBool,
    events: broadcast::Sender<PageEvent>,
    _commands: PhantomData<Cmd>,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<Cmd: ContractCommand> PageController<Cmd> {
    pub fn new(
        contract: Arc<dyn ContractClient>,
        session: Arc<AccountSession>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            contract,
            session,
            notifier,
            state: Mutex::new(ViewState::default()),
            in_flight: AtomicBool::new(false),
            events,
            _commands: PhantomData,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    pub async fn view(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// Explicit mount point: issues the initial read query. Failures are
    /// logged and leave the view untouched; there is no retry.
    pub async fn attach(&self) {
        debug!(page = Cmd::PAGE_TITLE, "attaching page");
        self.refresh_state().await;
    }

    /// Re-reads the page's backing query. The loading flag is released on
    /// every path out of this function.
    pub async fn refresh_state(&self) {
        if !self.contract.is_ready() {
            warn!(
                page = Cmd::PAGE_TITLE,
                "cannot refresh state: contract client is not started"
            );
            return;
        }

        self.set_loading(true).await;

        match self.contract.query(Cmd::QUERY_ROUTE).await {
            Ok(value) => match second_field(&value) {
                Some(result) => {
                    self.state.lock().await.last_result = Some(result.clone());
                    let _ = self.events.send(PageEvent::ResultUpdated(Some(result)));
                }
                None => {
                    warn!(
                        route = Cmd::QUERY_ROUTE,
                        %value,
                        "query result is not the expected two-element shape"
                    );
                }
            },
            Err(err) => {
                let error = PageError::Query(err.to_string());
                warn!(route = Cmd::QUERY_ROUTE, %error, "state refresh failed");
            }
        }

        self.set_loading(false).await;
    }

    /// Dispatches one command: resolve the signer, submit, relay lifecycle
    /// events, then re-read the contract state. A single attempt per call;
    /// no cancellation, timeout, or retry.
    pub async fn send_command(&self, command: Cmd) {
        if !self.contract.is_ready() {
            self.report(&PageError::ClientNotStarted);
            return;
        }

        let Some(account) = self.session.active().await else {
            self.report(&PageError::AccountNotReady);
            return;
        };

        // One command in flight per page instance; a concurrent dispatch is
        // rejected rather than raced.
        if self.in_flight.swap(true, Ordering::AcqRel) {
            self.report(&PageError::CommandInFlight);
            return;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let signer = match self.session.signer_for(&account).await {
            Ok(signer) => signer,
            Err(err) => {
                self.report(&PageError::Signing(err));
                return;
            }
        };

        let call = CommandCall {
            address: account.address.clone(),
            signer,
        };
        info!(route = command.route(), address = %account.address, "dispatching command");

        match self.contract.command(command.route(), call).await {
            Ok(mut events) => {
                while let Some(event) = events.next().await {
                    self.on_tx_event(event).await;
                }
                self.refresh_state().await;
            }
            Err(err) => {
                self.report(&PageError::Submission(err.to_string()));
            }
        }
    }

    async fn on_tx_event(&self, event: TxEvent) {
        match event {
            TxEvent::Submitted => self.notifier.notify(Notification::info(
                "Transaction in progress",
                "Message is being sent...",
            )),
            TxEvent::InBlock { block_hash } => {
                self.notifier.notify(Notification::info(
                    "Transaction included",
                    format!("Message is included in block: {block_hash}"),
                ));
                self.state.lock().await.last_tx_hash = Some(block_hash.clone());
                let _ = self.events.send(PageEvent::BlockRecorded(block_hash));
            }
            TxEvent::Succeeded => self.notifier.notify(Notification::success(
                "Transaction successful",
                "Message sent successfully!",
            )),
            TxEvent::Failed { reason } => self.notifier.notify(Notification::error(
                "Transaction failed",
                format!("Error while sending message: {reason}"),
            )),
        }
    }

    async fn set_loading(&self, loading: bool) {
        self.state.lock().await.is_loading = loading;
        let _ = self.events.send(PageEvent::LoadingChanged(loading));
    }

    fn report(&self, error: &PageError) {
        match error {
            PageError::ClientNotStarted | PageError::AccountNotReady => {
                warn!(page = Cmd::PAGE_TITLE, %error, "command precondition unmet");
            }
            _ => {
                error!(page = Cmd::PAGE_TITLE, %error, "command failed");
            }
        }
        self.notifier.notify(failure_notification(error));
    }
}

fn failure_notification(error: &PageError) -> Notification {
    match error {
        PageError::ClientNotStarted => Notification::error(
            "Client not started",
            "Start the contract client before sending commands.",
        ),
        PageError::AccountNotReady => Notification::error(
            "Account not ready",
            "Select a wallet account before sending commands.",
        ),
        PageError::CommandInFlight => Notification::error(
            "Command in flight",
            "Wait for the current command to settle.",
        ),
        PageError::Signing(err) => Notification::error("Signing failed", err.to_string()),
        PageError::Submission(_) => {
            Notification::error("Error", "Error while sending command")
        }
        PageError::Query(err) => Notification::error("Query failed", err.clone()),
    }
}

/// A page query yields a two-element result; the second element is the
/// value of interest.
fn second_field(value: &Value) -> Option<String> {
    let fields = value.as_array()?;
    let field = fields.get(1)?;
    match field {
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
