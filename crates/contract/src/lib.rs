//! Contract client seam: the interface pages program against, plus an
//! in-process loopback implementation for demos and tests.

use std::{pin::Pin, sync::Arc};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::Stream;
use shared::{
    domain::{ActorId, ProgramId},
    event::TxEvent,
};
use url::Url;
use wallet::TransactionSigner;

mod loopback;
pub use loopback::LoopbackContractClient;

/// Program id the ping-pong contract is deployed under on the public
/// testnet; overridable through configuration.
pub const DEFAULT_PROGRAM_ID: &str =
    "0xf50eb102b716eee43f3292b4bb7e88d449514224dba10a42ad85315036403a47";

/// Interface description of the ping-pong program.
pub const PING_PONG_IDL: &str = r#"
type PingEnum = enum {
  Ping,
  Pong,
};

constructor {
  New : ();
};

service Ping {
  Ping : () -> PingEnum;
  Pong : () -> PingEnum;
};

service Query {
  query AllCalls : () -> vec struct { actor_id, PingEnum };
  query LastWhoCall : () -> struct { actor_id, PingEnum };
};
"#;

/// Interface description of the traffic-light program.
pub const TRAFFIC_LIGHT_IDL: &str = r#"
type LightEnum = enum {
  Green,
  Yellow,
  Red,
};

constructor {
  New : ();
};

service TrafficLight {
  Green : () -> LightEnum;
  Yellow : () -> LightEnum;
  Red : () -> LightEnum;
  query CurrentLight : () -> struct { actor_id, LightEnum };
};
"#;

/// Immutable per-process contract wiring, built once from settings and
/// shared by reference afterwards.
#[derive(Debug, Clone)]
pub struct ContractConfig {
    pub program_id: ProgramId,
    pub idl: String,
    pub node_url: Url,
    pub backend_url: Option<Url>,
}

impl ContractConfig {
    pub fn new(
        program_id: impl Into<String>,
        idl: impl Into<String>,
        node_url: &str,
        backend_url: Option<&str>,
    ) -> Result<Self> {
        let node_url = Url::parse(node_url)
            .with_context(|| format!("invalid node address '{node_url}'"))?;
        let backend_url = backend_url
            .map(|raw| {
                Url::parse(raw).with_context(|| format!("invalid backend address '{raw}'"))
            })
            .transpose()?;

        Ok(Self {
            program_id: ProgramId(program_id.into()),
            idl: idl.into(),
            node_url,
            backend_url,
        })
    }
}

/// Arguments accompanying a command dispatch: who is calling and the
/// capability that authorizes the call.
#[derive(Clone)]
pub struct CommandCall {
    pub address: ActorId,
    pub signer: Arc<dyn TransactionSigner>,
}

pub type TxEventStream = Pin<Box<dyn Stream<Item = TxEvent> + Send>>;

/// Encodes and submits calls against a remote program. `command` resolving
/// to `Ok` means the submission pipeline accepted the call; the returned
/// stream then yields the ordered lifecycle events. An `Err` models a
/// rejected submission (network, signing, or contract revert).
#[async_trait]
pub trait ContractClient: Send + Sync {
    fn is_ready(&self) -> bool {
        true
    }

    async fn query(&self, route: &str) -> Result<serde_json::Value>;

    async fn command(&self, route: &str, call: CommandCall) -> Result<TxEventStream>;
}

pub struct MissingContractClient;

#[async_trait]
impl ContractClient for MissingContractClient {
    fn is_ready(&self) -> bool {
        false
    }

    async fn query(&self, route: &str) -> Result<serde_json::Value> {
        Err(anyhow!("contract client is not started (query '{route}')"))
    }

    async fn command(&self, route: &str, _call: CommandCall) -> Result<TxEventStream> {
        Err(anyhow!("contract client is not started (command '{route}')"))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
