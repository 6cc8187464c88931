use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{
    domain::{ActorId, BlockHash},
    event::TxEvent,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{CommandCall, ContractClient, ContractConfig, TxEventStream};

const ZERO_ACTOR: &str = "0x0000000000000000000000000000000000000000000000000000000000000000";
const INITIAL_LIGHT: &str = "Red";

/// In-process stand-in for the remote programs: runs both the ping-pong and
/// the traffic-light services against local state, emitting the same
/// lifecycle event sequence a node-backed client would.
pub struct LoopbackContractClient {
    config: ContractConfig,
    state: Mutex<ProgramState>,
}

struct ProgramState {
    last_call: Option<(ActorId, String)>,
    calls: Vec<(ActorId, String)>,
    current_light: String,
    block_height: u64,
}

impl LoopbackContractClient {
    pub fn new(config: ContractConfig) -> Self {
        debug!(node = %config.node_url, program = %config.program_id, "loopback contract client ready");
        Self {
            config,
            state: Mutex::new(ProgramState {
                last_call: None,
                calls: Vec::new(),
                current_light: INITIAL_LIGHT.to_string(),
                block_height: 0,
            }),
        }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    fn apply(state: &mut ProgramState, route: &str, caller: &ActorId) -> Result<()> {
        let value = match route {
            "Ping/Ping" => "Ping",
            "Ping/Pong" => "Pong",
            "TrafficLight/Green" => "Green",
            "TrafficLight/Yellow" => "Yellow",
            "TrafficLight/Red" => "Red",
            other => return Err(anyhow!("unknown command route '{other}'")),
        };

        if let Some(light) = route.strip_prefix("TrafficLight/") {
            state.current_light = light.to_string();
        }
        state.last_call = Some((caller.clone(), value.to_string()));
        state.calls.push((caller.clone(), value.to_string()));
        Ok(())
    }
}

fn call_pair(call: &Option<(ActorId, String)>) -> Value {
    match call {
        Some((actor, value)) => json!([actor.as_str(), value]),
        None => json!([ZERO_ACTOR, ""]),
    }
}

#[async_trait]
impl ContractClient for LoopbackContractClient {
    async fn query(&self, route: &str) -> Result<Value> {
        let state = self.state.lock().await;
        match route {
            "Query/LastWhoCall" => Ok(call_pair(&state.last_call)),
            "Query/AllCalls" => Ok(Value::Array(
                state
                    .calls
                    .iter()
                    .map(|(actor, value)| json!([actor.as_str(), value]))
                    .collect(),
            )),
            "TrafficLight/CurrentLight" => {
                let actor = state
                    .last_call
                    .as_ref()
                    .map(|(actor, _)| actor.as_str())
                    .unwrap_or(ZERO_ACTOR);
                Ok(json!([actor, state.current_light]))
            }
            other => Err(anyhow!("unknown query route '{other}'")),
        }
    }

    async fn command(&self, route: &str, call: CommandCall) -> Result<TxEventStream> {
        // The signer runs before any state change, so authorization
        // failures surface as a rejected submission.
        call.signer
            .sign(&call.address, route.as_bytes())
            .await
            .map_err(|err| anyhow!("signing failed for '{route}': {err}"))?;

        let mut state = self.state.lock().await;
        Self::apply(&mut state, route, &call.address)?;
        state.block_height += 1;

        let block_hash = BlockHash(format!("0x{:064x}", state.block_height));
        debug!(%route, caller = %call.address, block = %block_hash, "loopback command applied");

        let events = vec![
            TxEvent::Submitted,
            TxEvent::InBlock { block_hash },
            TxEvent::Succeeded,
        ];
        Ok(Box::pin(tokio_stream::iter(events)))
    }
}
