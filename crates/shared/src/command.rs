use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of contract commands a page can dispatch. The route is the
/// `Service/Method` pair the contract client encodes the call against.
pub trait ContractCommand:
    fmt::Debug + Clone + Copy + PartialEq + Eq + Send + Sync + 'static
{
    /// Route of the read query backing this command set's page.
    const QUERY_ROUTE: &'static str;
    /// Human-readable page title.
    const PAGE_TITLE: &'static str;

    fn route(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PingCommand {
    Ping,
    Pong,
}

impl ContractCommand for PingCommand {
    const QUERY_ROUTE: &'static str = "Query/LastWhoCall";
    const PAGE_TITLE: &'static str = "Ping-Pong";

    fn route(&self) -> &'static str {
        match self {
            PingCommand::Ping => "Ping/Ping",
            PingCommand::Pong => "Ping/Pong",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PingCommand::Ping => "Ping",
            PingCommand::Pong => "Pong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficCommand {
    Green,
    Yellow,
    Red,
}

impl ContractCommand for TrafficCommand {
    const QUERY_ROUTE: &'static str = "TrafficLight/CurrentLight";
    const PAGE_TITLE: &'static str = "Traffic Light";

    fn route(&self) -> &'static str {
        match self {
            TrafficCommand::Green => "TrafficLight/Green",
            TrafficCommand::Yellow => "TrafficLight/Yellow",
            TrafficCommand::Red => "TrafficLight/Red",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TrafficCommand::Green => "Green",
            TrafficCommand::Yellow => "Yellow",
            TrafficCommand::Red => "Red",
        }
    }
}
