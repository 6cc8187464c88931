use std::{collections::HashMap, env, fs};

use anyhow::Result;
use clap::ValueEnum;
use contract::{ContractConfig, DEFAULT_PROGRAM_ID, PING_PONG_IDL, TRAFFIC_LIGHT_IDL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    PingPong,
    TrafficLight,
}

#[derive(Debug)]
pub struct Settings {
    pub node_url: String,
    pub backend_url: Option<String>,
    pub program_id: String,
    pub account: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node_url: "wss://testnet.vara.network".into(),
            backend_url: None,
            program_id: DEFAULT_PROGRAM_ID.into(),
            account: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("node_url") {
                settings.node_url = v.clone();
            }
            if let Some(v) = file_cfg.get("backend_url") {
                settings.backend_url = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("contract_address") {
                settings.program_id = v.clone();
            }
            if let Some(v) = file_cfg.get("account") {
                settings.account = Some(v.clone());
            }
        }
    }

    if let Ok(v) = env::var("NODE_ADDRESS") {
        settings.node_url = v;
    }
    if let Ok(v) = env::var("APP__NODE_ADDRESS") {
        settings.node_url = v;
    }

    if let Ok(v) = env::var("BACKEND_ADDRESS") {
        settings.backend_url = Some(v);
    }
    if let Ok(v) = env::var("APP__BACKEND_ADDRESS") {
        settings.backend_url = Some(v);
    }

    if let Ok(v) = env::var("CONTRACT_ADDRESS") {
        settings.program_id = v;
    }
    if let Ok(v) = env::var("APP__CONTRACT_ADDRESS") {
        settings.program_id = v;
    }

    if let Ok(v) = env::var("ACCOUNT_ADDRESS") {
        settings.account = Some(v);
    }
    if let Ok(v) = env::var("APP__ACCOUNT_ADDRESS") {
        settings.account = Some(v);
    }

    settings
}

pub fn contract_config(settings: &Settings, page: PageKind) -> Result<ContractConfig> {
    let idl = match page {
        PageKind::PingPong => PING_PONG_IDL,
        PageKind::TrafficLight => TRAFFIC_LIGHT_IDL,
    };

    ContractConfig::new(
        settings.program_id.clone(),
        idl,
        &settings.node_url,
        settings.backend_url.as_deref(),
    )
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
