use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! hex_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

hex_newtype!(ActorId);
hex_newtype!(BlockHash);
hex_newtype!(ProgramId);

/// Browser signing extensions the wallet bridge knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletSource {
    PolkadotJs,
    SubwalletJs,
    Talisman,
    Enkrypt,
}

impl WalletSource {
    pub const ALL: [WalletSource; 4] = [
        WalletSource::PolkadotJs,
        WalletSource::SubwalletJs,
        WalletSource::Talisman,
        WalletSource::Enkrypt,
    ];

    /// Stable identifier, as injected into `window.injectedWeb3`.
    pub fn id(self) -> &'static str {
        match self {
            WalletSource::PolkadotJs => "polkadot-js",
            WalletSource::SubwalletJs => "subwallet-js",
            WalletSource::Talisman => "talisman",
            WalletSource::Enkrypt => "enkrypt",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WalletSource::PolkadotJs => "Polkadot JS",
            WalletSource::SubwalletJs => "SubWallet",
            WalletSource::Talisman => "Talisman",
            WalletSource::Enkrypt => "Enkrypt",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.id() == id)
    }
}

impl fmt::Display for WalletSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: ActorId,
    pub source: WalletSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
