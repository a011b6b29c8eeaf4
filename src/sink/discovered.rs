use std::collections::BTreeMap;
use serde::Deserialize;
use serde_json::Value;
use crate::common::{LabelsMap, Object};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Connection {
    pub url:      String,
    pub user:     String,
    pub password: String,
}

#[derive(Debug)]
pub enum Discovered {
    Signal(BTreeMap<String, Object>, Connection),
    Cert(LabelsMap),
    Dns(LabelsMap),
    Http(LabelsMap),
    Tcp(LabelsMap),
    Unknown(String),
}

impl Discovered {
    pub fn from_json(name: &str, value: Value) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Signal {
            #[serde(default)]
            services: BTreeMap<String, Object>,
            #[serde(default)]
            options:  Connection,
        }

        Ok(match name {
            "Signal" => {
                let Signal { services, options } = serde_json::from_value(value)?;
                Discovered::Signal(services, options)
            },
            "Cert"   => Discovered::Cert(serde_json::from_value(value)?),
            "DNS"    => Discovered::Dns(serde_json::from_value(value)?),
            "HTTP"   => Discovered::Http(serde_json::from_value(value)?),
            "TCP"    => Discovered::Tcp(serde_json::from_value(value)?),
            other    => Discovered::Unknown(other.to_owned()),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Discovered::Signal(..)    => "Signal",
            Discovered::Cert(_)       => "Cert",
            Discovered::Dns(_)        => "DNS",
            Discovered::Http(_)       => "HTTP",
            Discovered::Tcp(_)        => "TCP",
            Discovered::Unknown(name) => name,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Discovered::Signal(m, _) => m.len(),
            Discovered::Cert(m)      => m.len(),
            Discovered::Dns(m)       => m.len(),
            Discovered::Http(m)      => m.len(),
            Discovered::Tcp(m)       => m.len(),
            Discovered::Unknown(_)   => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
