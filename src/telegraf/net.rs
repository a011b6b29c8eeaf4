use std::collections::BTreeMap;
use serde::Serialize;
use crate::common::{Labels, LabelsMap};
use super::config::{tag_include, Config};

#[derive(Clone, Debug, Default)]
pub struct NetResponseOptions {
    pub interval:     String,
    pub timeout:      String,
    pub read_timeout: String,
    pub send:         String,
    pub expect:       String,
    pub tags:         Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct NetResponse {
    pub interval:     String,
    pub protocol:     String,
    pub address:      String,
    pub timeout:      String,
    pub read_timeout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub send:         String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expect:       String,
    #[serde(rename = "taginclude")]
    pub include:      Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags:         Labels,
}

impl Config {
    pub fn add_net_response(&mut self, opts: &NetResponseOptions, addresses: &LabelsMap, protocol: &str) -> usize {
        for (address, labels) in addresses {
            self.add(NetResponse {
                interval:     opts.interval.clone(),
                protocol:     protocol.to_owned(),
                address:      address.clone(),
                timeout:      opts.timeout.clone(),
                read_timeout: opts.read_timeout.clone(),
                send:         opts.send.clone(),
                expect:       opts.expect.clone(),
                include:      tag_include(&opts.tags, labels),
                tags:         labels.clone(),
            });
        }

        addresses.len()
    }
}
