use std::collections::BTreeMap;
use serde::Serialize;
use crate::common::{split, Labels, LabelsMap};
use super::config::{tag_include, Config};

#[derive(Clone, Debug, Default)]
pub struct DnsQueryOptions {
    pub interval:    String,
    pub servers:     String,
    pub network:     String,
    pub record_type: String,
    pub port:        u16,
    pub timeout:     u32,
    pub tags:        Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DnsQuery {
    pub interval:    String,
    pub servers:     Vec<String>,
    pub network:     String,
    pub domains:     Vec<String>,
    pub record_type: String,
    pub port:        u16,
    pub timeout:     u32,
    #[serde(rename = "taginclude")]
    pub include:     Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags:        Labels,
}

impl Config {
    pub fn add_dns_query(&mut self, opts: &DnsQueryOptions, domains: &LabelsMap) -> usize {
        let servers = split(&opts.servers);

        for (domain, labels) in domains {
            self.add(DnsQuery {
                interval:    opts.interval.clone(),
                servers:     servers.clone(),
                network:     opts.network.clone(),
                domains:     vec![domain.clone()],
                record_type: opts.record_type.clone(),
                port:        opts.port,
                timeout:     opts.timeout,
                include:     tag_include(&opts.tags, labels),
                tags:        labels.clone(),
            });
        }

        domains.len()
    }
}
