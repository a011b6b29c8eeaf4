use std::collections::BTreeMap;
use serde::Serialize;
use crate::common::{Labels, LabelsMap};
use super::config::{tag_include, Config};

#[derive(Clone, Debug, Default)]
pub struct X509CertOptions {
    pub interval:           String,
    pub timeout:            String,
    pub server_name:        String,
    pub exclude_root_certs: bool,
    pub tls_ca:             String,
    pub tls_cert:           String,
    pub tls_key:            String,
    pub tls_server_name:    String,
    pub use_proxy:          bool,
    pub proxy_url:          String,
    pub tags:               Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct X509Cert {
    pub interval:           String,
    pub sources:            Vec<String>,
    pub timeout:            String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub server_name:        String,
    pub exclude_root_certs: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tls_ca:             String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tls_cert:           String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tls_key:            String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tls_server_name:    String,
    pub use_proxy:          bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub proxy_url:          String,
    #[serde(rename = "taginclude")]
    pub include:            Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags:               Labels,
}

impl Config {
    pub fn add_x509_cert(&mut self, opts: &X509CertOptions, sources: &LabelsMap) -> usize {
        for (source, labels) in sources {
            self.add(X509Cert {
                interval:           opts.interval.clone(),
                sources:            vec![source.clone()],
                timeout:            opts.timeout.clone(),
                server_name:        opts.server_name.clone(),
                exclude_root_certs: opts.exclude_root_certs,
                tls_ca:             opts.tls_ca.clone(),
                tls_cert:           opts.tls_cert.clone(),
                tls_key:            opts.tls_key.clone(),
                tls_server_name:    opts.tls_server_name.clone(),
                use_proxy:          opts.use_proxy,
                proxy_url:          opts.proxy_url.clone(),
                include:            tag_include(&opts.tags, labels),
                tags:               labels.clone(),
            });
        }

        sources.len()
    }
}
