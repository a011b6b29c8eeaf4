use std::collections::BTreeMap;
use serde::Serialize;
use crate::common::{Labels, LabelsMap};
use super::config::{tag_include, Config};

#[derive(Clone, Debug, Default)]
pub struct HttpResponseOptions {
    pub interval:         String,
    pub timeout:          String,
    pub method:           String,
    pub follow_redirects: bool,
    pub string_match:     String,
    pub status_code:      u16,
    pub tags:             Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct HttpResponse {
    pub interval:              String,
    pub urls:                  Vec<String>,
    pub response_timeout:      String,
    pub method:                String,
    pub follow_redirects:      bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub response_string_match: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub response_status_code:  u16,
    pub insecure_skip_verify:  bool,
    #[serde(rename = "taginclude")]
    pub include:               Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags:                  Labels,
}

impl Config {
    pub fn add_http_response(&mut self, opts: &HttpResponseOptions, urls: &LabelsMap) -> usize {
        for (url, labels) in urls {
            self.add(HttpResponse {
                interval:              opts.interval.clone(),
                urls:                  vec![url.clone()],
                response_timeout:      opts.timeout.clone(),
                method:                opts.method.clone(),
                follow_redirects:      opts.follow_redirects,
                response_string_match: opts.string_match.clone(),
                response_status_code:  opts.status_code,
                insecure_skip_verify:  true,
                include:               tag_include(&opts.tags, labels),
                tags:                  labels.clone(),
            });
        }

        urls.len()
    }
}

fn is_zero(n: &u16) -> bool {
    *n == 0
}
