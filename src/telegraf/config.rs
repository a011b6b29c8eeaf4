use std::collections::BTreeSet;
use serde::Serialize;
use crate::common::Labels;
use super::Error;
use super::dns::DnsQuery;
use super::http::HttpResponse;
use super::net::NetResponse;
use super::prometheus::PrometheusHttp;
use super::x509::X509Cert;

#[derive(Debug, Default, Serialize)]
pub struct Config {
    pub inputs: Inputs,
}

#[derive(Debug, Default, Serialize)]
pub struct Inputs {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prometheus_http: Vec<PrometheusHttp>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns_query:       Vec<DnsQuery>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub http_response:   Vec<HttpResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub net_response:    Vec<NetResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub x509_cert:       Vec<X509Cert>,
}

#[derive(Debug)]
pub enum Input {
    PrometheusHttp(PrometheusHttp),
    DnsQuery(DnsQuery),
    HttpResponse(HttpResponse),
    NetResponse(NetResponse),
    X509Cert(X509Cert),
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<I: Into<Input>>(&mut self, input: I) {
        let inputs = &mut self.inputs;
        match input.into() {
            Input::PrometheusHttp(i) => inputs.prometheus_http.push(i),
            Input::DnsQuery(i)       => inputs.dns_query.push(i),
            Input::HttpResponse(i)   => inputs.http_response.push(i),
            Input::NetResponse(i)    => inputs.net_response.push(i),
            Input::X509Cert(i)       => inputs.x509_cert.push(i),
        }
    }

    pub fn len(&self) -> usize {
        let Inputs { prometheus_http, dns_query, http_response, net_response, x509_cert } = &self.inputs;
        prometheus_http.len() + dns_query.len() + http_response.len() + net_response.len() + x509_cert.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // An empty container renders to no bytes at all so the
    // persistence gate leaves the existing file alone.
    pub fn render(&self) -> Result<Vec<u8>, Error> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        Ok(toml::to_string(self)?.into_bytes())
    }
}

impl From<PrometheusHttp> for Input {
    fn from(i: PrometheusHttp) -> Self {
        Input::PrometheusHttp(i)
    }
}

impl From<DnsQuery> for Input {
    fn from(i: DnsQuery) -> Self {
        Input::DnsQuery(i)
    }
}

impl From<HttpResponse> for Input {
    fn from(i: HttpResponse) -> Self {
        Input::HttpResponse(i)
    }
}

impl From<NetResponse> for Input {
    fn from(i: NetResponse) -> Self {
        Input::NetResponse(i)
    }
}

impl From<X509Cert> for Input {
    fn from(i: X509Cert) -> Self {
        Input::X509Cert(i)
    }
}

pub(crate) fn include<'a, I>(defaults: &[String], keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let defaults = defaults.iter().map(|s| s.trim());
    let keys     = keys.into_iter().map(|s| s.trim());
    let set = defaults.chain(keys).filter(|s| !s.is_empty()).collect::<BTreeSet<_>>();
    set.into_iter().map(String::from).collect()
}

pub(crate) fn tag_include(defaults: &[String], tags: &Labels) -> Vec<String> {
    include(defaults, tags.keys())
}
