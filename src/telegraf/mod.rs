pub use config::{Config, Input, Inputs};
pub use dns::{DnsQuery, DnsQueryOptions};
pub use error::Error;
pub use http::{HttpResponse, HttpResponseOptions};
pub use net::{NetResponse, NetResponseOptions};
pub use persist::{fingerprint, merge, persist, Persist};
pub use prometheus::{PrometheusHttp, PrometheusHttpFile, PrometheusHttpMetric, PrometheusHttpOptions};
pub use prometheus::QUALITY_QUERY;
pub use x509::{X509Cert, X509CertOptions};

mod config;
mod dns;
mod error;
mod http;
mod net;
mod persist;
mod prometheus;
mod x509;
