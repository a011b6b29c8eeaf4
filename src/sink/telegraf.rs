use std::collections::BTreeMap;
use std::path::Path;
use log::{debug, error, warn};
use serde_json::{Map, Value};
use crate::common::{remove_empty, render_or_raw, Object, Observability, Render};
use crate::telegraf::{persist, Config, Error, Persist};
use crate::telegraf::{DnsQueryOptions, HttpResponseOptions, NetResponseOptions};
use crate::telegraf::{PrometheusHttpOptions, X509CertOptions};
use super::{Connection, Discovered, Sink};

// Path template is rendered per service, e.g.
// /etc/telegraf/{{namespace}}-discovery-{{service}}.conf
#[derive(Clone, Debug, Default)]
pub struct SignalOptions {
    pub input:    PrometheusHttpOptions,
    pub template: String,
    pub tags:     String,
}

#[derive(Clone, Debug, Default)]
pub struct CertOptions {
    pub input:    X509CertOptions,
    pub template: String,
    pub conf:     String,
}

#[derive(Clone, Debug, Default)]
pub struct DnsOptions {
    pub input:    DnsQueryOptions,
    pub template: String,
    pub conf:     String,
}

#[derive(Clone, Debug, Default)]
pub struct HttpOptions {
    pub input:    HttpResponseOptions,
    pub template: String,
    pub conf:     String,
}

#[derive(Clone, Debug, Default)]
pub struct TcpOptions {
    pub input:    NetResponseOptions,
    pub template: String,
    pub conf:     String,
}

#[derive(Clone, Debug, Default)]
pub struct TelegrafOptions {
    pub pass:     Vec<String>,
    pub signal:   SignalOptions,
    pub cert:     CertOptions,
    pub dns:      DnsOptions,
    pub http:     HttpOptions,
    pub tcp:      TcpOptions,
    pub checksum: bool,
}

pub struct Telegraf {
    options: TelegrafOptions,
    render:  Box<dyn Render + Send + Sync>,
    obs:     Observability,
}

impl Telegraf {
    pub fn new<R>(mut options: TelegrafOptions, render: R, obs: Observability) -> Self
    where
        R: Render + Send + Sync + 'static,
    {
        options.pass = remove_empty(options.pass);
        Self {
            options: options,
            render:  Box::new(render),
            obs:     obs,
        }
    }

    fn signal(&self, source: &str, services: &BTreeMap<String, Object>, conn: &Connection) {
        let mut input = self.options.signal.input.clone();
        fallback(&mut input.url,      &conn.url);
        fallback(&mut input.user,     &conn.user);
        fallback(&mut input.password, &conn.password);

        for (k, service) in services {
            let path = self.path(service);
            if path.is_empty() {
                warn!("{}: Signal service {} has no path, skipped", source, k);
                continue;
            }

            debug!("{}: Processing service: {} for path: {}", source, k, path);
            debug!("{}: Found metrics: {:?}", source, service.metrics);

            let mut config = Config::new();
            let tags = &self.options.signal.tags;
            if let Err(e) = config.add_prometheus_http(&path, service, tags, &input, &*self.render) {
                error!("{}: Signal service {} error: {}", source, k, e);
                self.obs.failed();
                continue;
            }

            if let Err(e) = self.save(source, &path, "", &config) {
                error!("{}: Signal service {} error: {}", source, k, e);
            }
        }
    }

    fn shared<F>(&self, source: &str, conf: &str, template: &str, build: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Config) -> usize,
    {
        if conf.is_empty() {
            warn!("{}: No conf path configured, skipped", source);
            return Ok(());
        }

        let mut config = Config::new();
        let count = build(&mut config);
        debug!("{}: Built {} inputs for {}", source, count, conf);

        self.save(source, conf, template, &config)
    }

    fn save(&self, source: &str, conf: &str, template: &str, config: &Config) -> Result<(), Error> {
        let result = config.render().and_then(|bytes| {
            persist(Path::new(conf), &bytes, template, self.options.checksum)
        });

        match result {
            Ok(Persist::Empty)     => {
                debug!("{}: No query config", source);
                self.obs.empty();
            },
            Ok(Persist::Unchanged) => {
                debug!("{}: File {} exists, skipped", source, conf);
                self.obs.unchanged();
            },
            Ok(Persist::Written)   => {
                debug!("{}: File {} created or replaced", source, conf);
                self.obs.written();
            },
            Err(e)                 => {
                self.obs.failed();
                return Err(e);
            },
        }

        Ok(())
    }

    fn path(&self, service: &Object) -> String {
        let ctx = service.vars.iter().map(|(k, v)| {
            (k.clone(), Value::String(v.clone()))
        }).collect::<Map<_, _>>();
        render_or_raw(&*self.render, &self.options.signal.template, &Value::Object(ctx))
    }
}

impl Sink for Telegraf {
    fn name(&self) -> &str {
        "Telegraf"
    }

    fn pass(&self) -> &[String] {
        &self.options.pass
    }

    fn process(&self, source: &str, discovered: Discovered) {
        let name = discovered.name().to_owned();
        debug!("Telegraf has to process {} objects from {}...", discovered.len(), name);

        let opts   = &self.options;
        let result = match discovered {
            Discovered::Signal(services, conn) => {
                self.signal(source, &services, &conn);
                Ok(())
            },
            Discovered::Cert(m) => self.shared(source, &opts.cert.conf, &opts.cert.template, |c| {
                c.add_x509_cert(&opts.cert.input, &m)
            }),
            Discovered::Dns(m)  => self.shared(source, &opts.dns.conf, &opts.dns.template, |c| {
                c.add_dns_query(&opts.dns.input, &m)
            }),
            Discovered::Http(m) => self.shared(source, &opts.http.conf, &opts.http.template, |c| {
                c.add_http_response(&opts.http.input, &m)
            }),
            Discovered::Tcp(m)  => self.shared(source, &opts.tcp.conf, &opts.tcp.template, |c| {
                c.add_net_response(&opts.tcp.input, &m, "tcp")
            }),
            Discovered::Unknown(_) => {
                debug!("Telegraf has no support for {}", name);
                return;
            },
        };

        if let Err(e) = result {
            error!("{}: {} query error: {}", source, name, e);
        }
    }
}

fn fallback(value: &mut String, def: &str) {
    if value.is_empty() {
        *value = def.to_owned();
    }
}
