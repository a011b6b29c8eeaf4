use std::fs;
use std::str::FromStr;
use anyhow::Result;
use clap::{ArgMatches, value_t};
use crate::common::remove_empty;
use crate::sink::{CertOptions, DnsOptions, HttpOptions, SignalOptions, TcpOptions, TelegrafOptions};
use crate::telegraf::{DnsQueryOptions, HttpResponseOptions, NetResponseOptions};
use crate::telegraf::{PrometheusHttpOptions, X509CertOptions};

pub fn opt<T: FromStr>(arg: Option<&str>) -> Result<Option<T>> {
    Ok(arg.map(|s| T::from_str(s).map_err(|_| {
        let msg  = format!("invalid argument value '{}'", s);
        let kind = clap::ErrorKind::InvalidValue;
        clap::Error::with_description(&msg, kind)
    })).transpose()?)
}

pub fn read(path: &str) -> Result<Vec<u8>> {
    Ok(fs::read(path).map_err(|e| {
        let msg  = format!("invalid argument '{}': {}", path, e);
        let kind = clap::ErrorKind::InvalidValue;
        clap::Error::with_description(&msg, kind)
    })?)
}

pub fn pair(arg: &str) -> Result<(String, String)> {
    let mut split = arg.splitn(2, '=');
    match (split.next(), split.next()) {
        (Some(k), Some(v)) if !k.is_empty() && !v.is_empty() => Ok((k.to_owned(), v.to_owned())),
        _ => {
            let msg  = format!("invalid argument value '{}', expected NAME=PATH", arg);
            let kind = clap::ErrorKind::InvalidValue;
            Err(clap::Error::with_description(&msg, kind).into())
        }
    }
}

pub fn options(args: &ArgMatches) -> Result<TelegrafOptions> {
    let signal = SignalOptions {
        input: PrometheusHttpOptions {
            interval:          value_t!(args, "signal-interval", String)?,
            url:               string(args, "signal-url"),
            user:              string(args, "signal-user"),
            password:          string(args, "signal-password"),
            version:           value_t!(args, "signal-version", String)?,
            params:            string(args, "signal-params"),
            timeout:           value_t!(args, "signal-timeout", String)?,
            duration:          string(args, "signal-duration"),
            prefix:            string(args, "signal-prefix"),
            quality_name:      value_t!(args, "signal-quality-name", String)?,
            quality_range:     value_t!(args, "signal-quality-range", String)?,
            quality_every:     value_t!(args, "signal-quality-every", String)?,
            quality_points:    value_t!(args, "signal-quality-points", u32)?,
            quality_query:     content(args, "signal-quality-query")?,
            availability_name: value_t!(args, "signal-availability-name", String)?,
            metric_name:       value_t!(args, "signal-metric-name", String)?,
            default_tags:      list(args, "signal-default-tags"),
            var_format:        value_t!(args, "signal-var-format", String)?,
        },
        template: string(args, "signal-template"),
        tags:     content(args, "signal-tags")?,
    };

    let cert = CertOptions {
        input: X509CertOptions {
            interval:           value_t!(args, "cert-interval", String)?,
            timeout:            value_t!(args, "cert-timeout", String)?,
            server_name:        string(args, "cert-server-name"),
            exclude_root_certs: args.is_present("cert-exclude-root-certs"),
            tls_ca:             string(args, "cert-tls-ca"),
            tls_cert:           string(args, "cert-tls-cert"),
            tls_key:            string(args, "cert-tls-key"),
            tls_server_name:    string(args, "cert-tls-server-name"),
            use_proxy:          args.is_present("cert-use-proxy"),
            proxy_url:          string(args, "cert-proxy-url"),
            tags:               list(args, "cert-tags"),
        },
        template: content(args, "cert-template")?,
        conf:     string(args, "cert-conf"),
    };

    let dns = DnsOptions {
        input: DnsQueryOptions {
            interval:    value_t!(args, "dns-interval", String)?,
            servers:     string(args, "dns-servers"),
            network:     value_t!(args, "dns-network", String)?,
            record_type: value_t!(args, "dns-record-type", String)?,
            port:        value_t!(args, "dns-port", u16)?,
            timeout:     value_t!(args, "dns-timeout", u32)?,
            tags:        list(args, "dns-tags"),
        },
        template: content(args, "dns-template")?,
        conf:     string(args, "dns-conf"),
    };

    let http = HttpOptions {
        input: HttpResponseOptions {
            interval:         value_t!(args, "http-interval", String)?,
            timeout:          value_t!(args, "http-timeout", String)?,
            method:           value_t!(args, "http-method", String)?,
            follow_redirects: args.is_present("http-follow-redirects"),
            string_match:     string(args, "http-string-match"),
            status_code:      opt(args.value_of("http-status-code"))?.unwrap_or(0),
            tags:             list(args, "http-tags"),
        },
        template: content(args, "http-template")?,
        conf:     string(args, "http-conf"),
    };

    let tcp = TcpOptions {
        input: NetResponseOptions {
            interval:     value_t!(args, "tcp-interval", String)?,
            timeout:      value_t!(args, "tcp-timeout", String)?,
            read_timeout: value_t!(args, "tcp-read-timeout", String)?,
            send:         string(args, "tcp-send"),
            expect:       string(args, "tcp-expect"),
            tags:         list(args, "tcp-tags"),
        },
        template: content(args, "tcp-template")?,
        conf:     string(args, "tcp-conf"),
    };

    Ok(TelegrafOptions {
        pass:     list(args, "pass"),
        signal:   signal,
        cert:     cert,
        dns:      dns,
        http:     http,
        tcp:      tcp,
        checksum: args.is_present("checksum"),
    })
}

fn string(args: &ArgMatches, name: &str) -> String {
    args.value_of(name).unwrap_or_default().to_owned()
}

fn list(args: &ArgMatches, name: &str) -> Vec<String> {
    let values: Vec<String> = args.values_of(name).map(|vs| {
        vs.flat_map(|v| v.split(',')).map(String::from).collect()
    }).unwrap_or_default();
    remove_empty(values)
}

fn content(args: &ArgMatches, name: &str) -> Result<String> {
    match args.value_of(name) {
        Some(path) => Ok(String::from_utf8(read(path)?)?),
        None       => Ok(String::new()),
    }
}
