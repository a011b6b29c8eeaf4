use std::fs;
use std::path::Path;
use std::sync::{Mutex, Once};
use anyhow::Result;
use log::{Log, LevelFilter, Metadata, Record};
use serde_json::json;
use tempfile::{tempdir, TempDir};
use crate::common::{Observability, Stats, Templates};
use super::*;

struct Capture {
    lines: Mutex<Vec<String>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture { lines: Mutex::new(Vec::new()) };
static INIT: Once = Once::new();

fn logged(needle: &str) -> Vec<String> {
    CAPTURE.lines.lock().map(|lines| {
        lines.iter().filter(|line| line.contains(needle)).cloned().collect()
    }).unwrap_or_default()
}

fn capture() {
    INIT.call_once(|| {
        if log::set_logger(&CAPTURE).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

fn options(dir: &TempDir) -> TelegrafOptions {
    let conf = |name: &str| dir.path().join(name).to_string_lossy().into_owned();

    let mut opts = TelegrafOptions::default();
    opts.pass     = vec!["".into(), "Telegraf".into()];
    opts.checksum = true;

    opts.signal.template             = conf("{{namespace}}/{{service}}.conf");
    opts.signal.input.version        = "v1".into();
    opts.signal.input.interval       = "10s".into();
    opts.signal.input.timeout        = "5s".into();
    opts.signal.input.metric_name    = "metric".into();
    opts.signal.input.var_format     = "$%s".into();
    opts.signal.input.quality_points = 20;

    opts.dns.conf           = conf("dns.conf");
    opts.dns.template       = "[agent]\n  interval = \"10s\"".into();
    opts.dns.input.interval = "10s".into();
    opts.dns.input.servers  = "8.8.8.8".into();
    opts.dns.input.tags     = vec!["env".into()];

    opts.http.conf  = conf("http.conf");
    opts.cert.conf  = conf("cert.conf");
    opts.tcp.conf   = conf("tcp.conf");

    opts
}

fn parse(path: &Path) -> Result<toml::Value> {
    Ok(toml::from_str(&fs::read_to_string(path)?)?)
}

fn signal() -> Result<Discovered> {
    Ok(Discovered::from_json("Signal", json!({
        "options": { "url": "http://prometheus:9090", "user": "reader" },
        "services": {
            "api": {
                "vars":    { "namespace": "prod", "service": "api" },
                "metrics": ["http_requests_total"],
                "configs": { "base": { "metrics": [ { "query": "sum(up{service=\"$service\"})" } ] } }
            },
            "broken": {
                "vars": { "namespace": "prod", "service": "broken" }
            },
            "web": {
                "vars":    { "namespace": "dev", "service": "web" },
                "configs": { "base": { "metrics": [ { "query": "up" } ] } }
            }
        }
    }))?)
}

#[test]
fn discovered_routes_by_name() -> Result<()> {
    let dns = Discovered::from_json("DNS", json!({ "a.com": { "env": "dev" } }))?;
    assert_eq!(dns.name(), "DNS");
    assert_eq!(dns.len(), 1);

    let tcp = Discovered::from_json("TCP", json!({}))?;
    assert!(matches!(tcp, Discovered::Tcp(_)));
    assert!(tcp.is_empty());

    let other = Discovered::from_json("PubSub", json!({ "anything": 1 }))?;
    assert_eq!(other.name(), "PubSub");
    assert!(matches!(other, Discovered::Unknown(_)));

    assert!(Discovered::from_json("HTTP", json!([1, 2])).is_err());

    Ok(())
}

#[test]
fn pass_drops_empty_names() -> Result<()> {
    let dir  = tempdir()?;
    let sink = Telegraf::new(options(&dir), Templates::new(), Observability::new());
    assert_eq!(sink.name(), "Telegraf");
    assert_eq!(sink.pass(), &["Telegraf".to_string()]);
    Ok(())
}

#[test]
fn dns_writes_shared_file_once() -> Result<()> {
    let dir  = tempdir()?;
    let obs  = Observability::new();
    let opts = options(&dir);
    let conf = opts.dns.conf.clone();
    let sink = Telegraf::new(opts, Templates::new(), obs.clone());

    let result = || Discovered::from_json("DNS", json!({
        "b.com": { "env": "prod" },
        "a.com": { "env": "dev" }
    }));

    sink.process("prom", result()?);
    sink.process("prom", result()?);

    let content = fs::read_to_string(&conf)?;
    assert!(content.ends_with("\n[agent]\n  interval = \"10s\""));

    let doc = parse(Path::new(&conf))?;
    let dns = &doc["inputs"]["dns_query"];
    assert_eq!(dns[0]["domains"][0].as_str(), Some("a.com"));
    assert_eq!(dns[1]["domains"][0].as_str(), Some("b.com"));

    assert_eq!(obs.stats(), Stats { written: 1, unchanged: 1, empty: 0, failed: 0 });

    Ok(())
}

#[test]
fn dns_rewrites_on_label_change() -> Result<()> {
    let dir  = tempdir()?;
    let obs  = Observability::new();
    let sink = Telegraf::new(options(&dir), Templates::new(), obs.clone());

    sink.process("prom", Discovered::from_json("DNS", json!({ "a.com": { "env": "dev" } }))?);
    sink.process("prom", Discovered::from_json("DNS", json!({ "a.com": { "env": "prod" } }))?);

    assert_eq!(obs.stats().written, 2);

    Ok(())
}

#[test]
fn empty_results_do_not_touch_files() -> Result<()> {
    let dir  = tempdir()?;
    let obs  = Observability::new();
    let opts = options(&dir);
    let conf = opts.http.conf.clone();
    let sink = Telegraf::new(opts, Templates::new(), obs.clone());

    sink.process("prom", Discovered::from_json("HTTP", json!({}))?);

    assert!(!Path::new(&conf).exists());
    assert_eq!(obs.stats().empty, 1);

    Ok(())
}

#[test]
fn signal_fans_out_per_service() -> Result<()> {
    let dir  = tempdir()?;
    let obs  = Observability::new();
    let sink = Telegraf::new(options(&dir), Templates::new(), obs.clone());

    sink.process("prom", signal()?);

    let api = dir.path().join("prod/api.conf");
    let web = dir.path().join("dev/web.conf");
    assert!(api.exists());
    assert!(web.exists());
    assert!(!dir.path().join("prod/broken.conf").exists());

    let doc  = parse(&api)?;
    let prom = &doc["inputs"]["prometheus_http"][0];
    assert_eq!(prom["name"].as_str(), Some(api.to_string_lossy().as_ref()));
    assert_eq!(prom["url"].as_str(), Some("http://prometheus:9090"));
    assert_eq!(prom["user"].as_str(), Some("reader"));
    assert_eq!(prom["metric"][0]["query"].as_str(), Some(r#"sum(up{service="api"})"#));

    assert_eq!(obs.stats(), Stats { written: 2, unchanged: 0, empty: 0, failed: 1 });

    sink.process("prom", signal()?);
    assert_eq!(obs.stats().unchanged, 2);

    Ok(())
}

#[test]
fn signal_errors_name_discovery_type() -> Result<()> {
    capture();

    let dir      = tempdir()?;
    let mut opts = options(&dir);
    opts.signal.template = "{{missing}}".into();
    let sink = Telegraf::new(opts, Templates::new(), Observability::new());

    sink.process("signal-src", signal()?);

    assert_eq!(logged("signal-src: Signal service broken error: metrics are not found").len(), 0);
    assert_eq!(logged("signal-src: Signal service api has no path, skipped").len(), 1);

    let dir  = tempdir()?;
    let sink = Telegraf::new(options(&dir), Templates::new(), Observability::new());
    sink.process("signal-err", signal()?);

    let errors = logged("signal-err: Signal service broken error:");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("ERROR"));

    Ok(())
}

#[test]
fn signal_keeps_configured_connection() -> Result<()> {
    let dir      = tempdir()?;
    let mut opts = options(&dir);
    opts.signal.input.url = "http://thanos:9090".into();
    let sink = Telegraf::new(opts, Templates::new(), Observability::new());

    sink.process("prom", signal()?);

    let doc  = parse(&dir.path().join("dev/web.conf"))?;
    let prom = &doc["inputs"]["prometheus_http"][0];
    assert_eq!(prom["url"].as_str(), Some("http://thanos:9090"));
    assert_eq!(prom["user"].as_str(), Some("reader"));

    Ok(())
}

#[test]
fn io_failure_is_isolated() -> Result<()> {
    let dir  = tempdir()?;
    let obs  = Observability::new();
    let mut opts = options(&dir);

    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"x")?;
    opts.tcp.conf = blocker.join("tcp.conf").to_string_lossy().into_owned();

    let cert = opts.cert.conf.clone();
    let sink = Telegraf::new(opts, Templates::new(), obs.clone());

    sink.process("prom", Discovered::from_json("TCP",  json!({ "db:5432": {} }))?);
    sink.process("prom", Discovered::from_json("Cert", json!({ "tcp://a.com:443": {} }))?);

    assert!(Path::new(&cert).exists());
    assert_eq!(obs.stats(), Stats { written: 1, unchanged: 0, empty: 0, failed: 1 });

    Ok(())
}

#[test]
fn unknown_discovery_is_ignored() -> Result<()> {
    let dir  = tempdir()?;
    let obs  = Observability::new();
    let sink = Telegraf::new(options(&dir), Templates::new(), obs.clone());

    sink.process("prom", Discovered::from_json("PubSub", json!({}))?);

    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    assert_eq!(obs.stats(), Stats::default());

    Ok(())
}

#[test]
fn missing_conf_is_skipped() -> Result<()> {
    let dir      = tempdir()?;
    let obs      = Observability::new();
    let mut opts = options(&dir);
    opts.http.conf = String::new();
    let sink = Telegraf::new(opts, Templates::new(), obs.clone());

    sink.process("prom", Discovered::from_json("HTTP", json!({ "https://a.com": {} }))?);

    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    assert_eq!(obs.stats(), Stats::default());

    Ok(())
}
