use std::fs;
use std::sync::Arc;
use anyhow::Result;
use tempfile::tempdir;
use crate::common::{Observability, Templates};
use crate::sink::{Discovered, Telegraf, TelegrafOptions};
use super::*;

#[test]
fn load_reads_named_result() -> Result<()> {
    let dir  = tempdir()?;
    let path = dir.path().join("dns.json");
    fs::write(&path, br#"{ "a.com": { "env": "dev" } }"#)?;

    let discovered = load(&format!("DNS={}", path.display()))?;
    assert!(matches!(discovered, Discovered::Dns(ref m) if m.len() == 1));

    assert!(load("DNS").is_err());
    assert!(load(&format!("HTTP={}", dir.path().join("missing.json").display())).is_err());

    Ok(())
}

#[test]
fn dispatch_skips_bad_results() -> Result<()> {
    let dir  = tempdir()?;
    let good = dir.path().join("dns.json");
    let bad  = dir.path().join("tcp.json");
    fs::write(&good, br#"{ "a.com": { "env": "dev" } }"#)?;
    fs::write(&bad,  b"not json")?;

    let mut opts = TelegrafOptions::default();
    opts.dns.conf  = dir.path().join("dns.conf").to_string_lossy().into_owned();
    opts.http.conf = dir.path().join("http.conf").to_string_lossy().into_owned();

    let obs  = Observability::new();
    let sink = Arc::new(Telegraf::new(opts, Templates::new(), obs.clone()));

    let results = vec![
        "broken".to_owned(),
        format!("HTTP={}", dir.path().join("missing.json").display()),
        format!("TCP={}", bad.display()),
        format!("DNS={}", good.display()),
    ];

    assert_eq!(dispatch(sink, "prom", &results), 1);
    assert!(dir.path().join("dns.conf").exists());
    assert!(!dir.path().join("http.conf").exists());
    assert_eq!(obs.stats().written, 1);

    Ok(())
}
