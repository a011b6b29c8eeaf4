use std::sync::Arc;
use anyhow::Result;
use clap::{App, load_yaml, value_t, values_t};
use env_logger::Builder;
use log::info;
use log::LevelFilter::*;
use discovery_sink::agent::dispatch;
use discovery_sink::args::options;
use discovery_sink::common::{Observability, Templates};
use discovery_sink::sink::Telegraf;

fn main() -> Result<()> {
    let yaml = load_yaml!("args.yml");
    let ver  = env!("CARGO_PKG_VERSION");
    let args = App::from_yaml(&yaml).version(ver).get_matches();

    let (module, level) = match args.occurrences_of("verbose") {
        0 => (Some(module_path!()), Info),
        1 => (Some(module_path!()), Debug),
        2 => (Some(module_path!()), Trace),
        _ => (None,                 Trace),
    };
    Builder::from_default_env().filter(module, level).init();

    info!("initializing discovery-sink {}", ver);

    let source  = value_t!(args, "source", String)?;
    let results = values_t!(args, "result", String)?;
    let options = options(&args)?;

    let obs  = Observability::new();
    let sink = Arc::new(Telegraf::new(options, Templates::new(), obs.clone()));

    let count = dispatch(sink, &source, &results);
    info!("{} of {} discovery results processed", count, results.len());

    let stats = obs.stats();
    info!("{} written, {} unchanged, {} empty, {} failed",
          stats.written, stats.unchanged, stats.empty, stats.failed);

    Ok(())
}
