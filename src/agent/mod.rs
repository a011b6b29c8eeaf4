use std::sync::Arc;
use std::thread;
use anyhow::Result;
use log::{debug, error, warn};
use serde_json::Value;
use crate::args::{pair, read};
use crate::sink::{Discovered, Sink};

// Reads one NAME=PATH discovery result.
pub fn load(arg: &str) -> Result<Discovered> {
    let (name, path) = pair(arg)?;
    let value: Value = serde_json::from_slice(&read(&path)?)?;
    Ok(Discovered::from_json(&name, value)?)
}

// Processes every result on its own worker. Results that cannot be
// loaded are logged and skipped; all started workers are joined.
pub fn dispatch<S>(sink: Arc<S>, source: &str, results: &[String]) -> usize
where
    S: Sink + Send + Sync + 'static,
{
    let workers = results.iter().filter_map(|arg| {
        let discovered = match load(arg) {
            Ok(discovered) => discovered,
            Err(e)         => {
                error!("{}: result {} skipped: {}", source, arg, e);
                return None;
            }
        };

        debug!("{}: dispatching {} to {}", source, discovered.name(), sink.name());

        let sink   = sink.clone();
        let source = source.to_owned();
        Some(thread::spawn(move || sink.process(&source, discovered)))
    }).collect::<Vec<_>>();

    workers.into_iter().filter_map(|worker| match worker.join() {
        Ok(())  => Some(()),
        Err(_)  => {
            warn!("{}: discovery worker panicked", source);
            None
        }
    }).count()
}

#[cfg(test)]
mod test;
