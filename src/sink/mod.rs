pub use discovered::{Connection, Discovered};
pub use telegraf::{Telegraf, TelegrafOptions};
pub use telegraf::{CertOptions, DnsOptions, HttpOptions, SignalOptions, TcpOptions};

mod discovered;
mod telegraf;

pub trait Sink {
    fn name(&self) -> &str;
    fn pass(&self) -> &[String];
    fn process(&self, source: &str, discovered: Discovered);
}

#[cfg(test)]
mod test;
