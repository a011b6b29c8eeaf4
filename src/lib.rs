pub mod agent;
pub mod args;
pub mod common;
pub mod sink;
pub mod telegraf;
