pub mod config;
pub mod pulsar_exporter;

pub(crate) mod parse;
