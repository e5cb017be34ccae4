pub mod config;
pub mod logging;

pub mod fetch;
pub mod filename;
pub mod localize;
pub mod manifest;
