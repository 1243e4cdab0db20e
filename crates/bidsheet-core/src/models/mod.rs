//! Data models: the line-item record and pipeline configuration.

pub mod config;
pub mod line_item;
