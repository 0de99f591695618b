//! Configuration file parsing and validation

pub mod extbump_toml;

pub use extbump_toml::{
    CONFIG_FILE, ColorOption, Config, GitConfig, LayoutConfig, OutputConfig, ScanConfig,
};
