//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    BorderPolicy, CadenceConfig, CadenceMode, CliOverrides, DisplayConfig, GridConfig,
    InputConfig, OutputConfig, RunConfig, Settings,
};
