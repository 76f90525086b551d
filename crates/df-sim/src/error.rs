//! Error types for simulation setup.

use thiserror::Error;

/// Errors raised while configuring a simulation. Stepping itself never fails.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] df_core::DfError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;
