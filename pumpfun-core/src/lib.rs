#![allow(clippy::missing_errors_doc)]
#![allow(clippy::wildcard_imports)]

pub mod curve_math;
pub mod error;
pub mod fee;
#[cfg(feature = "offchain")]
pub mod idl_type_bridge;
pub mod pool_lifecycle;
pub mod reserves;
pub mod slippage_config;
pub mod units;
