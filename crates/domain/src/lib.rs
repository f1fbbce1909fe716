#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
pub mod log;

mod error;
mod exercise;
mod generator;
mod id;
mod name;
mod plan;
mod profile;
mod service;
mod settings;
mod statistics;
mod workout_log;

pub use error::*;
pub use exercise::*;
pub use generator::*;
pub use id::*;
pub use name::*;
pub use plan::*;
pub use profile::*;
pub use service::*;
pub use settings::*;
pub use statistics::*;
pub use workout_log::*;
