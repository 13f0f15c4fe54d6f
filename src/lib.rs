#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod common;
mod config;
#[cfg(feature = "std")]
pub mod engine_api;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
mod resolver;
#[cfg(feature = "std")]
pub mod server;
mod session;
mod ship;

pub use board::*;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use engine_api::{GameApi, SharedSession};
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
pub use resolver::*;
pub use session::*;
pub use ship::*;
