//! holehe-maltego - holehe as a Maltego transform
//!
//! Runs holehe for one email address, classifies the sites it reports and
//! writes them back as Maltego entities together with a run summary.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod invoker;
pub mod patterns;
pub mod transform;
pub mod transport;

pub use error::{HoleheError, Result};
