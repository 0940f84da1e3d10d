//! Independent component analysis.

pub mod fastica;

pub use fastica::{fast_ica, FastIcaOptions, IcaResult};
