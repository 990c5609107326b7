// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable search state kept on the context.
//!
//! - statistics: counters updated by the predicates of a search

pub mod statistics;

pub use statistics::{Counters, Statistics};
