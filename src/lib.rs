// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search for structures that share their two-point correlations but are
//! not related by periodic shifts or reflections.
//!
//! A structure assigns a phase label to every cell of a periodic 1-, 2- or
//! 3-dimensional grid. Its two-point correlation (2PC) signature counts, for
//! every pair of phases and every shift, the cell pairs at that offset with
//! those phases. Shifting a structure leaves the signature unchanged, and
//! so does reflecting a two-phase one; this crate looks for structures with
//! equal signatures that are not such copies of each other.
//!
//! # Architecture
//!
//! - `geometry`: grids, structures, indicators, 2PC-preserving transforms
//! - `correlation`: exact and FFT correlation, signatures, comparison
//! - `symmetry`: shift/reflection relations and greedy deduplication
//! - `engine`: the backtracking predicate engine
//! - `predicates`: the steps of the search program
//! - `context`, `state`: the per-search state and its statistics
//! - `search`: configuration, enumeration, the `search` entry point, cases
//!
//! # Search Algorithm
//!
//! The search is a predicate program on the engine:
//!
//! 1. **EnumeratePredicate**: every distinct arrangement of the phase
//!    multiset, with cell 0 pinned to phase 1
//! 2. **SignaturePredicate**: one signature per candidate
//! 3. **GroupingPredicate**: one choice per anchor candidate; a choice
//!    succeeds when later candidates share its signature without being
//!    related to it
//! 4. **StopPolicyPredicate**: suspends when enough cases are found,
//!    otherwise fails back into the next anchor
//!
//! Cases are then filtered across each other before being returned.
//!
//! # Example
//!
//! ```
//! use eq2pc_search::{search, SearchConfig, signature, related, Method};
//!
//! let outcome = search(&SearchConfig::new(&[4, 3], &[3, 2])).unwrap();
//! let case = &outcome.cases[0];
//! let (a, b) = (case.anchor(), &case.partners()[0]);
//! assert_eq!(signature(a, Method::Exact), signature(b, Method::Exact));
//! assert!(!related(a, b, true));
//! ```

pub mod context;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod predicates;
pub mod search;
pub mod state;
pub mod symmetry;

// Re-export commonly used types
pub use context::SearchContext;
pub use correlation::{correlate, signature, Comparison, Correlation, Method, Signature};
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use error::{Eq2pcError, Result};
pub use geometry::{EventCounts, GridShape, Placement, Structure};
pub use search::{search, Case, CaseRecord, SearchConfig, SearchOutcome, StopPolicy};
pub use symmetry::{find_relation, related, unrelated, Relation};
