// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cases found by the search and their persistence record.

use crate::error::{Eq2pcError, Result};
use crate::geometry::{GridShape, Phase, Structure};
use serde::{Deserialize, Serialize};

/// A group of pairwise unrelated structures with one signature.
///
/// The first structure is the anchor, the lowest-index candidate of the
/// group; the rest are its partners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    structures: Vec<Structure>,
}

impl Case {
    pub(crate) fn new(structures: Vec<Structure>) -> Self {
        debug_assert!(!structures.is_empty());
        Self { structures }
    }

    pub fn anchor(&self) -> &Structure {
        &self.structures[0]
    }

    pub fn partners(&self) -> &[Structure] {
        &self.structures[1..]
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Structure> {
        self.structures.iter()
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Flatten for persistence, recording the grid and event counts.
    pub fn to_record(&self, events: &[usize]) -> CaseRecord {
        CaseRecord {
            shape: self.anchor().shape().dims().to_vec(),
            events: events.to_vec(),
            structures: self.iter().map(Structure::to_flat).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Case {
    type Item = &'a Structure;
    type IntoIter = std::slice::Iter<'a, Structure>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flat form of a case, as handed to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub shape: Vec<usize>,
    pub events: Vec<usize>,
    pub structures: Vec<Vec<Phase>>,
}

impl CaseRecord {
    /// Rebuild the case.
    ///
    /// Checks the shape and the length of every structure; whether the
    /// labels agree with `events` is left to the caller.
    pub fn to_case(&self) -> Result<Case> {
        let shape = GridShape::new(&self.shape)?;
        if self.structures.is_empty() {
            return Err(Eq2pcError::EmptyCase);
        }
        let structures = self
            .structures
            .iter()
            .map(|labels| Structure::from_flat(&shape, labels.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Case::new(structures))
    }
}
