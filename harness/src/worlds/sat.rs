//! Boolean satisfiability over CNF clauses.
//!
//! Literals are non-zero integers in DIMACS convention: `3` is variable 3,
//! `-3` its negation. The state branches on the lowest unassigned variable,
//! `true` before `false`.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use lodestar_search::SearchState;

/// `var := value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SatMove {
    pub var: u32,
    pub value: bool,
}

impl fmt::Display for SatMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = if self.value { 'T' } else { 'F' };
        write!(f, "x{}={symbol}", self.var)
    }
}

/// Clause status under a partial assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseStatus {
    Satisfied,
    Open,
    Falsified,
}

/// Partial truth assignment for a shared clause set.
///
/// Equality and hashing use the assignment only.
#[derive(Debug, Clone)]
pub struct SatState {
    clauses: Arc<[Vec<i32>]>,
    values: BTreeMap<u32, bool>,
    /// Ascending.
    unassigned: Vec<u32>,
}

impl SatState {
    #[must_use]
    pub fn new(clauses: Vec<Vec<i32>>) -> Self {
        let mut unassigned: Vec<u32> = clauses
            .iter()
            .flatten()
            .map(|lit| lit.unsigned_abs())
            .collect();
        unassigned.sort_unstable();
        unassigned.dedup();
        Self {
            clauses: clauses.into(),
            values: BTreeMap::new(),
            unassigned,
        }
    }

    #[must_use]
    pub fn values(&self) -> &BTreeMap<u32, bool> {
        &self.values
    }

    /// Clauses not yet satisfied.
    #[must_use]
    pub fn unsatisfied(&self) -> usize {
        self.clauses
            .iter()
            .filter(|c| self.status(c) != ClauseStatus::Satisfied)
            .count()
    }

    fn status(&self, clause: &[i32]) -> ClauseStatus {
        let mut open = false;
        for &lit in clause {
            match self.values.get(&lit.unsigned_abs()) {
                Some(&value) if value == (lit > 0) => return ClauseStatus::Satisfied,
                Some(_) => {}
                None => open = true,
            }
        }
        if open {
            ClauseStatus::Open
        } else {
            ClauseStatus::Falsified
        }
    }
}

impl PartialEq for SatState {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for SatState {}

impl Hash for SatState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl SearchState for SatState {
    type Move = SatMove;

    fn moves(&self) -> Vec<SatMove> {
        self.unassigned
            .first()
            .map(|&var| {
                vec![
                    SatMove { var, value: true },
                    SatMove { var, value: false },
                ]
            })
            .unwrap_or_default()
    }

    fn execute(&mut self, mv: &SatMove) -> bool {
        if self.values.insert(mv.var, mv.value).is_some() {
            return false;
        }
        self.unassigned.retain(|&v| v != mv.var);
        !self
            .clauses
            .iter()
            .any(|c| self.status(c) == ClauseStatus::Falsified)
    }

    fn is_terminate(&self, _goal: Option<&Self>) -> bool {
        self.unsatisfied() == 0
    }

    fn objective(&self) -> Option<f64> {
        u32::try_from(self.unsatisfied()).ok().map(f64::from)
    }
}
