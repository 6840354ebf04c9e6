//! Finite-domain constraint satisfaction by binary branching.
//!
//! Each state branches on the first unassigned variable (declaration
//! order) and its first remaining value `v`: either `var == v` or
//! `var != v`. Removing a value that leaves one candidate assigns it;
//! removing the last candidate fails the move.

use std::collections::BTreeMap;
use std::fmt;

use lodestar_search::SearchState;

/// Branching relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Ne,
}

impl Relation {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

/// `var == value` or `var != value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CspMove {
    pub var: String,
    pub relation: Relation,
    pub value: i64,
}

impl fmt::Display for CspMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.var, self.relation.symbol(), self.value)
    }
}

/// Partial assignment over named integer domains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    /// Remaining candidates per variable, in declaration order.
    domains: Vec<(String, Vec<i64>)>,
    values: BTreeMap<String, i64>,
    unassigned: Vec<String>,
    /// When set, a complete assignment terminates the search. Otherwise the
    /// space is enumerated exhaustively unless a goal is supplied.
    stop_when_complete: bool,
}

impl Assignment {
    /// Build an unassigned state. Variables branch in the order given.
    pub fn new<I, N>(domains: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<i64>)>,
        N: Into<String>,
    {
        let domains: Vec<(String, Vec<i64>)> = domains
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .collect();
        let unassigned = domains.iter().map(|(name, _)| name.clone()).collect();
        Self {
            domains,
            values: BTreeMap::new(),
            unassigned,
            stop_when_complete: false,
        }
    }

    /// Terminate on the first complete assignment.
    #[must_use]
    pub fn stop_when_complete(mut self) -> Self {
        self.stop_when_complete = true;
        self
    }

    /// Assigned values, sorted by variable name.
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, i64> {
        &self.values
    }

    /// Remaining candidates of `var`.
    #[must_use]
    pub fn domain(&self, var: &str) -> Option<&[i64]> {
        self.domains
            .iter()
            .find(|(name, _)| name == var)
            .map(|(_, values)| values.as_slice())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    fn assign(&mut self, var: &str, value: i64) {
        self.values.insert(var.to_string(), value);
        self.unassigned.retain(|name| name != var);
    }
}

impl SearchState for Assignment {
    type Move = CspMove;

    fn moves(&self) -> Vec<CspMove> {
        let Some(var) = self.unassigned.first() else {
            return Vec::new();
        };
        let Some(&value) = self.domain(var).and_then(<[i64]>::first) else {
            return Vec::new();
        };
        [Relation::Eq, Relation::Ne]
            .into_iter()
            .map(|relation| CspMove {
                var: var.clone(),
                relation,
                value,
            })
            .collect()
    }

    fn execute(&mut self, mv: &CspMove) -> bool {
        let Some((_, domain)) = self.domains.iter_mut().find(|(name, _)| *name == mv.var) else {
            return false;
        };
        match mv.relation {
            Relation::Eq => {
                if !domain.contains(&mv.value) {
                    return false;
                }
                *domain = vec![mv.value];
                self.assign(&mv.var, mv.value);
            }
            Relation::Ne => {
                domain.retain(|&v| v != mv.value);
                match *domain.as_slice() {
                    [] => return false,
                    [only] => self.assign(&mv.var, only),
                    _ => {}
                }
            }
        }
        true
    }

    fn is_terminate(&self, goal: Option<&Self>) -> bool {
        match goal {
            Some(goal) => self.is_complete() && self.values == goal.values,
            None => self.stop_when_complete && self.is_complete(),
        }
    }

    fn label(&self, decision_count: u64, _depth: u32) -> String {
        let assigned: Vec<String> = self
            .values
            .iter()
            .map(|(var, value)| format!("{var}={value}"))
            .collect();
        format!("{decision_count}: {{{}}}", assigned.join(", "))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domains: Vec<String> = self
            .domains
            .iter()
            .map(|(var, values)| format!("{var}: {values:?}"))
            .collect();
        write!(f, "{}", domains.join("; "))
    }
}
