//! Search entry point and expansion loop.
//!
//! One [`Explorer::explore`] call owns a fresh arena, frontier and closed
//! set. Nothing survives between calls except the policy and the counters
//! of the most recent run.

use std::hash::Hash;
use std::time::Instant;

use tracing::{debug, trace};

use crate::closed::ClosedSet;
use crate::contract::SearchState;
use crate::decision::Decision;
use crate::error::SearchError;
use crate::frontier::{new_frontier, Frontier};
use crate::node::{NodeArena, NodeId};
use crate::path::{reconstruct, SolutionPath};
use crate::policy::{ExplorationType, SearchPolicy};
use crate::stats::SearchStats;
use crate::trace::{EdgeTarget, NodeColor, TraceEvent, TraceSink};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// A terminal state was found (and, for best-first, retained).
    SolutionFound,
    /// No pending decision remained and no terminal state was found.
    FrontierExhausted,
    /// `max_moves` decisions were processed.
    MoveBudgetExceeded,
    /// `max_runtime` elapsed.
    RuntimeExceeded,
}

impl TerminationReason {
    /// Stable name for reports and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SolutionFound => "solution_found",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::MoveBudgetExceeded => "move_budget_exceeded",
            Self::RuntimeExceeded => "runtime_exceeded",
        }
    }

    /// Whether the run was cut short by a resource bound.
    #[must_use]
    pub fn is_limit(self) -> bool {
        matches!(self, Self::MoveBudgetExceeded | Self::RuntimeExceeded)
    }
}

/// Driver state machine.
///
/// `Init → Expanding ⇄ Popping → Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No run has started.
    Init,
    /// Testing a state for termination and pushing its decisions.
    Expanding,
    /// Taking the next decision off the frontier.
    Popping,
    /// The most recent run ended.
    Terminated(TerminationReason),
}

/// Result of one run.
///
/// `solution` is present whenever a terminal state was retained, even if a
/// best-first run was later stopped by a bound. `path` is present only when
/// the policy asks for it.
#[derive(Debug, Clone)]
pub struct SearchOutcome<S: SearchState> {
    pub termination: TerminationReason,
    pub solution: Option<S>,
    pub path: Option<SolutionPath<S>>,
    pub stats: SearchStats,
}

impl<S: SearchState> SearchOutcome<S> {
    /// Returns `true` if a terminal state was found.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.solution.is_some()
    }
}

/// Search driver configured by one [`SearchPolicy`].
#[derive(Debug, Clone)]
pub struct Explorer {
    policy: SearchPolicy,
    stats: SearchStats,
    phase: Phase,
}

impl Explorer {
    #[must_use]
    pub fn new(policy: SearchPolicy) -> Self {
        Self {
            policy,
            stats: SearchStats::default(),
            phase: Phase::Init,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Counters of the most recent run.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Explore from `initial` until a terminal state, exhaustion, or a bound.
    ///
    /// Resource-bound stops are not errors; they are reported through
    /// [`SearchOutcome::termination`].
    ///
    /// `Eq + Hash` are required in both modes; only graph search uses them.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBound`] before any exploration if the
    /// policy fails validation, and [`SearchError::MissingObjective`] if
    /// best-first exploration meets a state without an objective. After an
    /// error the explorer is back in [`Phase::Init`], [`Explorer::stats`]
    /// holds the counters up to the failing state, and the trace ends at
    /// the last event before the failure with no [`TraceEvent::Finished`].
    pub fn explore<S>(
        &mut self,
        initial: S,
        goal: Option<&S>,
        sink: &mut dyn TraceSink,
    ) -> Result<SearchOutcome<S>, SearchError>
    where
        S: SearchState + Eq + Hash + 'static,
        S::Move: Eq + Hash + 'static,
    {
        self.policy.validate()?;
        self.stats = SearchStats::default();
        self.phase = Phase::Init;

        let best_first = self.policy.exploration == ExplorationType::BestFirst;
        if best_first && initial.objective().is_none() {
            return Err(SearchError::MissingObjective {
                label: initial.label(0, 0),
            });
        }

        debug!(
            exploration = self.policy.exploration.name(),
            mode = self.policy.mode.name(),
            max_depth = self.policy.max_depth,
            max_moves = self.policy.max_moves,
            "search started"
        );

        let mut run = Run {
            policy: &self.policy,
            goal,
            sink,
            arena: NodeArena::new(),
            frontier: new_frontier(self.policy.exploration),
            closed: self.policy.mode.is_graph_search().then(ClosedSet::new),
            stats: SearchStats::default(),
            phase: Phase::Init,
            started: Instant::now(),
            next_order: 0,
            last_label: String::new(),
            solution: None,
        };
        let result = run.drive(initial);
        run.stats.elapsed = run.started.elapsed();
        run.stats.frontier_high_water = run.frontier.high_water();
        run.stats.nodes_created = run.arena.created() as u64;
        run.stats.live_nodes_high_water = run.arena.high_water() as u64;
        self.stats = run.stats;

        let termination = match result {
            Ok(termination) => termination,
            Err(e) => {
                self.phase = Phase::Init;
                debug!(error = %e, decisions = self.stats.decisions, "search failed");
                return Err(e);
            }
        };
        self.phase = run.phase;

        debug!(
            termination = termination.name(),
            decisions = self.stats.decisions,
            failed_decisions = self.stats.failed_decisions,
            duplicates_suppressed = self.stats.duplicates_suppressed,
            live_nodes_high_water = self.stats.live_nodes_high_water,
            elapsed_us = u64::try_from(self.stats.elapsed.as_micros()).unwrap_or(u64::MAX),
            "search finished"
        );

        let solution = run.solution.map(|(id, _)| id);
        let path = solution
            .filter(|_| self.policy.return_path)
            .map(|id| reconstruct(&run.arena, id, self.policy.path_order));
        Ok(SearchOutcome {
            termination,
            solution: solution.map(|id| run.arena.get(id).state.clone()),
            path,
            stats: self.stats,
        })
    }
}

/// Whether the run must return right after expand-or-terminate.
enum Expansion {
    Continue,
    Found,
}

/// Per-run working set.
struct Run<'a, S: SearchState> {
    policy: &'a SearchPolicy,
    goal: Option<&'a S>,
    sink: &'a mut dyn TraceSink,
    arena: NodeArena<S>,
    frontier: Box<dyn Frontier<S::Move>>,
    closed: Option<ClosedSet<S, S::Move>>,
    stats: SearchStats,
    phase: Phase,
    started: Instant,
    next_order: u64,
    /// Label of the most recently created node.
    last_label: String,
    /// Retained terminal node (pinned in the arena) and its objective.
    solution: Option<(NodeId, Option<f64>)>,
}

impl<S> Run<'_, S>
where
    S: SearchState + Eq + Hash,
    S::Move: Eq + Hash,
{
    fn drive(&mut self, initial: S) -> Result<TerminationReason, SearchError> {
        let label = initial.label(0, 0);
        let root = self.arena.push_root(initial, label.clone());
        self.last_label.clone_from(&label);
        self.sink.record(TraceEvent::Root { node: root, label });

        self.phase = Phase::Expanding;
        if let Expansion::Found = self.expand_or_terminate(root)? {
            return Ok(self.finish(TerminationReason::SolutionFound));
        }

        loop {
            if self.frontier.is_empty() {
                let reason = if self.solution.is_some() {
                    TerminationReason::SolutionFound
                } else {
                    TerminationReason::FrontierExhausted
                };
                return Ok(self.finish(reason));
            }
            if self.stats.decisions >= self.policy.max_moves {
                return Ok(self.finish(TerminationReason::MoveBudgetExceeded));
            }
            if self
                .policy
                .max_runtime
                .is_some_and(|limit| self.started.elapsed() > limit)
            {
                return Ok(self.finish(TerminationReason::RuntimeExceeded));
            }

            self.phase = Phase::Popping;
            let Some(decision) = self.frontier.remove() else {
                continue;
            };
            let from = decision.node;

            let parent = self.arena.get(from);
            if let Some(closed) = self.closed.as_mut() {
                if !closed.insert(&parent.state, &decision.mv) {
                    self.stats.duplicates_suppressed += 1;
                    trace!(from = %from, mv = %decision.mv, "closed decision suppressed");
                    self.arena.release(from);
                    continue;
                }
            }

            self.stats.decisions += 1;
            let mut successor = parent.state.clone();
            let move_label = decision.mv.to_string();

            if !successor.execute(&decision.mv) {
                self.stats.failed_decisions += 1;
                trace!(decision = self.stats.decisions, from = %from, mv = %move_label, "move failed");
                self.sink.record(TraceEvent::Edge {
                    decision: self.stats.decisions,
                    from,
                    to: EdgeTarget::Failed,
                    move_label,
                    depth: decision.depth,
                });
                self.arena.release(from);
                continue;
            }

            let label = successor.label(self.stats.decisions, decision.depth + 1);
            let child = self
                .arena
                .push_child(from, decision.mv, successor, label.clone());
            self.arena.release(from);
            self.last_label.clone_from(&label);
            trace!(decision = self.stats.decisions, from = %from, to = %child, mv = %move_label, "move applied");
            self.sink.record(TraceEvent::Edge {
                decision: self.stats.decisions,
                from,
                to: EdgeTarget::Node { node: child, label },
                move_label,
                depth: decision.depth,
            });

            self.phase = Phase::Expanding;
            if let Expansion::Found = self.expand_or_terminate(child)? {
                return Ok(self.finish(TerminationReason::SolutionFound));
            }
        }
    }

    fn expand_or_terminate(&mut self, id: NodeId) -> Result<Expansion, SearchError> {
        let best_first = self.policy.exploration == ExplorationType::BestFirst;
        let node = self.arena.get(id);

        if node.state.is_terminate(self.goal) {
            self.sink.record(TraceEvent::Highlight {
                node: id,
                label: node.label.clone(),
                color: NodeColor::Solution,
            });
            if !best_first {
                self.solution = Some((id, None));
                self.arena.pin(id);
                return Ok(Expansion::Found);
            }
            let objective = node.state.objective().ok_or_else(|| {
                SearchError::MissingObjective {
                    label: node.label.clone(),
                }
            })?;
            let improves = match self.solution {
                Some((_, Some(best))) => objective.total_cmp(&best).is_lt(),
                _ => true,
            };
            if improves {
                trace!(node = %id, objective, "terminal state retained");
                self.arena.pin(id);
                if let Some((previous, _)) = self.solution.replace((id, Some(objective))) {
                    self.arena.unpin(previous);
                }
            } else {
                self.arena.collect(id);
            }
            return Ok(Expansion::Continue);
        }

        let depth = node.depth();
        if depth >= self.policy.max_depth {
            self.stats.depth_cutoffs += 1;
            trace!(node = %id, depth, "depth bound reached");
            self.arena.collect(id);
            return Ok(Expansion::Continue);
        }

        let objective = node.state.objective();
        if best_first && objective.is_none() {
            return Err(SearchError::MissingObjective {
                label: node.label.clone(),
            });
        }

        let mut moves = node.state.moves();
        if self.policy.exploration == ExplorationType::DepthFirst {
            moves.reverse();
        }
        let mut pending = 0;
        for mv in moves {
            if let Some(closed) = &self.closed {
                if closed.contains(&node.state, &mv) {
                    self.stats.duplicates_suppressed += 1;
                    continue;
                }
            }
            self.frontier.insert(Decision {
                node: id,
                mv,
                depth,
                objective,
                creation_order: self.next_order,
            });
            self.next_order += 1;
            pending += 1;
        }

        self.sink.record(TraceEvent::Highlight {
            node: id,
            label: node.label.clone(),
            color: NodeColor::Expanded,
        });
        self.arena.retain(id, pending);
        self.arena.collect(id);
        Ok(Expansion::Continue)
    }

    /// Re-emit the final node and close the trace.
    fn finish(&mut self, termination: TerminationReason) -> TerminationReason {
        let final_node = match self.solution {
            Some((id, _)) => {
                self.sink.record(TraceEvent::Highlight {
                    node: id,
                    label: self.arena.get(id).label.clone(),
                    color: NodeColor::Solution,
                });
                Some(id)
            }
            None => {
                let last = self.arena.last_id();
                if let Some(id) = last {
                    self.sink.record(TraceEvent::Highlight {
                        node: id,
                        label: self.last_label.clone(),
                        color: NodeColor::Final,
                    });
                }
                last
            }
        };
        self.sink.record(TraceEvent::Finished {
            termination,
            final_node,
        });
        self.phase = Phase::Terminated(termination);
        termination
    }
}
