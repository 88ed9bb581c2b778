pub mod constraints;
pub mod domain;
pub mod driver;
pub mod justification;
pub mod propagator;
pub mod search;
pub mod stats;
pub mod types;

use std::time::Instant;

use crate::engine::{
    constraints::{ConstraintTable, Relation},
    domain::DomainStore,
    justification::JustificationMap,
    propagator::ArcConsistencyPropagator,
    stats::StepStats,
    types::VariableId,
};

/// The single object owning every mutable table the propagation core needs:
/// domains, constraints, and justifications, plus the chosen propagator
/// variant. Everything is keyed by `VariableId`/`Value` handles rather than
/// by reference, so there is no ownership cycle (§9).
pub struct Engine {
    pub domains: DomainStore,
    pub constraints: ConstraintTable,
    pub justification: JustificationMap,
    propagator: Box<dyn ArcConsistencyPropagator>,
}

impl Engine {
    pub fn new(domains: DomainStore, propagator: Box<dyn ArcConsistencyPropagator>) -> Self {
        Self {
            domains,
            constraints: ConstraintTable::new(),
            justification: JustificationMap::new(),
            propagator,
        }
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.propagator.name()
    }

    pub fn is_active(&self, i: VariableId, j: VariableId) -> bool {
        self.constraints.is_active(i, j)
    }

    /// Installs `{i,j}` and restores arc-consistency. The caller is
    /// responsible for skipping this when the pair is already active
    /// (§4.2's "activating an active pair is a no-op").
    pub fn on_add(&mut self, i: VariableId, j: VariableId, relation: Relation, stats: &mut StepStats) {
        let start = Instant::now();
        self.propagator.on_add(
            &mut self.domains,
            &mut self.constraints,
            &mut self.justification,
            i,
            j,
            relation,
            stats,
        );
        stats.propagation_micros += start.elapsed().as_micros() as u64;
    }

    pub fn on_retract(&mut self, k: VariableId, m: VariableId, stats: &mut StepStats) {
        let start = Instant::now();
        self.propagator.on_retract(
            &mut self.domains,
            &mut self.constraints,
            &mut self.justification,
            k,
            m,
            stats,
        );
        stats.propagation_micros += start.elapsed().as_micros() as u64;
    }
}
