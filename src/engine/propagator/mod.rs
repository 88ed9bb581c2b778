pub mod dnac4;
pub mod dnac6;

use crate::engine::{
    constraints::{ConstraintTable, Relation},
    domain::DomainStore,
    justification::JustificationMap,
    stats::StepStats,
    types::VariableId,
};

/// The shared add/retract contract both dynamic arc-consistency algorithms
/// implement. Modeled as a trait object rather than an enum so the driver
/// stays polymorphic over "which algorithm" without knowing either's
/// internal state, per the "polymorphism over algorithm" design note.
pub trait ArcConsistencyPropagator: std::fmt::Debug {
    /// Installs `R(i,j)` (and its mirror `R(j,i)`) and restores
    /// arc-consistency. A no-op call (pair already active) is the driver's
    /// responsibility to avoid, per §4.2.
    fn on_add(
        &mut self,
        domains: &mut DomainStore,
        constraints: &mut ConstraintTable,
        justification: &mut JustificationMap,
        i: VariableId,
        j: VariableId,
        relation: Relation,
        stats: &mut StepStats,
    );

    /// Deactivates `{i,j}` and restores every value whose justification
    /// pointed at the retracted arc, re-establishing arc-consistency.
    fn on_retract(
        &mut self,
        domains: &mut DomainStore,
        constraints: &mut ConstraintTable,
        justification: &mut JustificationMap,
        k: VariableId,
        m: VariableId,
        stats: &mut StepStats,
    );

    /// Human-readable algorithm name, for report headers.
    fn name(&self) -> &'static str;
}
