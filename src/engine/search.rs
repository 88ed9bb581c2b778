use crate::engine::{
    constraints::ConstraintTable,
    domain::DomainStore,
    stats::StepStats,
    types::{Value, VariableId},
};

/// A complete assignment, one value per variable, in variable-id order.
pub type Assignment = Vec<(VariableId, Value)>;

/// Chronological, depth-first backtracking search over `1..=n`, honoring
/// only currently active constraints. Read-only with respect to the domain
/// store and support structures (§4.6).
///
/// Uses an explicit LIFO frontier of partial assignments rather than
/// recursion, per the design note's "explicit frontier with LIFO
/// semantics". Candidate values are tried in `present(i)` order — each
/// variable's origin-domain order restricted to what's still live — so the
/// first complete assignment found is deterministic and matches the order
/// values were listed in the input file, not their string sort order.
pub struct BacktrackingSearch;

impl BacktrackingSearch {
    pub fn search(
        domains: &DomainStore,
        constraints: &ConstraintTable,
        n: u32,
        stats: &mut StepStats,
    ) -> Option<Assignment> {
        let mut frontier: Vec<Assignment> = vec![Vec::new()];

        while let Some(assignment) = frontier.pop() {
            stats.nodes_visited += 1;
            let next = assignment.len() as u32 + 1;
            if next > n {
                return Some(assignment);
            }
            if domains.variables().all(|v| v != next) {
                return None;
            }

            let candidates: Vec<Value> = domains.present(next).to_vec();

            let mut pushed = 0u64;
            // Push in reverse so the LIFO frontier pops `present(i)`'s
            // first candidate first.
            for value in candidates.into_iter().rev() {
                let consistent = assignment.iter().all(|(y, w)| {
                    !constraints.is_active(*y, next) || constraints.check(*y, next, w, &value)
                });
                if consistent {
                    let mut child = assignment.clone();
                    child.push((next, value));
                    frontier.push(child);
                    pushed += 1;
                }
            }
            if pushed == 0 {
                stats.backtracks += 1;
            }
        }

        None
    }
}
