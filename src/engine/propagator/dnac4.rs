use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::engine::{
    constraints::{ConstraintTable, Relation},
    domain::DomainStore,
    justification::JustificationMap,
    propagator::ArcConsistencyPropagator,
    stats::StepStats,
    types::{Value, VariableId},
};

/// `((i,j), a)`: an entry on the suppression queue, meaning "recheck
/// whether `a ∈ D(i)` still has support across arc `(i,j)`".
type SuppressItem = ((VariableId, VariableId), Value);

/// DnAC-4, after Bessiere: maintains a complete support set `S(j,i,b)` and a
/// live-support counter `K((i,j),a)` per directed arc and value, so
/// retraction can restore exactly the values a single add would have
/// produced without rescanning the whole relation.
#[derive(Debug, Default)]
pub struct DnAc4 {
    /// `S(target, source, value)`: values of `source` supporting `value` of
    /// `target`, i.e. `a ∈ S(j,i,b) ⇔ a ∈ D0(i) ∧ (a,b) ∈ R(i,j)`.
    support: HashMap<(VariableId, VariableId, Value), im::HashSet<Value>>,
    /// `K((i,j),a) = |{b ∈ D(j) : (a,b) ∈ R(i,j)}|`.
    counter: HashMap<((VariableId, VariableId), Value), usize>,
}

impl DnAc4 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates `S(j,i,·)` and `K((i,j),·)` from `relation = R(i,j)`,
    /// pushing any `a` with zero live support onto `sl`.
    fn init_direction(
        &mut self,
        domains: &DomainStore,
        i: VariableId,
        j: VariableId,
        relation: &Relation,
        sl: &mut Vec<SuppressItem>,
    ) {
        for b in domains.origin(j) {
            self.support.insert((j, i, b.clone()), im::HashSet::new());
        }
        for a in domains.origin(i) {
            let mut live_support = 0usize;
            for b in domains.origin(j) {
                if relation.contains(&(a.clone(), b.clone())) {
                    if domains.contains(j, b) {
                        live_support += 1;
                    }
                    self.support
                        .get_mut(&(j, i, b.clone()))
                        .unwrap()
                        .insert(a.clone());
                }
            }
            self.counter.insert(((i, j), a.clone()), live_support);
            if live_support == 0 {
                sl.push(((i, j), a.clone()));
            }
        }
    }

    fn propagate(
        &mut self,
        domains: &mut DomainStore,
        constraints: &ConstraintTable,
        justification: &mut JustificationMap,
        mut sl: Vec<SuppressItem>,
        stats: &mut StepStats,
    ) {
        while let Some(((i, m), a)) = sl.pop() {
            stats.sl_pops += 1;
            let still_unsupported = self
                .counter
                .get(&((i, m), a.clone()))
                .copied()
                .unwrap_or(0)
                == 0;
            if !domains.contains(i, &a) || !still_unsupported {
                continue;
            }

            justification.blame(i, &a, m);
            domains.remove(i, &a);
            stats.deletions += 1;
            debug!(variable = i, value = %a, blamer = m, "DnAC-4 removed value");

            for &j in constraints.active_neighbors(i) {
                let Some(supporters) = self.support.get(&(i, j, a.clone())).cloned() else {
                    continue;
                };
                for a_prime in supporters.iter() {
                    let key = ((j, i), a_prime.clone());
                    let c = self.counter.entry(key.clone()).or_insert(0);
                    *c = c.saturating_sub(1);
                    if *c == 0 {
                        sl.push(key);
                    }
                }
            }
        }
    }
}

impl ArcConsistencyPropagator for DnAc4 {
    fn on_add(
        &mut self,
        domains: &mut DomainStore,
        constraints: &mut ConstraintTable,
        justification: &mut JustificationMap,
        i: VariableId,
        j: VariableId,
        relation: Relation,
        stats: &mut StepStats,
    ) {
        let reverse: Relation = relation.iter().map(|(a, b)| (b.clone(), a.clone())).collect();
        constraints.activate(i, j, relation.clone());

        let mut sl = Vec::new();
        self.init_direction(domains, i, j, &relation, &mut sl);
        self.init_direction(domains, j, i, &reverse, &mut sl);
        self.propagate(domains, constraints, justification, sl, stats);
    }

    fn on_retract(
        &mut self,
        domains: &mut DomainStore,
        constraints: &mut ConstraintTable,
        justification: &mut JustificationMap,
        k: VariableId,
        m: VariableId,
        stats: &mut StepStats,
    ) {
        let mut rl: VecDeque<(VariableId, Value)> = VecDeque::new();

        for a in domains.origin(k).to_vec() {
            if justification.blamer(k, &a) == Some(m) {
                rl.push_back((k, a.clone()));
                justification.clear(k, &a);
            }
            self.counter.remove(&((k, m), a.clone()));
            self.support.remove(&(k, m, a.clone()));
        }
        for b in domains.origin(m).to_vec() {
            if justification.blamer(m, &b) == Some(k) {
                rl.push_back((m, b.clone()));
                justification.clear(m, &b);
            }
            self.counter.remove(&((m, k), b.clone()));
            self.support.remove(&(m, k, b.clone()));
        }
        constraints.deactivate(k, m);

        let mut sl = Vec::new();
        while let Some((i, a)) = rl.pop_front() {
            stats.rl_pops += 1;
            domains.restore(i, &a);
            stats.restorations += 1;

            for j in constraints.active_neighbors(i).to_vec() {
                if let Some(supporters) = self.support.get(&(i, j, a.clone())).cloned() {
                    for a_prime in supporters.iter() {
                        let counter_key = ((j, i), a_prime.clone());
                        *self.counter.entry(counter_key).or_insert(0) += 1;
                        if justification.blamer(j, a_prime) == Some(i) {
                            rl.push_back((j, a_prime.clone()));
                            justification.clear(j, a_prime);
                        }
                    }
                }
                let supported = self
                    .counter
                    .get(&((i, j), a.clone()))
                    .copied()
                    .unwrap_or(0)
                    > 0;
                if !supported {
                    sl.push(((i, j), a.clone()));
                }
            }
        }
        self.propagate(domains, constraints, justification, sl, stats);
    }

    fn name(&self) -> &'static str {
        "dnac4"
    }
}
