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

/// `[i, j, a, find, last_tested]`: an entry on the suppression queue.
///
/// `find = false` means "a has no support and must trigger a fresh
/// elimination"; `find = true` means "resume the scan for a new support
/// beyond `last_tested`".
#[derive(Clone, Debug)]
struct SuppressItem {
    i: VariableId,
    j: VariableId,
    a: Value,
    find: bool,
    last_tested: Option<Value>,
}

/// DnAC-6, after Debruyne: keeps only a lazy "current witness" support set
/// `S(j,i,b)` and exploits the deterministic `present(i)` order to resume a
/// scan where the previous one left off, instead of DnAC-4's full support
/// sets and counters.
#[derive(Debug, Default)]
pub struct DnAc6 {
    /// `S(target, source, value)`, lazily populated: only the values of
    /// `source` that have actually served as a witness support for `value`
    /// of `target`.
    support: HashMap<(VariableId, VariableId, Value), im::HashSet<Value>>,
}

impl DnAc6 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `present(j)` forward from `b0` for the first `b` with `(a,b) ∈
    /// R(i,j)`. Records `a` as a witness support for `b` and returns `true`
    /// on success.
    fn next_support(
        &mut self,
        domains: &DomainStore,
        constraints: &ConstraintTable,
        i: VariableId,
        j: VariableId,
        a: &Value,
        b0: Option<Value>,
    ) -> bool {
        let mut b = b0;
        while let Some(candidate) = b {
            if constraints.check(i, j, a, &candidate) {
                self.support
                    .entry((j, i, candidate.clone()))
                    .or_default()
                    .insert(a.clone());
                return true;
            }
            b = domains.next_after(j, &candidate);
        }
        false
    }

    fn propagate(
        &mut self,
        domains: &mut DomainStore,
        constraints: &ConstraintTable,
        justification: &mut JustificationMap,
        mut sl: Vec<SuppressItem>,
        stats: &mut StepStats,
    ) {
        while let Some(SuppressItem {
            i,
            j,
            a,
            find,
            last_tested,
        }) = sl.pop()
        {
            stats.sl_pops += 1;
            if !domains.contains(i, &a) {
                continue;
            }

            let supported = if find {
                let b0 = match &last_tested {
                    Some(lt) => domains.next_after(j, lt),
                    None => domains.first(j),
                };
                self.next_support(domains, constraints, i, j, &a, b0)
            } else {
                false
            };
            if supported {
                continue;
            }

            for k in constraints.active_neighbors(i).to_vec() {
                let supporters = self
                    .support
                    .get(&(i, k, a.clone()))
                    .cloned()
                    .unwrap_or_default();
                for b in supporters.iter().filter(|b| domains.contains(k, b)) {
                    let resume_from = domains.next_after(i, &a);
                    let found = self.next_support(domains, constraints, k, i, b, resume_from);
                    if !found {
                        sl.push(SuppressItem {
                            i: k,
                            j: i,
                            a: b.clone(),
                            find: false,
                            last_tested: None,
                        });
                    }
                }
                self.support.insert((i, k, a.clone()), im::HashSet::new());
            }

            domains.remove(i, &a);
            stats.deletions += 1;
            justification.blame(i, &a, j);
            debug!(variable = i, value = %a, blamer = j, "DnAC-6 removed value");
        }
    }
}

impl ArcConsistencyPropagator for DnAc6 {
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
        constraints.activate(i, j, relation);

        for b in domains.present(j).to_vec() {
            self.support.insert((j, i, b), im::HashSet::new());
        }
        for a in domains.present(i).to_vec() {
            self.support.insert((i, j, a), im::HashSet::new());
        }

        let mut sl = Vec::new();
        for a in domains.present(i).to_vec() {
            let supported = self.next_support(domains, constraints, i, j, &a, domains.first(j));
            if !supported {
                sl.push(SuppressItem {
                    i,
                    j,
                    a,
                    find: false,
                    last_tested: None,
                });
            }
        }
        for b in domains.present(j).to_vec() {
            let supported = self.next_support(domains, constraints, j, i, &b, domains.first(i));
            if !supported {
                sl.push(SuppressItem {
                    i: j,
                    j: i,
                    a: b,
                    find: false,
                    last_tested: None,
                });
            }
        }

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
        let mut rl: VecDeque<(VariableId, VariableId, Value)> = VecDeque::new();

        for a in domains.absent(k).to_vec() {
            if justification.blamer(k, &a) == Some(m) {
                rl.push_back((k, m, a.clone()));
                justification.clear(k, &a);
                self.support.remove(&(k, m, a));
            }
        }
        for b in domains.absent(m).to_vec() {
            if justification.blamer(m, &b) == Some(k) {
                rl.push_back((m, k, b.clone()));
                justification.clear(m, &b);
                self.support.remove(&(m, k, b));
            }
        }
        constraints.deactivate(k, m);

        let mut sl = Vec::new();
        while let Some((owner, partner, a)) = rl.pop_front() {
            stats.rl_pops += 1;
            if domains.absent(owner).iter().any(|v| v == &a) {
                domains.restore(owner, &a);
                stats.restorations += 1;
            }

            for j in constraints.active_neighbors(owner).to_vec() {
                if j == partner {
                    continue;
                }
                let supported =
                    self.next_support(domains, constraints, owner, j, &a, domains.first(j));

                for c in domains.absent(j).to_vec() {
                    if justification.blamer(j, &c) == Some(owner)
                        && constraints.check(owner, j, &a, &c)
                    {
                        justification.clear(j, &c);
                        rl.push_back((j, owner, c.clone()));
                        self.support
                            .entry((owner, j, a.clone()))
                            .or_default()
                            .insert(c);
                    }
                }

                if !supported {
                    sl.push(SuppressItem {
                        i: owner,
                        j,
                        a: a.clone(),
                        find: true,
                        last_tested: domains.last(j),
                    });
                }
            }
        }

        self.propagate(domains, constraints, justification, sl, stats);
    }

    fn name(&self) -> &'static str {
        "dnac6"
    }
}
