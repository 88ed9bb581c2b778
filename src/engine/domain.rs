use std::collections::HashMap;

use crate::engine::types::{Value, VariableId};

/// Owns the origin and live domains for every variable, plus the ordered
/// present/absent partition DnAC-6 needs for its `next`/`first`/`last`
/// queries.
///
/// Membership (`contains`) is backed by `im::HashSet` for O(1) amortized
/// lookup; `present`/`absent` are kept as plain `Vec`s in a total,
/// deterministic order derived from each variable's origin domain, per the
/// "present/absent lists" data-model note.
#[derive(Clone, Debug)]
pub struct DomainStore {
    origin: HashMap<VariableId, Vec<Value>>,
    origin_rank: HashMap<VariableId, HashMap<Value, usize>>,
    live: HashMap<VariableId, im::HashSet<Value>>,
    present: HashMap<VariableId, Vec<Value>>,
    absent: HashMap<VariableId, Vec<Value>>,
}

impl DomainStore {
    /// Builds a store from each variable's origin domain. The origin order
    /// (as given) becomes the total order used by `present`/`absent`.
    pub fn new(origin_domains: HashMap<VariableId, Vec<Value>>) -> Self {
        let mut origin = HashMap::new();
        let mut origin_rank = HashMap::new();
        let mut live = HashMap::new();
        let mut present = HashMap::new();
        let mut absent = HashMap::new();

        for (var, values) in origin_domains {
            let rank: HashMap<Value, usize> = values
                .iter()
                .enumerate()
                .map(|(idx, v)| (v.clone(), idx))
                .collect();
            live.insert(var, values.iter().cloned().collect());
            present.insert(var, values.clone());
            absent.insert(var, Vec::new());
            origin_rank.insert(var, rank);
            origin.insert(var, values);
        }

        Self {
            origin,
            origin_rank,
            live,
            present,
            absent,
        }
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.origin.keys().copied()
    }

    pub fn origin(&self, i: VariableId) -> &[Value] {
        &self.origin[&i]
    }

    pub fn live(&self, i: VariableId) -> &im::HashSet<Value> {
        &self.live[&i]
    }

    pub fn contains(&self, i: VariableId, a: &Value) -> bool {
        self.live[&i].contains(a)
    }

    /// Removes `a` from `D(i)`. No-op if already absent.
    pub fn remove(&mut self, i: VariableId, a: &Value) {
        if self.live.get_mut(&i).unwrap().remove(a).is_none() {
            return;
        }
        let present = self.present.get_mut(&i).unwrap();
        if let Some(pos) = present.iter().position(|v| v == a) {
            present.remove(pos);
        }
        self.absent.get_mut(&i).unwrap().push(a.clone());
    }

    /// Restores `a` to `D(i)`, reinserting it into `present(i)` at the
    /// position its origin-domain rank dictates. No-op if already present.
    pub fn restore(&mut self, i: VariableId, a: &Value) {
        if self.live[&i].contains(a) {
            return;
        }
        self.live.get_mut(&i).unwrap().insert(a.clone());

        let absent = self.absent.get_mut(&i).unwrap();
        if let Some(pos) = absent.iter().position(|v| v == a) {
            absent.remove(pos);
        }

        let rank = &self.origin_rank[&i];
        let target_rank = rank[a];
        let present = self.present.get_mut(&i).unwrap();
        let insert_at = present
            .iter()
            .position(|v| rank[v] > target_rank)
            .unwrap_or(present.len());
        present.insert(insert_at, a.clone());
    }

    pub fn present(&self, i: VariableId) -> &[Value] {
        &self.present[&i]
    }

    pub fn absent(&self, i: VariableId) -> &[Value] {
        &self.absent[&i]
    }

    pub fn first(&self, i: VariableId) -> Option<Value> {
        self.present[&i].first().cloned()
    }

    pub fn last(&self, i: VariableId) -> Option<Value> {
        self.present[&i].last().cloned()
    }

    /// The successor of `a` in `present(i)` order, or `None` if `a` is the
    /// last present value (or not present at all).
    pub fn next_after(&self, i: VariableId, a: &Value) -> Option<Value> {
        let present = &self.present[&i];
        let pos = present.iter().position(|v| v == a)?;
        present.get(pos + 1).cloned()
    }
}
