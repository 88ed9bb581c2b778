use std::collections::HashMap;

use crate::engine::types::{Value, VariableId};

/// A directed relation `R(i,j) ⊆ D0(i) × D0(j)`.
pub type Relation = im::HashSet<(Value, Value)>;

/// Holds the active binary constraints as a pair of directed tables per
/// unordered pair, `R(i,j)` and `R(j,i)`, with `(a,b) ∈ R(i,j) ⇔ (b,a) ∈
/// R(j,i)` maintained by construction.
#[derive(Clone, Debug, Default)]
pub struct ConstraintTable {
    relations: HashMap<(VariableId, VariableId), Relation>,
    neighbors: HashMap<VariableId, Vec<VariableId>>,
}

impl ConstraintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `R(i,j) := r` and the mirrored `R(j,i)`.
    ///
    /// Activating an already-active pair is the driver's responsibility to
    /// skip (§4.2 edge case); this method always (re)installs.
    pub fn activate(&mut self, i: VariableId, j: VariableId, r: Relation) {
        let reverse: Relation = r.iter().map(|(a, b)| (b.clone(), a.clone())).collect();
        self.relations.insert((i, j), r);
        self.relations.insert((j, i), reverse);
        self.add_neighbor(i, j);
        self.add_neighbor(j, i);
    }

    pub fn deactivate(&mut self, i: VariableId, j: VariableId) {
        self.relations.remove(&(i, j));
        self.relations.remove(&(j, i));
        self.remove_neighbor(i, j);
        self.remove_neighbor(j, i);
    }

    pub fn is_active(&self, i: VariableId, j: VariableId) -> bool {
        self.relations.contains_key(&(i, j))
    }

    pub fn check(&self, i: VariableId, j: VariableId, a: &Value, b: &Value) -> bool {
        self.relations
            .get(&(i, j))
            .map(|r| r.contains(&(a.clone(), b.clone())))
            .unwrap_or(false)
    }

    pub fn relation(&self, i: VariableId, j: VariableId) -> Option<&Relation> {
        self.relations.get(&(i, j))
    }

    /// Every `j` such that `(i,j)` is currently active, in a deterministic
    /// (insertion) order.
    pub fn active_neighbors(&self, i: VariableId) -> &[VariableId] {
        self.neighbors.get(&i).map(Vec::as_slice).unwrap_or(&[])
    }

    fn add_neighbor(&mut self, i: VariableId, j: VariableId) {
        let entry = self.neighbors.entry(i).or_default();
        if !entry.contains(&j) {
            entry.push(j);
        }
    }

    fn remove_neighbor(&mut self, i: VariableId, j: VariableId) {
        if let Some(entry) = self.neighbors.get_mut(&i) {
            entry.retain(|&x| x != j);
        }
    }
}
