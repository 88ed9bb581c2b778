use std::collections::HashMap;

use crate::engine::types::{Value, VariableId};

/// `J(i,a) ∈ Vars ∪ {⊥}`, defined only when `a ∉ D(i)`.
///
/// Represented as a map from `(i,a)` to the blaming variable; absence of a
/// key means `⊥` (either `a` is live, or it has never been blamed).
#[derive(Clone, Debug, Default)]
pub struct JustificationMap {
    blamer: HashMap<(VariableId, Value), VariableId>,
}

impl JustificationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blame(&mut self, i: VariableId, a: &Value, k: VariableId) {
        self.blamer.insert((i, a.clone()), k);
    }

    pub fn clear(&mut self, i: VariableId, a: &Value) {
        self.blamer.remove(&(i, a.clone()));
    }

    /// Returns `None` for `⊥`.
    pub fn blamer(&self, i: VariableId, a: &Value) -> Option<VariableId> {
        self.blamer.get(&(i, a.clone())).copied()
    }
}
