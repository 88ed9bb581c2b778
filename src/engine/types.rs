use std::sync::Arc;

/// A numeric identifier for a single variable, `1..N`.
pub type VariableId = u32;

/// An atomic, opaque domain value.
///
/// Values are interned at parse time (see [`crate::io::parser`]) so that
/// equality during propagation is a cheap string comparison rather than a
/// repeated allocation, per the "value equality" design note.
#[derive(Clone, Debug, Eq, PartialOrd, Ord)]
pub struct Value(pub Arc<str>);

impl Value {
    pub fn new(s: impl Into<Arc<str>>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}
