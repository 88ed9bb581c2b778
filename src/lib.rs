//! dycsp is a dynamic constraint satisfaction problem (CSP) solver.
//!
//! A CSP's constraint network here is not fixed: binary constraints are
//! added and retracted over a sequence of discrete time steps, and after
//! every change the engine must restore arc-consistency incrementally
//! rather than recomputing it from scratch. The core exposes two
//! interchangeable propagators for this, DnAC-4 and DnAC-6, behind one
//! [`engine::propagator::ArcConsistencyPropagator`] trait.
//!
//! # Example: a two-variable step
//!
//! ```
//! use dycsp::engine::{
//!     constraints::Relation,
//!     domain::DomainStore,
//!     propagator::dnac4::DnAc4,
//!     stats::StepStats,
//!     types::Value,
//!     Engine,
//! };
//!
//! let a = Value::from("a");
//! let b = Value::from("b");
//!
//! let mut origin = std::collections::HashMap::new();
//! origin.insert(1, vec![a.clone(), b.clone()]);
//! origin.insert(2, vec![a.clone(), b.clone()]);
//!
//! let domains = DomainStore::new(origin);
//! let mut engine = Engine::new(domains, Box::new(DnAc4::new()));
//!
//! let relation: Relation = [(a.clone(), a.clone()), (b.clone(), b.clone())]
//!     .into_iter()
//!     .collect();
//! let mut stats = StepStats::default();
//! engine.on_add(1, 2, relation, &mut stats);
//!
//! assert!(engine.domains.contains(1, &a));
//! assert!(engine.domains.contains(2, &a));
//! ```
pub mod cli;
pub mod engine;
pub mod error;
pub mod generator;
pub mod io;
