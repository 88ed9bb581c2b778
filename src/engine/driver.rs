use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::engine::{
    constraints::Relation,
    search::{Assignment, BacktrackingSearch},
    stats::StepStats,
    types::{Value, VariableId},
    Engine,
};

/// One scheduled edit to the constraint network.
#[derive(Clone, Debug)]
pub enum ScheduledEdit {
    Add {
        i: VariableId,
        j: VariableId,
        relation: Relation,
    },
    Retract {
        i: VariableId,
        j: VariableId,
    },
}

/// A parsed problem instance: the origin domains and the edits scheduled
/// per time step, ready to hand to [`TimeStepDriver`].
#[derive(Clone, Debug, Default)]
pub struct ProblemInstance {
    pub n: u32,
    pub origin_domains: std::collections::HashMap<VariableId, Vec<Value>>,
    pub edits: BTreeMap<u32, Vec<ScheduledEdit>>,
}

impl ProblemInstance {
    /// The highest time step referenced by any scheduled edit.
    pub fn max_time(&self) -> u32 {
        self.edits.keys().next_back().copied().unwrap_or(0)
    }
}

/// The outcome of applying one edit, for the report.
#[derive(Clone, Debug)]
pub struct AppliedEdit {
    pub description: String,
    pub warning: Option<String>,
}

/// Everything the report writer needs for one time step. Steps with no
/// scheduled edits produce no [`StepReport`] at all (§4.7: "the driver does
/// nothing at that step").
#[derive(Clone, Debug)]
pub struct StepReport {
    pub t: u32,
    pub applied: Vec<AppliedEdit>,
    pub live_domains: Vec<(VariableId, Vec<Value>)>,
    pub assignment: Option<Assignment>,
    pub stats: StepStats,
}

/// Applies a batch of edits, re-establishes arc-consistency, then invokes
/// backtracking search, once per time step (§4.7).
pub struct TimeStepDriver {
    pub engine: Engine,
}

impl TimeStepDriver {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn run(&mut self, instance: &ProblemInstance) -> Vec<StepReport> {
        let mut reports = Vec::new();

        for t in 0..=instance.max_time() {
            let Some(edits) = instance.edits.get(&t) else {
                continue;
            };
            if edits.is_empty() {
                continue;
            }

            let mut applied = Vec::new();
            let mut stats = StepStats::default();

            for edit in edits {
                match edit {
                    ScheduledEdit::Add { i, j, relation } => {
                        if self.engine.is_active(*i, *j) {
                            let message = format!("add({i},{j}) skipped: already active");
                            warn!(%message, "ReAdd");
                            applied.push(AppliedEdit {
                                description: format!("add({i}, {j})"),
                                warning: Some(message),
                            });
                            continue;
                        }
                        self.engine.on_add(*i, *j, relation.clone(), &mut stats);
                        applied.push(AppliedEdit {
                            description: format!("add({i}, {j})"),
                            warning: None,
                        });
                    }
                    ScheduledEdit::Retract { i, j } => {
                        if !self.engine.is_active(*i, *j) {
                            let message = format!("retract({i},{j}) skipped: not active");
                            warn!(%message, "RetractInactive");
                            applied.push(AppliedEdit {
                                description: format!("retract({i}, {j})"),
                                warning: Some(message),
                            });
                            continue;
                        }
                        self.engine.on_retract(*i, *j, &mut stats);
                        applied.push(AppliedEdit {
                            description: format!("retract({i}, {j})"),
                            warning: None,
                        });
                    }
                }
            }

            let mut live_domains: Vec<(VariableId, Vec<Value>)> = self
                .engine
                .domains
                .variables()
                .map(|v| {
                    let mut values: Vec<Value> = self.engine.domains.live(v).iter().cloned().collect();
                    values.sort_by(|a, b| a.as_str().cmp(b.as_str()));
                    (v, values)
                })
                .collect();
            live_domains.sort_by_key(|(v, _)| *v);

            let search_start = std::time::Instant::now();
            let assignment = BacktrackingSearch::search(
                &self.engine.domains,
                &self.engine.constraints,
                instance.n,
                &mut stats,
            );
            stats.search_micros += search_start.elapsed().as_micros() as u64;

            if assignment.is_none() {
                info!(t, "no complete assignment found");
            }

            reports.push(StepReport {
                t,
                applied,
                live_domains,
                assignment,
                stats,
            });
        }

        reports
    }
}
