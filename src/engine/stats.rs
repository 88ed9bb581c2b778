use prettytable::{Cell, Row, Table};

/// Propagation/search counters for a single time step. Purely observational:
/// accumulating these never changes `D(i)`, `J`, or search outcomes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepStats {
    /// Number of suppression-queue (`SL`) items popped by `propagate`.
    pub sl_pops: u64,
    /// Number of restoration-queue (`RL`) items popped during a retraction.
    pub rl_pops: u64,
    /// Number of values removed from a live domain.
    pub deletions: u64,
    /// Number of values restored to a live domain.
    pub restorations: u64,
    /// Wall-clock time spent in propagation, in microseconds.
    pub propagation_micros: u64,
    /// Wall-clock time spent in search, in microseconds.
    pub search_micros: u64,
    /// Search tree nodes visited.
    pub nodes_visited: u64,
    /// Search backtracks taken.
    pub backtracks: u64,
}

/// Accumulated [`StepStats`] keyed by time step, for the `--stats` report.
#[derive(Debug, Default, Clone)]
pub struct EngineStats {
    pub per_step: Vec<(u32, StepStats)>,
}

impl EngineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, t: u32, step: StepStats) {
        self.per_step.push((t, step));
    }
}

/// Renders the accumulated stats as a table, in the same style as the host
/// crate's `render_stats_table`.
pub fn render_stats_table(stats: &EngineStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("t"),
        Cell::new("SL pops"),
        Cell::new("RL pops"),
        Cell::new("Deletions"),
        Cell::new("Restorations"),
        Cell::new("Nodes"),
        Cell::new("Backtracks"),
        Cell::new("Propagation (us)"),
        Cell::new("Search (us)"),
    ]));

    for (t, step) in &stats.per_step {
        table.add_row(Row::new(vec![
            Cell::new(&t.to_string()),
            Cell::new(&step.sl_pops.to_string()),
            Cell::new(&step.rl_pops.to_string()),
            Cell::new(&step.deletions.to_string()),
            Cell::new(&step.restorations.to_string()),
            Cell::new(&step.nodes_visited.to_string()),
            Cell::new(&step.backtracks.to_string()),
            Cell::new(&step.propagation_micros.to_string()),
            Cell::new(&step.search_micros.to_string()),
        ]));
    }

    table.to_string()
}
