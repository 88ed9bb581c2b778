use std::io::Write;

use crate::engine::driver::{ProblemInstance, StepReport};
use crate::engine::stats::EngineStats;
use crate::error::Result;

/// Writes the human-readable report of §6: a header of parameters followed
/// by one block per time step with the edits applied, the post-propagation
/// live domains, and the assignment (or a "no assignment" notice).
///
/// Formatting is unspecified beyond "one fact per line"; this mirrors the
/// host crate's preference for plain, grep-able text over a structured
/// serialization format.
pub fn write_report(
    mut out: impl Write,
    algorithm: &str,
    instance: &ProblemInstance,
    steps: &[StepReport],
) -> Result<()> {
    writeln!(out, "dycsp report")?;
    writeln!(out, "algorithm: {algorithm}")?;
    writeln!(out, "variables: {}", instance.n)?;

    let mut variables: Vec<_> = instance.origin_domains.keys().copied().collect();
    variables.sort_unstable();
    for v in variables {
        let mut values: Vec<String> = instance.origin_domains[&v]
            .iter()
            .map(|value| value.to_string())
            .collect();
        values.sort();
        writeln!(out, "domain {v}: {}", values.join(", "))?;
    }

    for step in steps {
        writeln!(out)?;
        writeln!(out, "t={}", step.t)?;
        for edit in &step.applied {
            match &edit.warning {
                Some(warning) => writeln!(out, "  edit: {} ({warning})", edit.description)?,
                None => writeln!(out, "  edit: {}", edit.description)?,
            }
        }
        for (v, values) in &step.live_domains {
            let rendered: Vec<String> = values.iter().map(|value| value.to_string()).collect();
            writeln!(out, "  D({v}) = {{{}}}", rendered.join(", "))?;
        }
        match &step.assignment {
            Some(assignment) => {
                let rendered: Vec<String> = assignment
                    .iter()
                    .map(|(v, value)| format!("{v}: {value}"))
                    .collect();
                writeln!(out, "  assignment: ({})", rendered.join(", "))?;
            }
            None => writeln!(out, "  no assignment found")?,
        }
    }

    Ok(())
}

/// Appends the `--stats` table after the main report, if requested.
pub fn write_stats(mut out: impl Write, stats: &EngineStats) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", crate::engine::stats::render_stats_table(stats))?;
    Ok(())
}
