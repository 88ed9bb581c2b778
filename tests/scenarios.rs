use std::io::Cursor;

use pretty_assertions::assert_eq;

use dycsp::engine::domain::DomainStore;
use dycsp::engine::driver::TimeStepDriver;
use dycsp::engine::propagator::dnac4::DnAc4;
use dycsp::engine::propagator::dnac6::DnAc6;
use dycsp::engine::types::Value;
use dycsp::engine::driver::StepReport;
use dycsp::engine::Engine;
use dycsp::io::parser;

fn live_sorted(store: &DomainStore, var: u32) -> Vec<String> {
    let mut values: Vec<String> = store.live(var).iter().map(|v| v.to_string()).collect();
    values.sort();
    values
}

fn assignment_strings(report: &StepReport) -> Vec<String> {
    report
        .assignment
        .as_ref()
        .expect("expected a complete assignment")
        .iter()
        .map(|(v, value)| format!("{v}:{value}"))
        .collect()
}

fn reported_live(report: &StepReport, var: u32) -> Vec<String> {
    let (_, values) = report
        .live_domains
        .iter()
        .find(|(v, _)| *v == var)
        .expect("variable present in live_domains");
    values.iter().map(|v| v.to_string()).collect()
}

fn run_both(input: &str) -> ((TimeStepDriver, Vec<StepReport>), (TimeStepDriver, Vec<StepReport>)) {
    let instance4 = parser::parse("scenario", Cursor::new(input)).unwrap();
    let instance6 = parser::parse("scenario", Cursor::new(input)).unwrap();

    let domains4 = DomainStore::new(instance4.origin_domains.clone());
    let domains6 = DomainStore::new(instance6.origin_domains.clone());

    let mut driver4 = TimeStepDriver::new(Engine::new(domains4, Box::new(DnAc4::new())));
    let mut driver6 = TimeStepDriver::new(Engine::new(domains6, Box::new(DnAc6::new())));

    let reports4 = driver4.run(&instance4);
    let reports6 = driver6.run(&instance6);

    ((driver4, reports4), (driver6, reports6))
}

#[test]
fn scenario_1_add_equality_both_domains_unchanged() {
    let input = "2\n1 a b\n2 a b\nc 0 a 1 2 a a b b\n";
    let ((d4, r4), (d6, r6)) = run_both(input);

    for (d, r) in [(&d4, &r4), (&d6, &r6)] {
        assert_eq!(live_sorted(&d.engine.domains, 1), vec!["a", "b"]);
        assert_eq!(live_sorted(&d.engine.domains, 2), vec!["a", "b"]);
        assert_eq!(assignment_strings(&r[0]), vec!["1:a", "2:a"]);
    }
}

#[test]
fn scenario_2_add_single_pair_reduces_both_domains() {
    let input = "2\n1 a b\n2 a b\nc 0 a 1 2 a b\n";
    let ((d4, r4), (d6, r6)) = run_both(input);

    for (d, r) in [(&d4, &r4), (&d6, &r6)] {
        assert_eq!(live_sorted(&d.engine.domains, 1), vec!["a"]);
        assert_eq!(live_sorted(&d.engine.domains, 2), vec!["b"]);
        assert_eq!(assignment_strings(&r[0]), vec!["1:a", "2:b"]);
    }
}

#[test]
fn scenario_3_retraction_restores_domains_and_clears_justifications() {
    let input = "2\n1 a b\n2 a b\nc 0 a 1 2 a a\nc 1 r 1 2\n";
    let ((d4, _), (d6, _)) = run_both(input);

    for d in [&d4, &d6] {
        assert_eq!(live_sorted(&d.engine.domains, 1), vec!["a", "b"]);
        assert_eq!(live_sorted(&d.engine.domains, 2), vec!["a", "b"]);
        assert_eq!(d.engine.justification.blamer(1, &Value::from("a")), None);
        assert_eq!(d.engine.justification.blamer(1, &Value::from("b")), None);
        assert_eq!(d.engine.justification.blamer(2, &Value::from("a")), None);
        assert_eq!(d.engine.justification.blamer(2, &Value::from("b")), None);
    }
}

#[test]
fn scenario_4_three_variable_inequality_chain() {
    let input = "3\n1 r g b\n2 r g b\n3 r g b\n\
        c 0 a 1 2 r g r b g r g b b r b g\n\
        c 0 a 2 3 r g r b g r g b b r b g\n\
        c 0 a 1 3 r g r b g r g b b r b g\n";
    let ((d4, r4), (d6, r6)) = run_both(input);

    for (d, r) in [(&d4, &r4), (&d6, &r6)] {
        for var in 1..=3 {
            assert_eq!(live_sorted(&d.engine.domains, var), vec!["b", "g", "r"]);
        }
        assert_eq!(assignment_strings(&r[0]), vec!["1:r", "2:g", "3:b"]);
    }
}

#[test]
fn scenario_5_chain_retraction_preserves_domains() {
    let input = "3\n1 a b\n2 a b\n3 a b\n\
        c 0 a 1 2 a a b b\n\
        c 0 a 2 3 a b b a\n\
        c 1 r 1 2\n";
    let ((d4, r4), (d6, r6)) = run_both(input);

    for (d, r) in [(&d4, &r4), (&d6, &r6)] {
        for var in 1..=3 {
            assert_eq!(live_sorted(&d.engine.domains, var), vec!["a", "b"]);
        }
        assert_eq!(d.engine.justification.blamer(1, &Value::from("a")), None);
        assert_eq!(d.engine.justification.blamer(1, &Value::from("b")), None);
        assert_eq!(assignment_strings(&r[0]), vec!["1:a", "2:a", "3:b"]);
    }
}

#[test]
fn scenario_6_asymmetric_domains_justify_removal() {
    let input = "2\n1 a b\n2 a\nc 0 a 1 2 a a\n";
    let ((d4, _), (d6, _)) = run_both(input);

    for d in [&d4, &d6] {
        assert_eq!(live_sorted(&d.engine.domains, 1), vec!["a"]);
        assert_eq!(live_sorted(&d.engine.domains, 2), vec!["a"]);
        assert_eq!(d.engine.justification.blamer(1, &Value::from("b")), Some(2));
    }
}

/// Retracting `(1,2)` here restores `D(2)`'s pruned value, which still has
/// an active neighbor at `3`: the restoration must cascade across `(2,3)`,
/// re-justifying and restoring `D(3)`'s pruned value too. This is the path
/// DnAC-6's `on_retract` takes through a still-active neighbor (asymmetric
/// `S(owner,j,a)` update), not exercised by the other scenarios.
#[test]
fn scenario_7_retraction_cascades_through_active_neighbor() {
    let input = "3\n1 p q\n2 x y\n3 u v\n\
        c 0 a 1 2 p x\n\
        c 0 a 2 3 x u y v\n\
        c 1 r 1 2\n";
    let ((d4, r4), (d6, r6)) = run_both(input);

    for (d, r) in [(&d4, &r4), (&d6, &r6)] {
        // At t=0, before the retraction, the chain has pruned D(2) and D(3).
        assert_eq!(reported_live(&r[0], 1), vec!["p"]);
        assert_eq!(reported_live(&r[0], 2), vec!["x"]);
        assert_eq!(reported_live(&r[0], 3), vec!["u"]);

        // At t=1, retracting (1,2) restores D(1) and D(2), which cascades
        // through the still-active (2,3) arc to restore D(3) too.
        assert_eq!(live_sorted(&d.engine.domains, 1), vec!["p", "q"]);
        assert_eq!(live_sorted(&d.engine.domains, 2), vec!["x", "y"]);
        assert_eq!(live_sorted(&d.engine.domains, 3), vec!["u", "v"]);
        assert_eq!(d.engine.justification.blamer(1, &Value::from("q")), None);
        assert_eq!(d.engine.justification.blamer(2, &Value::from("y")), None);
        assert_eq!(d.engine.justification.blamer(3, &Value::from("v")), None);
    }
}
