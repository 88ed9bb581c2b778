use std::collections::HashMap;

use proptest::prelude::*;

use dycsp::engine::constraints::Relation;
use dycsp::engine::types::{Value, VariableId};

/// A small, randomly generated static CSP: origin domains plus a batch of
/// binary constraints to add at `t=0`. Used by the property tests of
/// §8 (P1, P2, P3, P4, P5, P6, P7).
#[derive(Clone, Debug)]
pub struct RandomCsp {
    pub n: VariableId,
    pub domains: HashMap<VariableId, Vec<Value>>,
    pub constraints: Vec<(VariableId, VariableId, Relation)>,
}

/// Every variable shares this 3-value origin domain, keeping each
/// constraint's allowed-pairs bitmask a fixed 9 bits regardless of which
/// pair it covers.
const ALPHABET: [&str; 3] = ["v0", "v1", "v2"];

fn all_pairs(n: VariableId) -> Vec<(VariableId, VariableId)> {
    let mut pairs = Vec::new();
    for i in 1..=n {
        for j in (i + 1)..=n {
            pairs.push((i, j));
        }
    }
    pairs
}

fn uniform_domains(n: VariableId) -> HashMap<VariableId, Vec<Value>> {
    (1..=n)
        .map(|v| (v, ALPHABET.iter().map(|t| Value::from(*t)).collect()))
        .collect()
}

fn relation_from_mask(domain_i: &[Value], domain_j: &[Value], mask: &[bool]) -> Relation {
    domain_i
        .iter()
        .flat_map(|a| domain_j.iter().map(move |b| (a.clone(), b.clone())))
        .zip(mask.iter().copied())
        .filter(|(_, keep)| *keep)
        .map(|(pair, _)| pair)
        .collect()
}

/// Generates `N ≤ 5` variables over a shared 3-value domain and up to 4
/// binary constraints over distinct unordered pairs, each with a random
/// (possibly empty or full) allowed-pairs relation.
pub fn small_csp() -> impl Strategy<Value = RandomCsp> {
    (2u32..=5).prop_flat_map(|n| {
        let pairs = all_pairs(n);
        let max_constraints = pairs.len().min(4);

        (0..=max_constraints).prop_flat_map(move |count| {
            let chosen: Vec<(VariableId, VariableId)> = pairs.iter().take(count).copied().collect();
            let masks = proptest::collection::vec(
                proptest::collection::vec(any::<bool>(), ALPHABET.len() * ALPHABET.len()),
                count,
            );

            masks.prop_map(move |masks| {
                let domains = uniform_domains(n);
                let constraints = chosen
                    .iter()
                    .zip(masks)
                    .map(|(&(i, j), mask)| {
                        let relation = relation_from_mask(&domains[&i], &domains[&j], &mask);
                        (i, j, relation)
                    })
                    .collect();
                RandomCsp {
                    n,
                    domains,
                    constraints,
                }
            })
        })
    })
}
