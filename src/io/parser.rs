use std::collections::HashMap;
use std::io::BufRead;

use crate::engine::{
    constraints::Relation,
    driver::{ProblemInstance, ScheduledEdit},
    types::Value,
};
use crate::error::{DyCspError, Result};

/// Interns atomic tokens into shared `Arc<str>` handles so equal tokens
/// share one allocation, per the "intern once at parse time" design note.
#[derive(Default)]
struct Interner {
    seen: HashMap<String, Value>,
}

impl Interner {
    fn intern(&mut self, token: &str) -> Value {
        if let Some(v) = self.seen.get(token) {
            return v.clone();
        }
        let value = Value::from(token);
        self.seen.insert(token.to_string(), value.clone());
        value
    }
}

/// Parses the line-oriented input file format of §6 into a
/// [`ProblemInstance`].
pub fn parse(path: &str, reader: impl BufRead) -> Result<ProblemInstance> {
    let mut interner = Interner::default();
    let mut n: Option<u32> = None;
    let mut origin_domains: HashMap<u32, Vec<Value>> = HashMap::new();
    let mut edits: std::collections::BTreeMap<u32, Vec<ScheduledEdit>> = Default::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(DyCspError::from)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if n.is_none() {
            n = Some(parse_int(path, line_no, line)?);
            continue;
        }
        let n = n.unwrap();

        let fields: Vec<&str> = line.split_whitespace().collect();
        let first = fields[0];

        if first.chars().all(|c| c.is_ascii_digit()) {
            let var = parse_int(path, line_no, first)?;
            check_variable_range(path, line_no, n, var)?;
            let values: Vec<Value> = fields[1..].iter().map(|t| interner.intern(t)).collect();
            origin_domains.insert(var, values);
        } else {
            let (t, scheduled) = parse_constraint_line(path, line_no, &fields, &mut interner)?;
            for v in edit_variables(&scheduled) {
                check_variable_range(path, line_no, n, v)?;
            }
            edits.entry(t).or_default().push(scheduled);
        }
    }

    let n = n.ok_or_else(|| DyCspError::InputParse {
        path: path.to_string(),
        line: 0,
        message: "empty input file".to_string(),
    })?;

    for i in 1..=n {
        if !origin_domains.contains_key(&i) {
            return Err(DyCspError::UnknownVariable {
                path: path.to_string(),
                line: 0,
                variable: i,
            }
            .into());
        }
    }

    Ok(ProblemInstance {
        n,
        origin_domains,
        edits,
    })
}

/// Rejects any `i`/`j` outside `1..=n`, per §7's "`i` or `j` outside `1..N`"
/// `UnknownVariable` case.
fn check_variable_range(path: &str, line_no: usize, n: u32, var: u32) -> Result<()> {
    if var < 1 || var > n {
        return Err(DyCspError::UnknownVariable {
            path: path.to_string(),
            line: line_no,
            variable: var,
        }
        .into());
    }
    Ok(())
}

fn edit_variables(edit: &ScheduledEdit) -> Vec<u32> {
    match edit {
        ScheduledEdit::Add { i, j, .. } => vec![*i, *j],
        ScheduledEdit::Retract { i, j } => vec![*i, *j],
    }
}

fn parse_constraint_line(
    path: &str,
    line_no: usize,
    fields: &[&str],
    interner: &mut Interner,
) -> Result<(u32, ScheduledEdit)> {
    if fields.len() < 5 {
        return Err(DyCspError::InputParse {
            path: path.to_string(),
            line: line_no,
            message: "constraint line needs at least tag, t, op, i, j".to_string(),
        }
        .into());
    }

    let t = parse_int(path, line_no, fields[1])?;
    let op = fields[2];
    let i = parse_int(path, line_no, fields[3])?;
    let j = parse_int(path, line_no, fields[4])?;

    match op {
        "r" => Ok((t, ScheduledEdit::Retract { i, j })),
        "a" => {
            let pair_tokens = &fields[5..];
            if pair_tokens.len() % 2 != 0 {
                return Err(DyCspError::InputParse {
                    path: path.to_string(),
                    line: line_no,
                    message: "odd number of tokens in allowed-pair list".to_string(),
                }
                .into());
            }
            let mut relation: Relation = im::HashSet::new();
            for pair in pair_tokens.chunks_exact(2) {
                let v = interner.intern(pair[0]);
                let w = interner.intern(pair[1]);
                relation.insert((v, w));
            }
            Ok((t, ScheduledEdit::Add { i, j, relation }))
        }
        other => Err(DyCspError::InputParse {
            path: path.to_string(),
            line: line_no,
            message: format!("unknown op '{other}', expected 'a' or 'r'"),
        }
        .into()),
    }
}

fn parse_int(path: &str, line_no: usize, token: &str) -> Result<u32> {
    token.parse::<u32>().map_err(|_| {
        DyCspError::InputParse {
            path: path.to_string(),
            line: line_no,
            message: format!("expected an integer, found '{token}'"),
        }
        .into()
    })
}
