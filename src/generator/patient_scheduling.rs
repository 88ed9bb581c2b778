use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::engine::types::{Value, VariableId};

/// One patient's scheduling requirements, ported from the module-level
/// `patients` list of `smallTest4Create.py`.
#[derive(Clone, Debug)]
pub struct PatientSpec {
    pub duration_minutes: i64,
    pub call_time: NaiveDateTime,
    pub due_date: NaiveDateTime,
}

/// Every knob the Python generator exposed as a module-level constant.
#[derive(Clone, Debug)]
pub struct GeneratorParams {
    pub machines: u32,
    pub patients: Vec<PatientSpec>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub min_interval_minutes: i64,
    pub max_interval_minutes: i64,
}

impl GeneratorParams {
    /// The four-patient, two-machine instance hardcoded at the bottom of
    /// `smallTest4Create.py`.
    pub fn sample() -> Self {
        let dttm = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
        Self {
            machines: 2,
            patients: vec![
                PatientSpec {
                    duration_minutes: 60,
                    call_time: dttm("2017-12-24 10:12"),
                    due_date: dttm("2018-01-01 10:30"),
                },
                PatientSpec {
                    duration_minutes: 60,
                    call_time: dttm("2017-12-24 11:31"),
                    due_date: dttm("2018-01-01 10:30"),
                },
                PatientSpec {
                    duration_minutes: 60,
                    call_time: dttm("2017-12-24 09:22"),
                    due_date: dttm("2018-01-01 10:30"),
                },
                PatientSpec {
                    duration_minutes: 30,
                    call_time: dttm("2017-12-24 12:15"),
                    due_date: dttm("2018-05-01 10:00"),
                },
            ],
            start_date: NaiveDate::parse_from_str("2017-12-24", "%Y-%m-%d").unwrap(),
            end_date: NaiveDate::parse_from_str("2017-12-26", "%Y-%m-%d").unwrap(),
            start_time: NaiveTime::parse_from_str("09:00", "%H:%M").unwrap(),
            end_time: NaiveTime::parse_from_str("17:00", "%H:%M").unwrap(),
            min_interval_minutes: 30,
            max_interval_minutes: 90,
        }
    }
}

/// A candidate `(machine, start, end)` scheduling slot. Every patient
/// shares the same pool of slots; constraints (not domains) encode each
/// patient's duration/call-time/due-date requirements, matching the Python
/// generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    pub machine: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    fn token(&self) -> String {
        format!(
            "m{}_{}_{}",
            self.machine,
            self.start.format("%Y%m%dT%H%M"),
            self.end.format("%Y%m%dT%H%M")
        )
    }
}

/// Builds the shared slot pool: every `(machine, start, end)` triple whose
/// duration is a multiple of `min_interval_minutes` between
/// `min_interval_minutes` and `max_interval_minutes`, within the scheduling
/// window.
fn generate_slots(params: &GeneratorParams) -> Vec<Slot> {
    let mut days = Vec::new();
    let mut day = params.start_date;
    while day <= params.end_date {
        days.push(day);
        day = day + Duration::days(1);
    }

    let mut times = Vec::new();
    let mut time = params.start_time;
    loop {
        times.push(time);
        let next = time + Duration::minutes(params.min_interval_minutes);
        if next < time || time >= params.end_time {
            break;
        }
        time = next;
    }

    let mut moments: Vec<NaiveDateTime> = Vec::new();
    for day in &days {
        for time in &times {
            moments.push(day.and_time(*time));
        }
    }

    let Some((last, rest)) = moments.split_last() else {
        return Vec::new();
    };
    let last = *last;

    let mut slots = Vec::new();
    for machine in 1..=params.machines {
        for start in rest {
            let mut span = params.min_interval_minutes;
            while span <= params.max_interval_minutes {
                let end = *start + Duration::minutes(span);
                if end <= last {
                    slots.push(Slot {
                        machine,
                        start: *start,
                        end,
                    });
                }
                span += params.min_interval_minutes;
            }
        }
    }
    slots
}

/// Two slots conflict if they name the same machine and their time ranges
/// overlap; slots on different machines never conflict.
fn overlaps(a: &Slot, b: &Slot) -> bool {
    if a.machine != b.machine {
        return false;
    }
    let latest_start = a.start.max(b.start);
    let earliest_end = a.end.min(b.end);
    earliest_end > latest_start
}

fn satisfies(spec: &PatientSpec, slot: &Slot) -> bool {
    let duration = (slot.end - slot.start).num_minutes().abs();
    duration >= spec.duration_minutes && slot.start > spec.call_time && slot.end < spec.due_date
}

/// Emits the §6 input-file text for a patient-scheduling instance: one
/// variable per patient, every patient sharing the slot pool as its origin
/// domain, and one binary "no conflicting slot" constraint per patient
/// pair, all scheduled at `t=0`.
pub fn generate(params: &GeneratorParams) -> String {
    let slots = generate_slots(params);
    let n = params.patients.len() as VariableId;

    let mut out = String::new();
    out.push_str(&n.to_string());
    out.push('\n');

    let domain_tokens: Vec<String> = slots.iter().map(Slot::token).collect();
    for p in 1..=n {
        out.push_str(&p.to_string());
        for token in &domain_tokens {
            out.push(' ');
            out.push_str(token);
        }
        out.push('\n');
    }

    for i in 1..=n {
        for j in (i + 1)..=n {
            let spec_i = &params.patients[(i - 1) as usize];
            let spec_j = &params.patients[(j - 1) as usize];
            let mut line = format!("c 0 a {i} {j}");
            let mut any = false;
            for slot_i in &slots {
                if !satisfies(spec_i, slot_i) {
                    continue;
                }
                for slot_j in &slots {
                    if std::ptr::eq(slot_i, slot_j) {
                        continue;
                    }
                    if !satisfies(spec_j, slot_j) || overlaps(slot_i, slot_j) {
                        continue;
                    }
                    line.push(' ');
                    line.push_str(&slot_i.token());
                    line.push(' ');
                    line.push_str(&slot_j.token());
                    any = true;
                }
            }
            if any {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }

    out
}

/// Convenience wrapper returning interned [`Value`] domain tokens, for
/// feeding the generator straight into `engine::domain::DomainStore`
/// without a round trip through the text format (used by benchmarks).
pub fn slot_values(params: &GeneratorParams) -> Vec<Value> {
    generate_slots(params)
        .iter()
        .map(|slot| Value::from(slot.token().as_str()))
        .collect()
}
