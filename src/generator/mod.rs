pub mod patient_scheduling;
