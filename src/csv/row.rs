use crate::stage::{Outcome, Pclass, Sex};

/// One passenger row, trimmed to the columns the aggregator needs.
#[derive(Debug, Clone)]
pub struct Record {
    pub class: Pclass,
    pub sex: Sex,
    /// Age in years; absent for passengers with no recorded age.
    pub age: Option<f64>,
    pub outcome: Outcome,
}
