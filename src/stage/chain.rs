//! The configurable stage chain.
//!
//! A stage is one categorical dimension of a record. Adjacent stages in the
//! configured chain define one aggregation pass each, so the chain needs at
//! least two entries. The original analysis used class -> sex -> age group ->
//! outcome, but the order is configuration, not code.

use crate::csv::Record;
use crate::stage::AgeGroup;
use anyhow::bail;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Class,
    Sex,
    AgeGroup,
    Outcome,
}

impl Stage {
    /// Display label of this record at this stage. Labels are stage-qualified
    /// strings, so equal labels always mean the same node.
    pub fn label(self, record: &Record) -> &'static str {
        match self {
            Self::Class => record.class.label(),
            Self::Sex => record.sex.label(),
            Self::AgeGroup => AgeGroup::from_age(record.age).label(),
            Self::Outcome => record.outcome.label(),
        }
    }
}

impl FromStr for Stage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s.trim() {
            "class" => Self::Class,
            "sex" => Self::Sex,
            "age-group" => Self::AgeGroup,
            "outcome" => Self::Outcome,
            other => bail!(
                "unrecognized stage name: {:?} (expected class, sex, age-group or outcome)",
                other
            ),
        })
    }
}

/// Parse a comma-separated stage chain, e.g. "class,sex,age-group,outcome".
pub fn parse_stage_list(s: &str) -> anyhow::Result<Vec<Stage>> {
    let stages: Vec<Stage> = s
        .split(',')
        .map(str::parse)
        .collect::<anyhow::Result<_>>()?;

    if stages.len() < 2 {
        bail!(
            "stage chain needs at least two stages to form a flow, got {}",
            stages.len()
        );
    }
    Ok(stages)
}
