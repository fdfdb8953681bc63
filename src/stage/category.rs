//! Closed categorical vocabularies for the passenger table.
//!
//! Every variant carries an explicit display label, and every raw value goes
//! through an exhaustive lookup: a category value we have never seen fails at
//! parse time instead of rendering as a blank node box.

use anyhow::bail;

/// Ticket class. Raw column value is 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pclass {
    First,
    Second,
    Third,
}

impl Pclass {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "1" => Self::First,
            "2" => Self::Second,
            "3" => Self::Third,
            other => bail!("unrecognized Pclass value: {:?}", other),
        })
    }

    /// Stage-qualified label so the raw value 1 cannot collide with the
    /// Survived column's raw 1.
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "Pclass1",
            Self::Second => "Pclass2",
            Self::Third => "Pclass3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "male" => Self::Male,
            "female" => Self::Female,
            other => bail!("unrecognized Sex value: {:?}", other),
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Survival outcome. Raw column value is 0 (died) or 1 (survived).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Died,
    Survived,
}

impl Outcome {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "0" => Self::Died,
            "1" => Self::Survived,
            other => bail!("unrecognized Survived value: {:?}", other),
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Died => "Died",
            Self::Survived => "Survived",
        }
    }
}

/// Age group derived from the optional Age column.
///
/// Bins are half-open on the left: (0,1] (1,12] (12,18] (18,65] (65,999].
/// A missing or out-of-range age maps to Unknown, never to an error, so
/// every record lands in exactly one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    Infants,
    Children,
    Adolescents,
    Adults,
    Senior,
    Unknown,
}

impl AgeGroup {
    pub fn from_age(age: Option<f64>) -> Self {
        match age {
            Some(a) if a > 0.0 && a <= 1.0 => Self::Infants,
            Some(a) if a > 1.0 && a <= 12.0 => Self::Children,
            Some(a) if a > 12.0 && a <= 18.0 => Self::Adolescents,
            Some(a) if a > 18.0 && a <= 65.0 => Self::Adults,
            Some(a) if a > 65.0 && a <= 999.0 => Self::Senior,
            // None, non-positive, > 999, and NaN all end up here.
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Infants => "Infants",
            Self::Children => "Children",
            Self::Adolescents => "Adolescents",
            Self::Adults => "Adults",
            Self::Senior => "Senior",
            Self::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn age_bins_are_half_open_on_the_left() {
        assert_eq!(AgeGroup::from_age(Some(0.42)), AgeGroup::Infants);
        assert_eq!(AgeGroup::from_age(Some(1.0)), AgeGroup::Infants);
        assert_eq!(AgeGroup::from_age(Some(1.1)), AgeGroup::Children);
        assert_eq!(AgeGroup::from_age(Some(12.0)), AgeGroup::Children);
        assert_eq!(AgeGroup::from_age(Some(12.5)), AgeGroup::Adolescents);
        assert_eq!(AgeGroup::from_age(Some(18.0)), AgeGroup::Adolescents);
        assert_eq!(AgeGroup::from_age(Some(18.5)), AgeGroup::Adults);
        assert_eq!(AgeGroup::from_age(Some(65.0)), AgeGroup::Adults);
        assert_eq!(AgeGroup::from_age(Some(66.0)), AgeGroup::Senior);
        assert_eq!(AgeGroup::from_age(Some(999.0)), AgeGroup::Senior);
    }

    #[test]
    fn missing_and_out_of_range_ages_are_unknown() {
        assert_eq!(AgeGroup::from_age(None), AgeGroup::Unknown);
        assert_eq!(AgeGroup::from_age(Some(0.0)), AgeGroup::Unknown);
        assert_eq!(AgeGroup::from_age(Some(-1.0)), AgeGroup::Unknown);
        assert_eq!(AgeGroup::from_age(Some(1000.0)), AgeGroup::Unknown);
        assert_eq!(AgeGroup::from_age(Some(f64::NAN)), AgeGroup::Unknown);
    }

    #[test]
    fn closed_vocabularies_reject_new_values() {
        assert!(Pclass::parse("4").is_err());
        assert!(Sex::parse("Male").is_err());
        assert!(Outcome::parse("2").is_err());
    }

    #[test]
    fn labels_are_stage_qualified() {
        assert_eq!(Pclass::parse("1").unwrap().label(), "Pclass1");
        assert_eq!(Outcome::parse("1").unwrap().label(), "Survived");
        assert_eq!(Outcome::parse("0").unwrap().label(), "Died");
    }
}
