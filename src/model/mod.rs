//! Aggregation model: fold passenger records into counted stage-to-stage flows.

use crate::Result;
use crate::csv::Record;
use crate::stage::Stage;
use anyhow::bail;
use indexmap::IndexMap;
use serde::Serialize;

/// One ribbon of the diagram: a counted transition between two node indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsView {
    pub records: usize,
    pub nodes: usize,
    pub links: usize,
    pub passes: usize,
}

/// Everything the renderer needs: node labels in index order, links as
/// integer-index triples, plus summary totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowData {
    pub title: String,
    pub labels: Vec<String>,
    pub links: Vec<FlowLink>,
    pub totals: TotalsView,
}

/// Aggregate records over each adjacent stage pair of the configured chain.
///
/// Each pair groups the full record set by (source label, target label) and
/// counts group sizes; passes are concatenated in chain order, groups in
/// first-seen record order. Node indices are then assigned in first-seen
/// order over the link list, source before target within each link, so two
/// stages that render the same display string share one node.
///
/// Pure function: same records + same chain always yields the same output.
/// Note there is no in/out conservation at a node; a middle stage takes part
/// in two independent passes.
pub fn aggregate(records: &[Record], stages: &[Stage], title: &str) -> Result<FlowData> {
    if stages.len() < 2 {
        bail!(
            "need at least two stages to form a flow, got {}",
            stages.len()
        );
    }

    // Pass 1..n-1: group and count per adjacent stage pair.
    let mut labeled: Vec<(&'static str, &'static str, u64)> = Vec::new();
    for pair in stages.windows(2) {
        let mut groups: IndexMap<(&'static str, &'static str), u64> = IndexMap::new();
        for record in records {
            let key = (pair[0].label(record), pair[1].label(record));
            *groups.entry(key).or_insert(0) += 1;
        }
        labeled.extend(groups.into_iter().map(|((s, t), n)| (s, t, n)));
    }

    // First-seen node index assignment over the concatenated link list.
    let mut index: IndexMap<&'static str, usize> = IndexMap::new();
    for &(source, target, _) in &labeled {
        let next = index.len();
        index.entry(source).or_insert(next);
        let next = index.len();
        index.entry(target).or_insert(next);
    }

    let links: Vec<FlowLink> = labeled
        .iter()
        .map(|&(source, target, value)| FlowLink {
            source: index[&source],
            target: index[&target],
            value,
        })
        .collect();
    let labels: Vec<String> = index.keys().map(|s| s.to_string()).collect();

    Ok(FlowData {
        title: title.to_string(),
        totals: TotalsView {
            records: records.len(),
            nodes: labels.len(),
            links: links.len(),
            passes: stages.len() - 1,
        },
        labels,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Outcome, Pclass, Sex};
    use pretty_assertions::assert_eq;

    fn rec(class: Pclass, sex: Sex, age: Option<f64>, outcome: Outcome) -> Record {
        Record {
            class,
            sex,
            age,
            outcome,
        }
    }

    fn link(source: usize, target: usize, value: u64) -> FlowLink {
        FlowLink {
            source,
            target,
            value,
        }
    }

    #[test]
    fn groups_one_pass_in_first_seen_order() {
        let records = vec![
            rec(Pclass::First, Sex::Female, Some(5.0), Outcome::Survived),
            rec(Pclass::First, Sex::Female, Some(30.0), Outcome::Died),
        ];
        let data = aggregate(&records, &[Stage::Class, Stage::AgeGroup], "t").unwrap();

        assert_eq!(data.labels, vec!["Pclass1", "Children", "Adults"]);
        assert_eq!(data.links, vec![link(0, 1, 1), link(0, 2, 1)]);
    }

    #[test]
    fn identical_groups_merge_into_one_counted_link() {
        let records = vec![
            rec(Pclass::Third, Sex::Male, Some(22.0), Outcome::Died),
            rec(Pclass::Third, Sex::Male, Some(40.0), Outcome::Died),
        ];
        let data = aggregate(&records, &[Stage::Class, Stage::Sex], "t").unwrap();

        assert_eq!(data.links, vec![link(0, 1, 2)]);
    }

    #[test]
    fn middle_stage_collapses_to_one_node_across_passes() {
        let records = vec![rec(Pclass::First, Sex::Male, None, Outcome::Survived)];
        let data = aggregate(&records, &[Stage::Class, Stage::Sex, Stage::Outcome], "t").unwrap();

        assert_eq!(data.labels, vec!["Pclass1", "male", "Survived"]);
        assert_eq!(data.links, vec![link(0, 1, 1), link(1, 2, 1)]);
    }

    #[test]
    fn labels_are_unique_and_indices_in_range() {
        let records = mixed_records();
        let stages = [Stage::Class, Stage::Sex, Stage::AgeGroup, Stage::Outcome];
        let data = aggregate(&records, &stages, "t").unwrap();

        let mut seen = data.labels.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), data.labels.len());

        for l in &data.links {
            assert!(l.source < data.labels.len());
            assert!(l.target < data.labels.len());
        }
    }

    #[test]
    fn every_pass_accounts_for_every_record() {
        let records = mixed_records();
        let stages = [Stage::Class, Stage::Sex, Stage::AgeGroup, Stage::Outcome];
        let data = aggregate(&records, &stages, "t").unwrap();

        // Each record contributes to exactly one group per pass.
        let total: u64 = data.links.iter().map(|l| l.value).sum();
        assert_eq!(total, (records.len() * data.totals.passes) as u64);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let records = mixed_records();
        let stages = [Stage::Class, Stage::AgeGroup, Stage::Sex, Stage::Outcome];
        let first = aggregate(&records, &stages, "t").unwrap();
        let second = aggregate(&records, &stages, "t").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_chains_shorter_than_two() {
        assert!(aggregate(&[], &[Stage::Class], "t").is_err());
        assert!(aggregate(&[], &[], "t").is_err());
    }

    #[test]
    fn empty_input_yields_an_empty_diagram() {
        let data = aggregate(&[], &[Stage::Class, Stage::Sex], "t").unwrap();
        assert_eq!(data.labels, Vec::<String>::new());
        assert_eq!(data.links, vec![]);
        assert_eq!(data.totals.records, 0);
    }

    fn mixed_records() -> Vec<Record> {
        vec![
            rec(Pclass::First, Sex::Female, Some(0.9), Outcome::Survived),
            rec(Pclass::First, Sex::Male, Some(35.0), Outcome::Died),
            rec(Pclass::Second, Sex::Female, Some(16.0), Outcome::Survived),
            rec(Pclass::Second, Sex::Male, None, Outcome::Died),
            rec(Pclass::Third, Sex::Male, Some(70.0), Outcome::Died),
            rec(Pclass::Third, Sex::Female, Some(8.0), Outcome::Survived),
            rec(Pclass::Third, Sex::Male, Some(35.0), Outcome::Died),
        ]
    }
}
