use crate::csv::row::Record;
use crate::stage::{Outcome, Pclass, Sex};
use anyhow::{Context, anyhow, bail};
use std::fs;

/// Parse a passenger CSV file into records.
pub fn parse_csv_file(path: &str) -> anyhow::Result<Vec<Record>> {
    let text = fs::read_to_string(path).with_context(|| format!("read csv file {}", path))?;
    parse_records(&text).with_context(|| format!("parse csv file {}", path))
}

/// Parse CSV text into passenger records.
///
/// The header row locates the Pclass/Sex/Age/Survived columns by name; every
/// other column (Name, Ticket, ...) is ignored. Missing-data policy:
/// - empty Age cell -> `age: None` (binned as Unknown later)
/// - empty Pclass/Sex/Survived cell -> row skipped with a stderr warning
/// - non-empty but unrecognized value in a closed column -> error
pub fn parse_records(text: &str) -> anyhow::Result<Vec<Record>> {
    let mut lines = text.lines().enumerate();

    let header = match lines.next() {
        Some((_, line)) => split_fields(line),
        None => bail!("csv input is empty"),
    };
    let class_col = find_column(&header, "Pclass")?;
    let sex_col = find_column(&header, "Sex")?;
    let age_col = find_column(&header, "Age")?;
    let outcome_col = find_column(&header, "Survived")?;

    let mut out = Vec::new();
    for (lineno, line) in lines {
        let lno = lineno + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line);
        let class = field(&fields, class_col);
        let sex = field(&fields, sex_col);
        let age = field(&fields, age_col);
        let outcome = field(&fields, outcome_col);

        // A row missing a required raw field is excluded, not fatal. Age is
        // the one optional column.
        if class.is_empty() || sex.is_empty() || outcome.is_empty() {
            eprintln!("WARN: skipping row {}: empty required field", lno);
            continue;
        }

        let age = if age.is_empty() {
            None
        } else {
            Some(
                age.parse::<f64>()
                    .with_context(|| format!("bad Age at line {}: {:?}", lno, age))?,
            )
        };

        out.push(Record {
            class: Pclass::parse(class).with_context(|| format!("at line {}", lno))?,
            sex: Sex::parse(sex).with_context(|| format!("at line {}", lno))?,
            age,
            outcome: Outcome::parse(outcome).with_context(|| format!("at line {}", lno))?,
        });
    }

    Ok(out)
}

fn find_column(header: &[String], name: &str) -> anyhow::Result<usize> {
    header
        .iter()
        .position(|c| c.trim() == name)
        .ok_or_else(|| anyhow!("csv header is missing required column {:?}", name))
}

fn field<'a>(fields: &'a [String], idx: usize) -> &'a str {
    fields.get(idx).map(|s| s.trim()).unwrap_or("")
}

/// Split one CSV line into fields, honoring double-quoted fields with
/// embedded commas and doubled quotes (the Name column has both).
fn split_fields(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // Doubled quote inside a quoted field is a literal quote.
                if chars.peek() == Some(&'"') {
                    cur.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    fields.push(cur);
    fields
}
