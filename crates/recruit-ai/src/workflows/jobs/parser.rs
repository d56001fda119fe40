use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::screening::NewJob;

#[derive(Debug)]
pub(crate) enum ParsedRow {
    Job(NewJob),
    MissingDescription { line: u64 },
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: JobDescriptionRow = record.deserialize(Some(&headers))?;
        rows.push(row.into_parsed(line));
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct JobDescriptionRow {
    #[serde(
        alias = "job_title",
        alias = "Job Title",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    title: Option<String>,
    #[serde(
        alias = "company_name",
        alias = "Company",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    company: Option<String>,
    #[serde(
        alias = "jd_text",
        alias = "Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
}

impl JobDescriptionRow {
    fn into_parsed(self, line: u64) -> ParsedRow {
        let Some(description) = self.description else {
            return ParsedRow::MissingDescription { line };
        };

        ParsedRow::Job(NewJob {
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            description,
            skills: split_skills(self.skills.as_deref()),
        })
    }
}

fn split_skills(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
