use serde::{Deserialize, Deserializer};
use std::io::Read;

/// A data row of the six-column export layout. The score column is ignored
/// and only `Root Cause` is required.
#[derive(Debug, Deserialize)]
pub(crate) struct CandidateRow {
    #[serde(rename = "Root Cause")]
    pub(crate) name: String,
    #[serde(rename = "Likelihood", default, deserialize_with = "empty_string_as_none")]
    pub(crate) likelihood: Option<String>,
    #[serde(rename = "Impact", default, deserialize_with = "empty_string_as_none")]
    pub(crate) impact: Option<String>,
    #[serde(
        rename = "Controllability",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) controllability: Option<String>,
    #[serde(rename = "Notes", default)]
    pub(crate) notes: String,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CandidateRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    csv_reader
        .deserialize::<CandidateRow>()
        .collect::<Result<Vec<_>, _>>()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
