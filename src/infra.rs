use root_cause::workflows::rca::{ExportFormat, SortDirection, SortPolicy};

/// Where the `score` command sends its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Encoded(ExportFormat),
}

pub(crate) fn parse_direction(raw: &str) -> Result<SortDirection, String> {
    SortDirection::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not a sort direction (use desc or asc)"))
}

pub(crate) fn parse_policy(raw: &str) -> Result<SortPolicy, String> {
    SortPolicy::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not a sort policy (use confirm or allow)"))
}

pub(crate) fn parse_export_format(raw: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not an export format (use csv, md or json)"))
}

pub(crate) fn parse_output_format(raw: &str) -> Result<OutputFormat, String> {
    if raw.trim().eq_ignore_ascii_case("table") {
        return Ok(OutputFormat::Table);
    }
    ExportFormat::parse(raw)
        .map(OutputFormat::Encoded)
        .ok_or_else(|| format!("'{raw}' is not an output format (use table, csv, md or json)"))
}
