use crate::domain::entities::ProjectRecord;
use crate::domain::services::StatusNormalizer;

const COLUMN_SEPARATOR: char = '|';
const HEADER_PREFIX: &str = "PROJECT";
const SUMMARY_PREFIX: &str = "Summary";

/// Parses sanitized `<script> show` output into records, in row order.
///
/// ```text
/// PROJECT | STATUS     | PORTS
/// web     | Up 2 hours | 80:80
/// api     | Exited (1) |
/// Summary: 2 total
/// ```
///
/// Lines without a separator are decoration and get skipped, as does the
/// header. Parsing stops at the summary line. Short rows are dropped rather
/// than treated as errors because the report format is not ours.
pub fn parse_table(text: &str) -> Vec<ProjectRecord> {
    let mut projects = Vec::new();

    for line in text.lines() {
        if !line.contains(COLUMN_SEPARATOR) {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.starts_with(HEADER_PREFIX) {
            continue;
        }
        if trimmed.starts_with(SUMMARY_PREFIX) {
            break;
        }

        if let Some(project) = parse_row(line) {
            projects.push(project);
        }
    }

    projects
}

fn parse_row(line: &str) -> Option<ProjectRecord> {
    let fields: Vec<&str> = line.split(COLUMN_SEPARATOR).collect();
    if fields.len() < 2 {
        return None;
    }

    let name = fields[0].trim().to_string();
    let status = StatusNormalizer::normalize(fields[1]);
    let ports = fields.get(2).map(|p| p.trim().to_string()).unwrap_or_default();

    Some(ProjectRecord::new(name, status).with_ports(ports))
}
