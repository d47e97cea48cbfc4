//! Dataset validation — presence and file extension.

use super::{format_list, sort_errors, ErrorKind, Field, ValidationError, ValidationReport};
use crate::spec::ToolSpec;
use std::collections::BTreeMap;
use std::path::is_separator;
use tracing::{debug, trace};

/// Validate dataset paths against the tool's declared data.
///
/// Every declared dataset must be present. When a dataset lists extensions,
/// the path's extension must match one of them, ignoring case; a missing
/// dataset has no extension and fails that rule too. Datasets the tool does
/// not declare are ignored.
pub fn validate_data(spec: &ToolSpec, datasets: &BTreeMap<String, String>) -> ValidationReport {
    let mut errors = Vec::new();

    for (name, data_spec) in &spec.data {
        let path = match datasets.get(name) {
            Some(path) => path.as_str(),
            None => {
                errors.push(ValidationError::new(
                    Field::Data,
                    name.as_str(),
                    ErrorKind::Required,
                    "not null",
                    "null",
                    format!("{name} is a required data entry but was not provided"),
                ));
                ""
            }
        };

        if data_spec.extensions.is_empty() {
            continue;
        }

        let allowed = data_spec.normalized_extensions();
        let actual = file_extension(path);
        if !allowed.contains(&actual) {
            let allowed = format_list(&allowed);
            errors.push(ValidationError::new(
                Field::Data,
                name.as_str(),
                ErrorKind::WrongType,
                format!("one of {allowed}"),
                actual,
                format!("data file {name} has an invalid extension, expected one of {allowed}"),
            ));
        }
    }

    let undeclared = datasets
        .keys()
        .filter(|name| !spec.data.contains_key(*name))
        .count();
    if undeclared > 0 {
        trace!(undeclared, "ignoring undeclared datasets");
    }

    sort_errors(&mut errors);
    debug!(tool = %spec.name, errors = errors.len(), "validated data");
    ValidationReport::from(errors)
}

/// Lowercased suffix of the final path component starting at its last dot,
/// or an empty string when there is none. Dotfiles such as `.csv` count as
/// the extension `.csv`.
fn file_extension(path: &str) -> String {
    let file_name = path.rsplit(is_separator).next().unwrap_or(path);
    file_name
        .rfind('.')
        .map(|dot| file_name[dot..].to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::DataSpec;
    use pretty_assertions::assert_eq;

    fn tool(extensions: &[&str]) -> ToolSpec {
        let mut spec = ToolSpec {
            name: "foobar".to_string(),
            ..Default::default()
        };
        spec.data.insert(
            "table".to_string(),
            DataSpec {
                path: "/in/table.csv".to_string(),
                extensions: extensions.iter().map(|e| e.to_string()).collect(),
                ..Default::default()
            },
        );
        spec
    }

    fn datasets(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("/in/x.CSV"), ".csv");
        assert_eq!(file_extension("/in/archive.tar.gz"), ".gz");
        assert_eq!(file_extension("/in/README"), "");
        assert_eq!(file_extension("/in.d/README"), "");
        assert_eq!(file_extension("/in/.csv"), ".csv");
        assert_eq!(file_extension("/in/trailing."), ".");
        assert_eq!(file_extension(""), "");
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let report = validate_data(&tool(&["csv"]), &datasets(&[("table", "x.CSV")]));
        assert!(report.is_valid());

        let report = validate_data(&tool(&[".CSV"]), &datasets(&[("table", "x.csv")]));
        assert!(report.is_valid());
    }

    #[test]
    fn test_extension_mismatch() {
        let report = validate_data(&tool(&["csv", "tsv"]), &datasets(&[("table", "x.txt")]));
        assert_eq!(report.len(), 1);
        let err = &report.errors()[0];
        assert_eq!(err.field, Field::Data);
        assert_eq!(err.name, "table");
        assert_eq!(err.kind, ErrorKind::WrongType);
        assert_eq!(err.expected, "one of [.csv, .tsv]");
        assert_eq!(err.actual, ".txt");
    }

    #[test]
    fn test_missing_extension_reports_empty_actual() {
        let report = validate_data(&tool(&["csv"]), &datasets(&[("table", "/in/table")]));
        assert_eq!(report.errors()[0].actual, "");
    }

    #[test]
    fn test_no_extensions_accepts_anything() {
        let report = validate_data(&tool(&[]), &datasets(&[("table", "/in/whatever.bin")]));
        assert!(report.is_valid());
    }

    #[test]
    fn test_dotfile_matches_extension() {
        let report = validate_data(&tool(&["csv"]), &datasets(&[("table", "/in/.CSV")]));
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors());
    }

    #[test]
    fn test_missing_dataset_also_fails_extension() {
        let report = validate_data(&tool(&["csv"]), &datasets(&[]));
        let summary: Vec<(&str, ErrorKind, &str)> = report
            .errors()
            .iter()
            .map(|e| (e.name.as_str(), e.kind, e.actual.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("table", ErrorKind::Required, "null"),
                ("table", ErrorKind::WrongType, ""),
            ]
        );
    }

    #[test]
    fn test_missing_dataset_without_extensions_is_required_only() {
        let report = validate_data(&tool(&[]), &datasets(&[]));
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors()[0].kind, ErrorKind::Required);
    }

    #[test]
    fn test_undeclared_datasets_ignored() {
        let report = validate_data(
            &tool(&["csv"]),
            &datasets(&[("table", "a.csv"), ("extra", "b.txt")]),
        );
        assert!(report.is_valid());
    }
}
