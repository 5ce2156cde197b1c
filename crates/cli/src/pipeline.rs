//! Lookup-and-annotate run: read names, resolve each one in order, write the
//! table, then restyle it in place.

use std::fs;
use std::path::{Path, PathBuf};

use smilefetch_config::Settings;
use smilefetch_core::{ReportRow, SummaryCounts};
use smilefetch_io::input::read_compound_names;
use smilefetch_io::report::{self, AnnotateOptions};
use smilefetch_io::styles::Palette;

use crate::pubchem::Resolver;
use crate::CliError;

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub output: PathBuf,
    pub counts: SummaryCounts,
    /// Search links written for unresolved names
    pub hyperlinks: usize,
}

/// Styling options derived from settings. Fails before any lookup is made if
/// the palette is unusable.
pub fn annotate_options(settings: &Settings) -> Result<AnnotateOptions, CliError> {
    let (compound_found, substance_found, not_found) =
        settings.report.fill.rgb().map_err(CliError::config)?;

    Ok(AnnotateOptions {
        query_url: settings.lookup.query_url.clone(),
        encoding: settings.lookup.percent_encoding,
        palette: Palette {
            compound_found,
            substance_found,
            not_found,
        },
    })
}

/// Resolve every name in input order. One row per name, blank names included.
pub fn resolve_all(names: &[Option<String>], resolver: &dyn Resolver, quiet: bool) -> Vec<ReportRow> {
    let total = names.len();
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let result = resolver.resolve(name.as_deref().unwrap_or(""));
            if !quiet {
                eprintln!(
                    "[{}/{}] {}: {}",
                    i + 1,
                    total,
                    name.as_deref().unwrap_or("<blank>"),
                    result.status,
                );
            }
            ReportRow::new(name.clone(), result)
        })
        .collect()
}

/// Run the whole pipeline for `input`. Row-level lookup failures are folded
/// into "not found"; only input, settings and output failures return `Err`.
pub fn run(
    input: &Path,
    resolver: &dyn Resolver,
    settings: &Settings,
    quiet: bool,
) -> Result<RunReport, CliError> {
    let options = annotate_options(settings)?;
    let output = report::output_path_for(input, &settings.report.output_prefix)
        .map_err(|e| CliError::args(e).with_hint("pass the path of a spreadsheet file"))?;

    let names = read_compound_names(input)
        .map_err(|e| CliError::input(format!("Error reading the Excel file: {}", e)))?;
    tracing::info!(rows = names.len(), input = %input.display(), "resolving compound names");

    let rows = resolve_all(&names, resolver, quiet);

    let save_err = |e: String| CliError::output(format!("Error saving the processed file: {}", e));
    if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| save_err(e.to_string()))?;
    }
    report::write_table(&output, &rows).map_err(save_err)?;
    let annotated = report::annotate(&output, &options).map_err(save_err)?;

    Ok(RunReport {
        output,
        counts: annotated.counts,
        hyperlinks: annotated.hyperlinks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use smilefetch_core::{EntityKind, LookupResult, LookupStatus};
    use std::cell::RefCell;

    /// Answers from a fixed table and records every name it was asked for.
    struct TableResolver {
        calls: RefCell<Vec<String>>,
    }

    impl TableResolver {
        fn new() -> Self {
            Self { calls: RefCell::new(Vec::new()) }
        }
    }

    impl Resolver for TableResolver {
        fn resolve(&self, name: &str) -> LookupResult {
            self.calls.borrow_mut().push(name.to_string());
            match name {
                "aspirin" => LookupResult::found(EntityKind::Compound, 2244, "CC(=O)OC1=CC=CC=C1C(=O)O".into()),
                "resin" => LookupResult::found(EntityKind::Substance, 5, "C".into()),
                _ => LookupResult::not_found(),
            }
        }
    }

    #[test]
    fn test_resolve_all_keeps_order_and_count() {
        let names = vec![
            Some("resin".to_string()),
            None,
            Some("aspirin".to_string()),
            Some("unknownium".to_string()),
        ];
        let resolver = TableResolver::new();
        let rows = resolve_all(&names, &resolver, true);

        assert_eq!(rows.len(), names.len());
        let statuses: Vec<_> = rows.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [
                LookupStatus::SubstanceFound,
                LookupStatus::NotFound,
                LookupStatus::CompoundFound,
                LookupStatus::NotFound,
            ]
        );
        assert_eq!(rows[1].name, None);
        assert_eq!(rows[2].identifier, Some(2244));
        assert_eq!(*resolver.calls.borrow(), ["resin", "", "aspirin", "unknownium"]);
    }

    #[test]
    fn test_annotate_options_from_settings() {
        let mut settings = Settings::default();
        settings.report.fill.not_found = "#123456".into();
        let options = annotate_options(&settings).unwrap();
        assert_eq!(options.palette.not_found, 0x123456);
        assert_eq!(options.query_url, settings.lookup.query_url);
    }

    #[test]
    fn test_bad_palette_fails_before_reading_input() {
        let mut settings = Settings::default();
        settings.report.fill.compound_found = "green".into();
        let resolver = TableResolver::new();

        let err = run(Path::new("/nonexistent/names.xlsx"), &resolver, &settings, true).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_CONFIG);
        assert!(resolver.calls.borrow().is_empty());
    }

    #[test]
    fn test_missing_input_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TableResolver::new();

        let err = run(&dir.path().join("names.xlsx"), &resolver, &Settings::default(), true).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_INPUT_READ);
        assert!(err.message.starts_with("Error reading the Excel file:"), "{}", err.message);
        assert!(!dir.path().join("processed_names.xlsx").exists());
    }
}
