use crate::validation::validate_directory_path;
use locsync::{Catalog, SyncReport, Synchronizer};

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory holding `<lang>.json` / `<lang>.default.json` sources.
    pub i18n: String,
    /// Platform resource root, e.g. `App_Resources/iOS`.
    pub resources: String,
    /// Print the whole report as JSON instead of one signal per line.
    pub json: bool,
}

/// Text printed to stdout for a finished pass.
pub fn render_report(report: &SyncReport, json: bool) -> Result<String, String> {
    if json {
        return serde_json::to_string_pretty(report)
            .map_err(|e| format!("Failed to serialize report JSON: {}", e));
    }
    Ok(report
        .signals()
        .iter()
        .map(|signal| signal.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn run_sync_command(opts: SyncOptions) -> Result<(), String> {
    validate_directory_path(&opts.i18n)?;
    validate_directory_path(&opts.resources)?;

    let catalog = Catalog::load_dir(&opts.i18n)
        .map_err(|e| format!("Failed to load translations from '{}': {}", opts.i18n, e))?;
    let report = Synchronizer::new(&opts.resources)
        .run(&catalog)
        .map_err(|e| format!("Failed to synchronize '{}': {}", opts.resources, e))?;

    let output = render_report(&report, opts.json)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
