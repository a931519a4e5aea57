//! Implementation of the `tp convert` command.
//!
//! Runs the full pipeline: load → normalize → filter → map → emit, writing
//! the converted CSV next to the input file unless `--output` is given.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use tp_core::{DateRange, ProjectMap, clockify, filter_entries, toggl};

use crate::Config;
use crate::cli::{ConvertArgs, TargetFormat};
use crate::commands::util::{load_entries, resolve_source, resolve_zone};

pub fn run(args: &ConvertArgs, config: &Config) -> Result<()> {
    let zone = resolve_zone(args.timezone.as_deref(), config)?;
    let Some(email) = args.email.clone().or_else(|| config.email.clone()) else {
        bail!(
            "--email is required when exporting to {} (pass --email or set `email` in the config file)",
            args.to
        );
    };

    let source = resolve_source(args.from, &args.input)?;
    let entries = load_entries(&args.input, source, &zone)?;
    let loaded = entries.len();

    let range = DateRange {
        from: args.from_date,
        to: args.to_date,
    };
    let mut entries = filter_entries(entries, &range, &zone);
    entries.sort_by_key(|entry| entry.start);

    if let Some(map) = load_project_map(args.projects.as_deref(), config) {
        for entry in &mut entries {
            if let Some(client) = map.client_for(&entry.project) {
                entry.client = client.to_string();
            }
        }
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input, args.to));
    let file = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let writer = BufWriter::new(file);
    match args.to {
        TargetFormat::Toggl => toggl::write_csv(writer, &entries, &email, &zone)?,
        TargetFormat::Clockify => clockify::write_csv(writer, &entries, &email, &zone)?,
    }

    println!(
        "Converted {} of {loaded} entries to {}",
        entries.len(),
        output.display()
    );
    if !range.is_unbounded() {
        println!(
            "Date range: {} to {}",
            range.from.map_or_else(|| "beginning".to_string(), |d| d.to_string()),
            range.to.map_or_else(|| "now".to_string(), |d| d.to_string())
        );
    }
    println!("Output timezone: {zone}");
    Ok(())
}

/// Loads the project map from the flag or config, if any.
///
/// A missing or unreadable projects file is a warning, not an error: client
/// names simply stay blank.
fn load_project_map(flag: Option<&Path>, config: &Config) -> Option<ProjectMap> {
    let path = flag
        .map(Path::to_path_buf)
        .or_else(|| config.projects_file.clone())?;

    match ProjectMap::load(&path) {
        Ok(map) => {
            tracing::debug!(mappings = map.len(), "loaded project map");
            Some(map)
        }
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "failed to load projects file, client names may be blank"
            );
            None
        }
    }
}

/// Default output path: `<input stem>_<target>.csv` next to the input.
fn default_output(input: &Path, target: TargetFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("export");
    input.with_file_name(format!("{stem}_{target}.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_derives_from_input() {
        assert_eq!(
            default_output(Path::new("data/jiffy.json"), TargetFormat::Toggl),
            PathBuf::from("data/jiffy_toggl.csv")
        );
        assert_eq!(
            default_output(Path::new("entries.csv"), TargetFormat::Clockify),
            PathBuf::from("entries_clockify.csv")
        );
    }

    #[test]
    fn test_missing_projects_file_is_not_fatal() {
        let config = Config {
            timezone: "UTC".to_string(),
            email: None,
            projects_file: None,
        };
        assert!(load_project_map(Some(Path::new("/nonexistent.json")), &config).is_none());
        assert!(load_project_map(None, &config).is_none());
    }
}
