//! Helpers shared by the convert and inspect commands.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};

use tp_core::jiffy::JiffyExport;
use tp_core::{TimeEntry, ZoneSpec, toggl};

use crate::Config;
use crate::cli::SourceFormat;

/// Resolves the output timezone from the flag or the config default.
pub fn resolve_zone(flag: Option<&str>, config: &Config) -> Result<ZoneSpec> {
    let name = flag.unwrap_or(&config.timezone);
    name.parse()
        .with_context(|| format!("invalid output timezone: {name}"))
}

/// Resolves the source format from the flag or the input file extension.
pub fn resolve_source(flag: Option<SourceFormat>, input: &Path) -> Result<SourceFormat> {
    if let Some(source) = flag {
        return Ok(source);
    }
    match input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(SourceFormat::Jiffy),
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(SourceFormat::Toggl),
        _ => bail!(
            "cannot infer source format of {}; pass --from jiffy or --from toggl",
            input.display()
        ),
    }
}

/// Loads canonical entries from an export file.
pub fn load_entries(path: &Path, source: SourceFormat, zone: &ZoneSpec) -> Result<Vec<TimeEntry>> {
    let file =
        File::open(path).with_context(|| format!("failed to open input file {}", path.display()))?;
    let reader = BufReader::new(file);

    let entries = match source {
        SourceFormat::Jiffy => JiffyExport::from_reader(reader)
            .with_context(|| format!("failed to parse {}", path.display()))?
            .entries(),
        SourceFormat::Toggl => toggl::read_csv(reader, zone)
            .with_context(|| format!("failed to parse {}", path.display()))?,
    };
    tracing::debug!(count = entries.len(), "loaded entries");
    Ok(entries)
}
