//! Implementation of the `tp inspect` command.
//!
//! Prints summary statistics for an export plus the most recent entries in
//! range, without writing anything.

use anyhow::Result;
use chrono::Duration;

use tp_core::{DateRange, EntryStatus, TimeEntry, ZoneSpec, duration, filter_entries};

use crate::Config;
use crate::cli::InspectArgs;
use crate::commands::util::{load_entries, resolve_source, resolve_zone};

pub fn run(args: &InspectArgs, config: &Config) -> Result<()> {
    let zone = resolve_zone(args.timezone.as_deref(), config)?;
    let source = resolve_source(args.from, &args.input)?;
    let entries = load_entries(&args.input, source, &zone)?;

    print_summary(&entries, &zone);

    let range = DateRange {
        from: args.from_date,
        to: args.to_date,
    };
    let visible = filter_entries(entries, &range, &zone);
    if range.is_unbounded() {
        println!("\nLast {} active entries:", args.examples.min(visible.len()));
    } else {
        println!(
            "\n{} active entries in range, showing last {}:",
            visible.len(),
            args.examples.min(visible.len())
        );
    }

    let skip = visible.len().saturating_sub(args.examples);
    for entry in &visible[skip..] {
        print_entry(entry, &zone);
    }
    Ok(())
}

fn print_summary(entries: &[TimeEntry], zone: &ZoneSpec) {
    let active = entries
        .iter()
        .filter(|e| e.status == EntryStatus::Active)
        .count();
    let deleted = entries.len() - active;
    let open = entries.iter().filter(|e| e.is_open()).count();

    println!(
        "Entries: {} ({active} active, {deleted} deleted, {open} running)",
        entries.len()
    );

    let starts = entries.iter().map(|e| e.start);
    if let (Some(first), Some(last)) = (starts.clone().min(), starts.max()) {
        println!(
            "Date range: {} to {}",
            zone.to_local(first).date(),
            zone.to_local(last).date()
        );
    }

    let tracked = entries
        .iter()
        .filter(|e| e.status == EntryStatus::Active)
        .filter_map(TimeEntry::duration)
        .fold(Duration::zero(), |acc, d| acc + d);
    println!(
        "Tracked time: {} hours",
        duration::format_decimal_hours(tracked)
    );

    let mut projects: Vec<&str> = entries
        .iter()
        .filter(|e| !e.project.is_empty())
        .map(|e| e.project.as_str())
        .collect();
    projects.sort_unstable();
    projects.dedup();
    println!("Projects: {}", projects.len());
}

fn print_entry(entry: &TimeEntry, zone: &ZoneSpec) {
    println!();
    println!("  Project:     {}", placeholder(&entry.project));
    if !entry.client.is_empty() {
        println!("  Client:      {}", entry.client);
    }
    println!("  Description: {}", placeholder(&entry.description));
    println!(
        "  Start:       {} ({zone})",
        zone.to_local(entry.start).format("%Y-%m-%d %H:%M:%S")
    );
    match entry.end {
        Some(end) => println!(
            "  Stop:        {} ({zone})",
            zone.to_local(end).format("%Y-%m-%d %H:%M:%S")
        ),
        None => println!("  Stop:        (running)"),
    }
    if let Some(elapsed) = entry.duration() {
        println!("  Duration:    {}", duration::format_hms(elapsed));
    }
    if !entry.tags.is_empty() {
        println!("  Tags:        {}", entry.tags.join(", "));
    }
}

fn placeholder(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_replaces_empty() {
        assert_eq!(placeholder(""), "-");
        assert_eq!(placeholder("Acme"), "Acme");
    }
}
