use std::fmt::{Display, Write};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use gallery_core::{CardView, DetailView, GalleryViewModel};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn render(view: &GalleryViewModel) -> String {
    let mut out = String::new();

    let albums = view
        .albums
        .iter()
        .map(|entry| {
            let marker = if entry.active { "*" } else { "" };
            format!("{marker}{} ({})", entry.label, entry.count)
        })
        .collect::<Vec<_>>()
        .join("  ");
    if view.search.is_empty() {
        let _ = writeln!(out, "Albums: {albums}");
    } else {
        let _ = writeln!(out, "Albums matching {:?}: {albums}", view.search);
    }

    match &view.empty_message {
        Some(message) => {
            let _ = writeln!(out, "  {message}");
        }
        None => {
            for card in &view.cards {
                let _ = writeln!(out, "{}", card_line(card));
            }
        }
    }

    let _ = writeln!(out, "{}", status_line(view));

    if let Some(detail) = &view.detail {
        out.push_str(&detail_block(detail));
    }
    out
}

fn card_line(card: &CardView) -> String {
    let when = fmt_when(&card.created_at);
    let mut line = format!("{:>4}. [{}] {}", card.index + 1, card.album, card.caption);
    if !when.is_empty() {
        let _ = write!(line, "  ({when})");
    }
    line
}

fn status_line(view: &GalleryViewModel) -> String {
    let state = if view.loading {
        "loading..."
    } else if view.reached_end {
        "end of gallery"
    } else {
        "press enter for more"
    };
    format!(
        "-- showing {} of {} ({}) | {state}",
        view.cards.len(),
        view.total_items,
        view.active_album
    )
}

fn detail_block(detail: &DetailView) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "== {} ==", detail.public_id);
    let _ = writeln!(block, "{}", detail.url);
    let _ = writeln!(block, "{}", detail.prompt);
    let _ = writeln!(block, "{} • {}", detail.album, fmt_when(&detail.created_at));
    block
}

/// Formats a server timestamp in local time, e.g. `May 01, 2024 • 10:00`.
pub fn fmt_when(raw: &str) -> String {
    fmt_when_in(raw, &Local)
}

/// Empty input stays empty and unparsable input is shown verbatim. Naive
/// timestamps are taken as UTC.
pub fn fmt_when_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(tz))
        .ok()
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|naive| naive.and_utc().with_timezone(tz))
        });

    match parsed {
        Some(dt) => dt.format("%b %d, %Y • %H:%M").to_string(),
        None => raw.to_string(),
    }
}
