//! Utility functions for rendering UI components

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// `M:SS` with zero-padded seconds, e.g. 125000 ms -> "2:05".
pub fn format_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Fractional minutes as shown in lazily loaded album track lists,
/// e.g. 230000 ms -> "3.83 minutes".
pub fn format_minutes(ms: u64) -> String {
    format!("{:.2} minutes", ms as f64 / 60_000.0)
}

/// Turn fetched lyrics markup into plain text: `<br>` variants become
/// newlines and runs of blank lines collapse to a single blank line.
pub fn normalize_lyrics(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find("<br") {
        text.push_str(&rest[..pos]);
        let after = &rest[pos + 3..];
        match after.find('>') {
            Some(end) if after[..end].chars().all(|c| c.is_whitespace() || c == '/') => {
                text.push('\n');
                rest = &after[end + 1..];
            }
            _ => {
                // not a break tag; keep the literal text
                text.push_str("<br");
                rest = after;
            }
        }
    }
    text.push_str(rest);

    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push("");
            }
        } else {
            lines.push(line);
        }
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

/// Human-readable release date; unparseable values pass through as-is.
pub fn release_date_label(raw: &str) -> String {
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(raw) {
        return datetime.format("%b %-d, %Y").to_string();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    raw.to_string()
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_pads_seconds() {
        assert_eq!(format_duration(125_000), "2:05");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59_999), "0:59");
        assert_eq!(format_duration(600_000), "10:00");
    }

    #[test]
    fn minutes_are_fractional() {
        assert_eq!(format_minutes(230_000), "3.83 minutes");
    }

    #[test]
    fn lyrics_break_tags_become_newlines() {
        assert_eq!(
            normalize_lyrics("line one<br>line two<br/>line three<br />line four"),
            "line one\nline two\nline three\nline four"
        );
    }

    #[test]
    fn lyrics_blank_runs_collapse() {
        assert_eq!(
            normalize_lyrics("verse one<br><br><br>  <br>verse two"),
            "verse one\n\nverse two"
        );
    }

    #[test]
    fn lyrics_without_markup_pass_through() {
        assert_eq!(normalize_lyrics("plain text"), "plain text");
        assert_eq!(normalize_lyrics("a <brand> name"), "a <brand> name");
    }

    #[test]
    fn release_dates_format_when_parseable() {
        assert_eq!(release_date_label("1976-10-11T00:00:00Z"), "Oct 11, 1976");
        assert_eq!(release_date_label("1976-10-11"), "Oct 11, 1976");
        assert_eq!(release_date_label("sometime in 1976"), "sometime in 1976");
    }

    #[test]
    fn truncation_appends_ellipsis() {
        assert_eq!(truncate_string("a very long name", 9), "a very...");
        assert_eq!(truncate_string("short", 9), "short");
    }
}
