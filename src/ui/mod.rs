//! Terminal rendering for search results and listings.
//!
//! Every listing goes through one parameterized card renderer,
//! [`render_cards`], which takes a card-formatting callback — the
//! canonical rendering interface the pager's caller feeds page views
//! into. The rest is table and status-line formatting.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::sync::OnceLock;

use crate::models::{PageView, Program, University, Work};

/// Default width when terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Get the current terminal width in characters.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Render a list of items as cards, one per item, using the given
/// card-formatting callback. Prints a placeholder when the list is empty.
pub fn render_cards<T>(heading: &str, items: &[T], card: impl Fn(&T) -> String) {
    if !heading.is_empty() {
        println!("{}", heading.bold());
    }
    if items.is_empty() {
        println!("No results found.");
        return;
    }
    for item in items {
        println!("{}", card(item));
    }
}

/// Format one work as a card: title, deduped authors and affiliations,
/// FWCI metric and date.
pub fn work_card(work: &Work) -> String {
    let width = terminal_width();
    let mut lines = Vec::new();

    lines.push(format!(
        "  {}",
        truncate_with_ellipsis(work.display_title(), width.saturating_sub(2)).bold()
    ));

    let authors = work.author_names();
    if !authors.is_empty() {
        lines.push(format!(
            "    {} {}",
            "Authors:".dimmed(),
            truncate_with_ellipsis(&authors.join(", "), width.saturating_sub(13))
        ));
    }

    let affiliations = work.affiliations();
    if !affiliations.is_empty() {
        lines.push(format!(
            "    {} {}",
            "Affiliations:".dimmed(),
            truncate_with_ellipsis(&affiliations.join(", "), width.saturating_sub(18))
        ));
    }

    let fwci = work
        .fwci
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "N/A".to_string());
    let date = work.publication_date.as_deref().unwrap_or("N/A");
    lines.push(format!(
        "    {} {}   {} {}",
        "FWCI:".dimmed(),
        fwci,
        "Published:".dimmed(),
        date
    ));

    lines.join("\n")
}

/// Render one page of search results with a pagination footer.
pub fn render_page(view: &PageView) {
    render_cards(
        &format!("Search results — page {}", view.page),
        &view.works,
        work_card,
    );
    println!("{}", page_footer(view));
}

/// Pagination footer line for a page view.
pub fn page_footer(view: &PageView) -> String {
    let prev = if view.has_previous {
        "[p]rev".to_string()
    } else {
        "prev ✗".dimmed().to_string()
    };
    let next = if view.has_next {
        "[n]ext".to_string()
    } else {
        "next ✗".dimmed().to_string()
    };
    format!("Page {} · {} · {} · [q]uit", view.page, prev, next)
}

/// Render the topic field catalog as a table.
pub fn render_fields(fields: &BTreeMap<String, String>) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "Field"]);
    for (id, name) in fields {
        table.add_row(vec![id.as_str(), name.as_str()]);
    }
    println!("{table}");
}

/// Render the PCSAS program list.
pub fn render_programs(programs: &[Program]) {
    render_cards("PCSAS accredited programs", programs, |program| {
        let mut lines = vec![format!("  {}", program.program_name.bold())];
        if let Some(website) = program.website.as_deref() {
            lines.push(format!("    {} {}", "Website:".dimmed(), website));
        }
        if let Some(outcomes) = program.student_outcomes_link.as_deref() {
            lines.push(format!("    {} {}", "Outcomes:".dimmed(), outcomes));
        }
        lines.join("\n")
    });
}

/// Render cross-search universities.
pub fn render_universities(universities: &[University]) {
    render_cards("Institutions", universities, |university| {
        let name = clean_university_name(&university.name);
        match university.website.as_deref() {
            Some(website) => format!("  {}  {}", name.bold(), website.dimmed()),
            None => format!("  {}", name.bold()),
        }
    });
}

/// Print a user-visible error line to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an informational status line.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

static PAREN_QUALIFIER: OnceLock<regex::Regex> = OnceLock::new();

/// Strip parenthetical qualifiers from a university name, e.g.
/// "State University (Dept. of Psychology)" → "State University".
pub fn clean_university_name(name: &str) -> String {
    let re = PAREN_QUALIFIER.get_or_init(|| {
        regex::Regex::new(r"\s*\([^)]*\)").expect("valid university-name regex")
    });
    re.replace_all(name, "").trim().to_string()
}

/// Truncate text to fit within `max_width` columns, unicode-aware,
/// appending an ellipsis if truncation occurred.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_c, w)) in char_widths.iter().enumerate() {
        if current_width + w > max_width.saturating_sub(3) {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    if end_idx == 0 {
        return "...".to_string();
    }

    let truncated: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", truncated)
}
