#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table of string rows.
///
/// Columns shrink from the widest down to their header width when
/// `max_width` is set; truncated cells end in `…`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false, 0))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.trim_end().chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let numeric = looks_numeric(&truncated);
                let visible = truncated.chars().count();
                let cell = if options.color {
                    colorize_status(&truncated)
                } else {
                    truncated
                };
                format_cell(&cell, *width, numeric, visible)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = vec![header_line.trim_end().to_string(), divider];
    lines.extend(row_lines);
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(6))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

/// Pad `value` to `width`; `visible` is its length without escape codes
/// (0 means measure `value` directly).
fn format_cell(value: &str, width: usize, numeric: bool, visible: usize) -> String {
    let len = if visible == 0 {
        value.chars().count()
    } else {
        visible
    };
    let pad = " ".repeat(width.saturating_sub(len));
    if numeric {
        format!("{pad}{value}")
    } else {
        format!("{value}{pad}")
    }
}

/// ANSI colour code for a status or verdict word, if it has one.
#[must_use]
pub fn status_color(value: &str) -> Option<&'static str> {
    match value {
        "found" | "valid" => Some("32"),
        "mismatch" | "missing DOI" | "lookup error" => Some("33"),
        "not found" | "invalid DOI" => Some("31"),
        _ => None,
    }
}

/// Wrap a status word in its colour; other text is returned unchanged.
#[must_use]
pub fn colorize_status(value: &str) -> String {
    match status_color(value) {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}
