use std::borrow::Cow;
use std::fmt::Write as _;

/// Plain, left-aligned listing used for CLI summaries.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);

    let mut output = String::new();

    // Header
    let header_line = format_row(headers, &widths);
    let _ = writeln!(output, "{header_line}");

    // Separator
    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let separator_line = format_row(&separator_cells, &separator_widths);
    let _ = writeln!(output, "{separator_line}");

    // Rows
    for row in rows {
        let row_line = format_row(row, &widths);
        let _ = writeln!(output, "{row_line}");
    }

    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    let rendered = render_table(headers, rows);
    print!("{rendered}");
}

/// Boxed grid with every cell centered, one ruled line between rows.
pub fn render_grid(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);

    let mut output = String::new();
    let _ = writeln!(output, "{}", rule(&widths, '╒', '═', '╤', '╕'));
    let _ = writeln!(output, "{}", grid_row(headers, &widths));
    let _ = writeln!(output, "{}", rule(&widths, '╞', '═', '╪', '╡'));
    for (idx, row) in rows.iter().enumerate() {
        if idx > 0 {
            let _ = writeln!(output, "{}", rule(&widths, '├', '─', '┼', '┤'));
        }
        let _ = writeln!(output, "{}", grid_row(row, &widths));
    }
    let _ = write!(output, "{}", rule(&widths, '╘', '═', '╧', '╛'));
    output
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let column_count = headers.len();
    let mut widths = headers
        .iter()
        .map(|h| display_width(&sanitize_cell(h)))
        .collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(&sanitize_cell(cell)));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }
    widths
}

fn rule(widths: &[usize], left: char, fill: char, joint: char, right: char) -> String {
    let segments = widths
        .iter()
        .map(|w| fill.to_string().repeat(w + 2))
        .collect::<Vec<_>>();
    let mut line = String::new();
    line.push(left);
    line.push_str(&segments.join(&joint.to_string()));
    line.push(right);
    line
}

fn grid_row(values: &[String], widths: &[usize]) -> String {
    let cells = widths
        .iter()
        .enumerate()
        .map(|(idx, width)| {
            let value = values.get(idx).map(String::as_str).unwrap_or_default();
            let sanitized = sanitize_cell(value);
            let padding = width.saturating_sub(display_width(&sanitized));
            let left = padding / 2;
            let right = padding - left;
            format!(" {}{}{} ", " ".repeat(left), sanitized, " ".repeat(right))
        })
        .collect::<Vec<_>>();
    format!("│{}│", cells.join("│"))
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        if idx >= widths.len() {
            break;
        }
        let sanitized = sanitize_cell(value);
        let display = display_width(sanitized.as_ref());
        let mut cell = sanitized.into_owned();
        let padding = widths
            .get(idx)
            .copied()
            .unwrap_or_default()
            .saturating_sub(display);
        if padding > 0 {
            cell.push_str(&" ".repeat(padding));
        }
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // Skip ANSI escape sequence (e.g. \x1b[31m)
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        let mut sanitized = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '\n' | '\r' | '\t' => sanitized.push(' '),
                other => sanitized.push(other),
            }
        }
        Cow::Owned(sanitized)
    } else {
        Cow::Borrowed(value)
    }
}
