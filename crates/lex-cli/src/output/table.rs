const MIN_COLUMN: usize = 5;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned plain-text table. Cells are padded before they are
/// colored so escape codes never skew the alignment.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths = column_widths(headers, rows);
    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = join_cells(headers.iter().zip(&widths).map(|(header, width)| {
        pad(&clip(header, *width), *width, Align::Left)
    }));

    let divider = "-".repeat(header_line.chars().count());
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);

    for row in rows {
        let cells = widths.iter().enumerate().map(|(index, width)| {
            let value = clip(row.get(index).map_or("-", String::as_str), *width);
            let align = if is_numeric(&value) {
                Align::Right
            } else {
                Align::Left
            };
            let padded = pad(&value, *width, align);
            if options.color {
                paint(&value, padded)
            } else {
                padded
            }
        });
        lines.push(join_cells(cells).trim_end().to_string());
    }
    lines.join("\n")
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN])
                .max()
                .unwrap_or(MIN_COLUMN)
        })
        .collect()
}

/// Narrow the widest column one step at a time until the table fits or
/// every column is at its floor.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].chars().count().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        match widest {
            Some(index) => widths[index] -= 1,
            None => break,
        }
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped = value.chars().take(width.saturating_sub(1)).collect::<String>();
    clipped.push('…');
    clipped
}

fn pad(value: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{value:<width$}"),
        Align::Right => format!("{value:>width$}"),
    }
}

fn join_cells(cells: impl Iterator<Item = String>) -> String {
    cells.collect::<Vec<_>>().join(GAP)
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty()
        && value.parse::<f64>().is_ok()
        && value.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.'))
}

/// Green for settled states, yellow for in-progress ones, red for
/// risk and lapsed agreements.
fn paint(value: &str, padded: String) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "active" | "approved" | "low" | "true" => "32",
        "draft" | "review" | "medium" => "33",
        "expired" | "high" | "false" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["agr-1".into(), "Mutual NDA".into(), "12000".into()],
            vec!["agr-2".into(), "Master Services".into(), "250".into()],
        ]
    }

    #[test]
    fn numbers_align_right() {
        let out = render_entity_table(&["id", "title", "value"], &rows(), PLAIN);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].ends_with("12000"));
        assert!(lines[3].ends_with("  250"));
        assert!(lines[1].chars().all(|ch| ch == '-'));
    }

    #[test]
    fn narrow_terminal_clips_widest_column() {
        let options = TableOptions {
            max_width: Some(24),
            color: false,
        };
        let out = render_entity_table(&["id", "title", "value"], &rows(), options);
        assert!(out.contains('…'));
        assert!(out.lines().all(|line| line.chars().count() <= 24));
    }

    #[test]
    fn color_keeps_alignment() {
        let rows = vec![
            vec!["agr-1".into(), "draft".into()],
            vec!["agr-2".into(), "expired".into()],
        ];
        let options = TableOptions {
            max_width: None,
            color: true,
        };
        let out = render_entity_table(&["id", "status"], &rows, options);
        assert!(out.contains("\u{1b}[33mdraft  \u{1b}[0m"));
        assert!(out.contains("\u{1b}[31mexpired\u{1b}[0m"));
    }

    #[test]
    fn missing_cells_show_dash() {
        let out = render_entity_table(&["id", "title"], &[vec!["agr-1".into()]], PLAIN);
        assert!(out.lines().nth(2).is_some_and(|line| line.ends_with('-')));
    }
}
