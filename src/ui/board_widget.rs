use crate::game::{Cell, Grid};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const CELL_WIDTH: usize = 3;

/// Glyph and color for one cell.
pub fn cell_style(cell: Cell) -> (&'static str, Color) {
    match cell {
        Cell::Empty => (" . ", Color::DarkGray),
        Cell::PlayerOne => (" \u{25cf} ", Color::Red),
        Cell::PlayerTwo => (" \u{25cf} ", Color::Yellow),
    }
}

/// Lines drawing the grid inside a frame, with column numbers above and the
/// selection marker below.
pub fn board_lines(grid: &Grid, selected_column: Option<usize>) -> Vec<Line<'static>> {
    let columns = grid.column_count();
    let inner = "\u{2550}".repeat(columns * CELL_WIDTH + 1);
    let selected = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::with_capacity(grid.row_count() + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..columns {
        let label = format!("{:^width$}", col + 1, width = CELL_WIDTH);
        if Some(col) == selected_column {
            col_line.push(Span::styled(label, selected));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  \u{2554}{inner}\u{2557}")));

    for row in 0..grid.row_count() {
        let mut row_spans = vec![Span::raw("  \u{2551}")];
        for col in 0..columns {
            let (symbol, color) = cell_style(grid.cell_at(row, col));
            row_spans.push(Span::styled(symbol, Style::default().fg(color)));
        }
        row_spans.push(Span::raw(" \u{2551}"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  \u{255a}{inner}\u{255d}")));

    if let Some(selected_column) = selected_column {
        let mut indicator_line = vec![Span::raw("   ")];
        for col in 0..columns {
            if col == selected_column {
                indicator_line.push(Span::styled(" \u{25b2} ", Style::default().fg(Color::Cyan)));
            } else {
                indicator_line.push(Span::raw("   "));
            }
        }
        indicator_line.push(Span::raw("  "));
        lines.push(Line::from(indicator_line));
    }

    lines
}
