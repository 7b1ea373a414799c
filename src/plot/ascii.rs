//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each combined-table column gets its own glyph, drawn in column order, so
//! earlier series win where lines overlap.

use crate::dashboard::CombinedTable;

const GLYPHS: [char; 6] = ['*', '+', 'x', 'o', '#', '%'];

/// Render the combined table as a multi-series line chart (x = year, y = % of baseline).
pub fn render_combined_ascii(table: &CombinedTable, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((year_min, year_max)) = table.year_range() else {
        return "Plot: no data\n".to_string();
    };
    let (x_min, x_max) = widen(year_min as f64, year_max as f64, 0.5);

    let series: Vec<Vec<(f64, f64)>> = table
        .columns
        .iter()
        .map(|id| {
            table
                .column(*id)
                .into_iter()
                .map(|(year, pct)| (year as f64, pct))
                .collect()
        })
        .collect();

    let (y_min, y_max) = y_range(&series).unwrap_or((0.0, 200.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for (idx, points) in series.iter().enumerate() {
        draw_series(&mut grid, points, glyph(idx), (x_min, x_max), (y_min, y_max));
    }

    // Build final string. We include a small header with ranges and a legend.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: years=[{year_min}, {year_max}] | pct=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let legend: Vec<String> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, id)| format!("{} {}", glyph(idx), id.display_name()))
        .collect();
    out.push_str(&format!("Legend: {}\n", legend.join("  ")));

    out
}

fn glyph(idx: usize) -> char {
    GLYPHS[idx % GLYPHS.len()]
}

fn widen(min: f64, max: f64, half: f64) -> (f64, f64) {
    if max > min { (min, max) } else { (min - half, max + half) }
}

fn y_range(series: &[Vec<(f64, f64)>]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in series.iter().flatten() {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    Some(widen(min_y, max_y, 1.0))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(grid: &mut [Vec<char>], points: &[(f64, f64)], ch: char, x: (f64, f64), y: (f64, f64)) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(px, py) in points {
        let col = map_x(px, x.0, x.1, width);
        let row = map_y(py, y.0, y.1, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else if grid[row][col] == ' ' {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
