//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - affine approximation: `-` line
//! - exact probability: `o` (`*` where it sits on the line)
//! - optional simulated rates: `s`

use crate::domain::{SignalCurve, SimulationResult};

/// Render a curve, optionally overlaid with simulated rates.
pub fn render_curve_plot(
    curve: &SignalCurve,
    simulated: Option<&[SimulationResult]>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((n_min, n_max)) = n_range(curve) else {
        return "Plot: (not enough points)\n".to_string();
    };
    let sim = simulated.unwrap_or(&[]);
    let (p_min, p_max) = p_range(curve, sim).unwrap_or((0.0, 1.0));
    let (p_min, p_max) = pad_range(p_min, p_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Line first so points can overlay.
    let first = curve.approx.eval(n_min);
    let last = curve.approx.eval(n_max);
    draw_line(
        &mut grid,
        map_x(f64::from(n_min), n_min, n_max, width),
        map_y(first, p_min, p_max, height),
        map_x(f64::from(n_max), n_min, n_max, width),
        map_y(last, p_min, p_max, height),
        '-',
    );

    for s in sim {
        let x = map_x(f64::from(s.n), n_min, n_max, width);
        let y = map_y(s.rate, p_min, p_max, height);
        grid[y][x] = 's';
    }

    for r in &curve.rows {
        let x = map_x(f64::from(r.n), n_min, n_max, width);
        let y = map_y(r.exact, p_min, p_max, height);
        grid[y][x] = if grid[y][x] == '-' { '*' } else { 'o' };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: n=[{n_min}, {n_max}] | p=[{p_min:.3}, {p_max:.3}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn n_range(curve: &SignalCurve) -> Option<(u32, u32)> {
    let min = curve.rows.iter().map(|r| r.n).min()?;
    let max = curve.rows.iter().map(|r| r.n).max()?;
    (max > min).then_some((min, max))
}

fn p_range(curve: &SignalCurve, sim: &[SimulationResult]) -> Option<(f64, f64)> {
    let mut min_p = f64::INFINITY;
    let mut max_p = f64::NEG_INFINITY;

    for r in &curve.rows {
        for v in [r.exact, r.approx] {
            min_p = min_p.min(v);
            max_p = max_p.max(v);
        }
    }
    for s in sim {
        min_p = min_p.min(s.rate);
        max_p = max_p.max(s.rate);
    }

    if min_p.is_finite() && max_p.is_finite() && max_p > min_p {
        Some((min_p, max_p))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(n: f64, n_min: u32, n_max: u32, width: usize) -> usize {
    let (lo, hi) = (f64::from(n_min), f64::from(n_max));
    let u = ((n - lo) / (hi - lo)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(p: f64, p_min: f64, p_max: f64, height: usize) -> usize {
    let u = ((p - p_min) / (p_max - p_min)).clamp(0.0, 1.0);
    // p=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
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
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
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
