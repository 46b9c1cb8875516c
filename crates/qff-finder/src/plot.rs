//! Bar chart of the most frequent outcomes, encoded as PNG.
//!
//! Rendering is done on a plain RGB canvas with a 3x5 bitmap font covering
//! digits and the capitals the captions need; bars are labelled with their
//! count on top and their bitstring below, written vertically like rotated
//! tick labels.

use crate::error::{FinderError, FinderResult};
use crate::report::StateCount;

/// File name offered for the downloaded chart.
pub const HISTOGRAM_FILENAME: &str = "top10_histogram.png";

/// Caption drawn across the top margin.
pub const TITLE: &str = "TOP 10 MOST PROBABLE STATES";

const X_CAPTION: &str = "STATE";
const Y_CAPTION: &str = "COUNT";

/// Image width in pixels.
pub const WIDTH: u32 = 900;
/// Image height in pixels.
pub const HEIGHT: u32 = 560;

const MARGIN_LEFT: u32 = 70;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 40;
const MARGIN_BOTTOM: u32 = 150;
const GRID_LINES: u32 = 4;
const FONT_SCALE: u32 = 2;

type Rgb = [u8; 3];

const BACKGROUND: Rgb = [0xff, 0xff, 0xff];
const BAR: Rgb = [0x64, 0x8f, 0xff];
const AXIS: Rgb = [0x33, 0x33, 0x33];
const GRID: Rgb = [0xdd, 0xdd, 0xdd];
const TEXT: Rgb = [0x22, 0x22, 0x22];

const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

/// Rows of a 3x5 glyph, most significant of the low three bits leftmost.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ' ' => [0b000; 5],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        _ => return None,
    };
    Some(rows)
}

struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, background: Rgb) -> Self {
        let pixels = background
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y.min(self.height)..y_end {
            for px in x.min(self.width)..x_end {
                let at = ((py * self.width + px) * 3) as usize;
                self.pixels[at..at + 3].copy_from_slice(&color);
            }
        }
    }

    fn draw_glyph(&mut self, c: char, x: u32, y: u32, scale: u32, color: Rgb) {
        let Some(rows) = glyph(c) else {
            return;
        };
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_W {
                if (bits >> (GLYPH_W - 1 - col)) & 1 == 1 {
                    self.fill_rect(
                        x + col * scale,
                        y + row as u32 * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }

    /// Left to right, top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: u32, y: u32, scale: u32, color: Rgb) {
        for (i, c) in text.chars().enumerate() {
            self.draw_glyph(c, x + i as u32 * (GLYPH_W + 1) * scale, y, scale, color);
        }
    }

    /// Top to bottom, first character at `(x, y)`.
    fn draw_text_vertical(&mut self, text: &str, x: u32, y: u32, scale: u32, color: Rgb) {
        for (i, c) in text.chars().enumerate() {
            self.draw_glyph(c, x, y + i as u32 * (GLYPH_H + 1) * scale, scale, color);
        }
    }

    fn encode(&self) -> FinderResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
            writer.finish()?;
        }
        Ok(buf)
    }
}

fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    (n * (GLYPH_W + 1)).saturating_sub(1) * scale
}

fn text_height(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    (n * (GLYPH_H + 1)).saturating_sub(1) * scale
}

/// Render `entries` as a bar chart and encode it as PNG.
///
/// Bars appear in the given order; pass the output of
/// [`top_k`](crate::report::top_k) for the ranked chart.
pub fn render_histogram_png(entries: &[StateCount]) -> FinderResult<Vec<u8>> {
    if entries.is_empty() {
        return Err(FinderError::EmptyCounts);
    }

    let mut canvas = Canvas::new(WIDTH, HEIGHT, BACKGROUND);

    let plot_left = MARGIN_LEFT;
    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let baseline = HEIGHT - MARGIN_BOTTOM;
    let plot_height = baseline - plot_top;

    let max_count = entries.iter().map(|e| e.count).max().unwrap_or(1).max(1);
    let scale_y = |value: u64| (value as f64 / max_count as f64 * plot_height as f64).round() as u32;

    // Grid and y-axis labels
    for k in 1..=GRID_LINES {
        let value = (max_count as f64 * f64::from(k) / f64::from(GRID_LINES)).round() as u64;
        let y = baseline - scale_y(value);
        canvas.fill_rect(plot_left, y, plot_width, 1, GRID);

        let label = value.to_string();
        let lx = plot_left.saturating_sub(text_width(&label, FONT_SCALE) + 8);
        let ly = y.saturating_sub(GLYPH_H * FONT_SCALE / 2);
        canvas.draw_text(&label, lx, ly, FONT_SCALE, TEXT);
    }

    // Bars
    let slot = plot_width / entries.len() as u32;
    let bar_width = (slot * 3 / 5).max(1);
    for (i, entry) in entries.iter().enumerate() {
        let slot_left = plot_left + i as u32 * slot;
        let center = slot_left + slot / 2;
        let height = scale_y(entry.count);
        let top = baseline - height;

        canvas.fill_rect(center - bar_width / 2, top, bar_width, height, BAR);

        let label = entry.count.to_string();
        let lx = center.saturating_sub(text_width(&label, FONT_SCALE) / 2);
        let ly = top.saturating_sub(GLYPH_H * FONT_SCALE + 4);
        canvas.draw_text(&label, lx, ly, FONT_SCALE, TEXT);

        let sx = center.saturating_sub(GLYPH_W * FONT_SCALE / 2);
        canvas.draw_text_vertical(&entry.state, sx, baseline + 8, FONT_SCALE, TEXT);
    }

    // Axes
    canvas.fill_rect(plot_left, plot_top, 2, plot_height + 2, AXIS);
    canvas.fill_rect(plot_left, baseline, plot_width, 2, AXIS);

    // Captions; the title sits above the count labels of the tallest bar
    let tx = (WIDTH - text_width(TITLE, FONT_SCALE)) / 2;
    canvas.draw_text(TITLE, tx, 4, FONT_SCALE, TEXT);

    let xx = plot_left + plot_width.saturating_sub(text_width(X_CAPTION, FONT_SCALE)) / 2;
    canvas.draw_text(X_CAPTION, xx, HEIGHT - (GLYPH_H * FONT_SCALE + 4), FONT_SCALE, TEXT);

    let y_caption_height = text_height(Y_CAPTION, FONT_SCALE);
    let yy = plot_top + plot_height.saturating_sub(y_caption_height) / 2;
    canvas.draw_text_vertical(Y_CAPTION, 8, yy, FONT_SCALE, TEXT);

    canvas.encode()
}
