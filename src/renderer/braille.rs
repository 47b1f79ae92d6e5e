use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use super::Surface;
use crate::color::RgbColor;
use crate::geometry::Point;

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// A canvas for sub-character braille rendering.
///
/// Each terminal character cell maps to a 2x4 grid of braille dots. The
/// logical canvas is scaled uniformly to fit the dot grid and centered, so
/// angles survive the trip to the terminal undistorted. A cell takes the
/// color of the last dot drawn into it.
#[derive(Debug, Clone, PartialEq)]
pub struct BrailleCanvas {
    grid: Vec<bool>,
    cell_colors: Vec<Option<RgbColor>>,
    grid_w: usize,
    grid_h: usize,
    char_w: usize,
    char_h: usize,
    logical_w: f64,
    logical_h: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl BrailleCanvas {
    /// Create a braille canvas of `char_w` x `char_h` cells showing a
    /// `logical_w` x `logical_h` drawing.
    pub fn new(char_w: usize, char_h: usize, logical_w: f64, logical_h: f64) -> Self {
        let grid_w = char_w * 2;
        let grid_h = char_h * 4;
        let scale = if logical_w > 0.0 && logical_h > 0.0 {
            (grid_w as f64 / logical_w).min(grid_h as f64 / logical_h)
        } else {
            0.0
        };
        Self {
            grid: vec![false; grid_w * grid_h],
            cell_colors: vec![None; char_w * char_h],
            grid_w,
            grid_h,
            char_w,
            char_h,
            logical_w,
            logical_h,
            scale,
            offset_x: (grid_w as f64 - logical_w * scale) / 2.0,
            offset_y: (grid_h as f64 - logical_h * scale) / 2.0,
        }
    }

    /// Map a logical point to dot coordinates (may fall outside the grid).
    fn to_grid(&self, p: Point) -> (isize, isize) {
        let gx = (self.offset_x + p.x * self.scale).floor() as isize;
        let gy = (self.offset_y + p.y * self.scale).floor() as isize;
        // The far canvas edge lands one past the last dot
        (
            gx.min(self.grid_w as isize - 1),
            gy.min(self.grid_h as isize - 1),
        )
    }

    /// Set a single dot on the braille grid (bounds-checked).
    #[inline]
    pub fn set(&mut self, gx: isize, gy: isize, color: RgbColor) {
        if gx < 0 || gy < 0 || gx >= self.grid_w as isize || gy >= self.grid_h as isize {
            return;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        self.grid[gy * self.grid_w + gx] = true;
        self.cell_colors[(gy / 4) * self.char_w + gx / 2] = Some(color);
    }

    pub fn is_set(&self, gx: usize, gy: usize) -> bool {
        gx < self.grid_w && gy < self.grid_h && self.grid[gy * self.grid_w + gx]
    }

    /// Draw a line using Bresenham's algorithm.
    pub fn line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, color: RgbColor) {
        let mut x0 = x0;
        let mut y0 = y0;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: isize = if x0 < x1 { 1 } else { -1 };
        let sy: isize = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x0, y0, color);

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

    /// Encode braille grid to characters and write them into `buf` at `area`.
    /// Cells without dots are left untouched.
    pub fn render(&self, buf: &mut Buffer, area: Rect) {
        for cy in 0..self.char_h.min(area.height as usize) {
            for cx in 0..self.char_w.min(area.width as usize) {
                let mut braille: u8 = 0;

                for (dx, col) in DOT_MAP.iter().enumerate() {
                    for (dy, &bit) in col.iter().enumerate() {
                        if self.is_set(cx * 2 + dx, cy * 4 + dy) {
                            braille |= bit;
                        }
                    }
                }

                if braille == 0 {
                    continue;
                }
                let Some(color) = self.cell_colors[cy * self.char_w + cx] else {
                    continue;
                };
                let ch = char::from_u32(0x2800 + braille as u32).unwrap_or(' ');
                if let Some(cell) = buf.cell_mut((area.x + cx as u16, area.y + cy as u16)) {
                    cell.set_char(ch);
                    cell.set_fg(Color::Rgb(color.r, color.g, color.b));
                }
            }
        }
    }
}

impl Surface for BrailleCanvas {
    fn size(&self) -> (f64, f64) {
        (self.logical_w, self.logical_h)
    }

    /// Drop every dot. The terminal background shows through, so the color
    /// is not painted.
    fn clear(&mut self, _color: RgbColor) {
        self.grid.fill(false);
        self.cell_colors.fill(None);
    }

    // Dots are coarser than any configured stroke width
    fn stroke_line(&mut self, from: Point, to: Point, color: RgbColor, _width: f64) {
        let (x0, y0) = self.to_grid(from);
        let (x1, y1) = self.to_grid(to);
        self.line(x0, y0, x1, y1, color);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: RgbColor) {
        let (cx, cy) = self.to_grid(center);
        let r = (radius * self.scale).round().max(1.0);
        // Only dots on the grid are visited, however large the disc
        let clip = |c: isize, len: usize| {
            let lo = (c as f64 - r).max(0.0) as isize;
            let hi = (c as f64 + r).min(len as f64 - 1.0) as isize;
            lo..=hi
        };
        for gy in clip(cy, self.grid_h) {
            for gx in clip(cx, self.grid_w) {
                let (dx, dy) = ((gx - cx) as f64, (gy - cy) as f64);
                if dx * dx + dy * dy <= r * r {
                    self.set(gx, gy, color);
                }
            }
        }
    }
}
