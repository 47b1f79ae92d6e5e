//! Single-pass renderer for a vector set
//!
//! [`draw`] issues clear / line / disc primitives against a [`Surface`].
//! Two surfaces exist: the owned RGBA [`Canvas`] used for PNG output and the
//! terminal [`braille::BrailleCanvas`]. Both take coordinates in the logical
//! canvas space the vector set was resolved in.

pub mod braille;
pub mod export;

use crate::color::RgbColor;
use crate::config::StyleConfig;
use crate::generator::VectorSet;
use crate::geometry::Point;

/// Drawing primitives a render target must provide.
pub trait Surface {
    /// Logical size in canvas pixels.
    fn size(&self) -> (f64, f64);

    fn clear(&mut self, color: RgbColor);

    fn stroke_line(&mut self, from: Point, to: Point, color: RgbColor, width: f64);

    fn fill_circle(&mut self, center: Point, radius: f64, color: RgbColor);
}

/// Render `set` onto `surface`: axes through the origin, one segment per
/// vector, then a marker on the origin and on every endpoint.
///
/// The surface is cleared first, so repeated calls with the same set leave
/// identical output.
pub fn draw(surface: &mut impl Surface, set: &VectorSet, style: &StyleConfig) {
    let (width, height) = surface.size();
    let origin = set.origin();

    surface.clear(style.background);

    // Axes
    surface.stroke_line(
        Point::new(0.0, origin.y),
        Point::new(width, origin.y),
        style.axis_color,
        style.axis_width,
    );
    surface.stroke_line(
        Point::new(origin.x, 0.0),
        Point::new(origin.x, height),
        style.axis_color,
        style.axis_width,
    );

    for point in set.points() {
        surface.stroke_line(origin, point, style.vector_color, style.vector_width);
    }

    surface.fill_circle(origin, style.point_radius, style.point_color);
    for point in set.points() {
        surface.fill_circle(point, style.point_radius, style.point_color);
    }
}

/// Owned RGBA pixel buffer.
///
/// Internal format is 4 bytes per pixel in **RGBA** order, always opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
        }
    }

    /// Write an opaque pixel at (x, y). Out-of-range writes are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, color: RgbColor) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        self.data[idx] = color.r;
        self.data[idx + 1] = color.g;
        self.data[idx + 2] = color.b;
        self.data[idx + 3] = 255;
    }

    /// Read the RGBA values at (x, y).
    #[cfg(test)]
    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let idx = (y * self.width + x) * 4;
        if x < self.width && idx + 3 < self.data.len() {
            (self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3])
        } else {
            (0, 0, 0, 0)
        }
    }

    /// Pixel index range covering `[lo, hi]` along an axis of `len` pixels.
    fn span(lo: f64, hi: f64, len: usize) -> std::ops::Range<usize> {
        let start = lo.floor().max(0.0) as usize;
        let end = (hi.ceil().max(0.0) as usize).min(len);
        start..end.max(start)
    }

    /// Paint every pixel whose center satisfies `inside`, within a bounding box.
    fn fill_where(
        &mut self,
        min: Point,
        max: Point,
        color: RgbColor,
        inside: impl Fn(Point) -> bool,
    ) {
        for y in Self::span(min.y, max.y, self.height) {
            for x in Self::span(min.x, max.x, self.width) {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if inside(center) {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn clear(&mut self, color: RgbColor) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: RgbColor, width: f64) {
        let half = (width / 2.0).max(0.5);
        let min = Point::new(from.x.min(to.x) - half, from.y.min(to.y) - half);
        let max = Point::new(from.x.max(to.x) + half, from.y.max(to.y) + half);
        self.fill_where(min, max, color, |p| distance_to_segment(p, from, to) <= half);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: RgbColor) {
        let r = radius.max(0.5);
        let min = Point::new(center.x - r, center.y - r);
        let max = Point::new(center.x + r, center.y + r);
        self.fill_where(min, max, color, |p| p.distance(center) <= r);
    }
}

/// Shortest distance from `p` to the segment `a`-`b`.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Label;
    use crate::geometry::PolarVector;

    fn sample_set() -> VectorSet {
        VectorSet::from_vectors(
            Point::new(400.0, 400.0),
            [
                PolarVector::new(100, 0),
                PolarVector::new(200, 120),
                PolarVector::new(290, 240),
            ],
        )
    }

    fn pixel_near(canvas: &Canvas, p: Point) -> (u8, u8, u8, u8) {
        canvas.get_pixel(p.x.floor() as usize, p.y.floor() as usize)
    }

    #[test]
    fn draw_is_idempotent() {
        let set = sample_set();
        let style = StyleConfig::default();
        let mut canvas = Canvas::new(800, 800);

        draw(&mut canvas, &set, &style);
        let first = canvas.clone();
        draw(&mut canvas, &set, &style);
        assert_eq!(canvas, first);
    }

    #[test]
    fn redraw_replaces_previous_set() {
        let style = StyleConfig::default();
        let other = VectorSet::from_vectors(
            Point::new(400.0, 400.0),
            [
                PolarVector::new(150, 45),
                PolarVector::new(150, 165),
                PolarVector::new(150, 285),
            ],
        );

        let mut fresh = Canvas::new(800, 800);
        draw(&mut fresh, &sample_set(), &style);

        let mut reused = Canvas::new(800, 800);
        draw(&mut reused, &other, &style);
        draw(&mut reused, &sample_set(), &style);
        assert_eq!(reused, fresh);
    }

    #[test]
    fn draws_markers_axes_and_background() {
        let set = sample_set();
        let style = StyleConfig::default();
        let mut canvas = Canvas::new(800, 800);
        draw(&mut canvas, &set, &style);

        let black = (0, 0, 0, 255);
        assert_eq!(pixel_near(&canvas, set.origin()), black);
        for label in Label::ALL {
            assert_eq!(pixel_near(&canvas, set.point(label)), black, "marker {label}");
        }

        let axis = style.axis_color;
        assert_eq!(canvas.get_pixel(10, 400), (axis.r, axis.g, axis.b, 255));
        assert_eq!(canvas.get_pixel(400, 790), (axis.r, axis.g, axis.b, 255));
        assert_eq!(canvas.get_pixel(10, 10), (255, 255, 255, 255));
    }

    #[test]
    fn vector_segment_is_stroked() {
        let set = sample_set();
        let mut canvas = Canvas::new(800, 800);
        draw(&mut canvas, &set, &StyleConfig::default());

        let a = set.point(Label::B);
        let o = set.origin();
        let mid = Point::new((a.x + o.x) / 2.0, (a.y + o.y) / 2.0);
        assert_eq!(pixel_near(&canvas, mid), (0, 0, 0, 255));
    }

    #[test]
    fn primitives_clip_to_canvas() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear(RgbColor::WHITE);
        canvas.stroke_line(
            Point::new(-50.0, 5.0),
            Point::new(50.0, 5.0),
            RgbColor::BLACK,
            1.0,
        );
        canvas.fill_circle(Point::new(-20.0, -20.0), 3.0, RgbColor::BLACK);
        assert_eq!(canvas.get_pixel(0, 5), (0, 0, 0, 255));
        assert_eq!(canvas.get_pixel(9, 5), (0, 0, 0, 255));
        assert_eq!(canvas.get_pixel(0, 0), (255, 255, 255, 255));
    }

    #[test]
    fn segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Point::new(-4.0, 3.0), a, b), 5.0);
        assert!((distance_to_segment(Point::new(1.0, 1.0), a, a) - 2f64.sqrt()).abs() < 1e-12);
    }
}
