//! Half-block pixel canvas implementing [`Surface`] for the terminal.

use std::collections::HashSet;

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use skyfolio_core::{Paint, Point, Rgba, Surface, Viewport};

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '▀';

/// A raster of premultiplied RGBA pixels, two per terminal cell.
///
/// Drawing happens in logical units; each cell covers
/// `cell_width × cell_height` of them.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    /// Size in terminal cells.
    columns: u16,
    rows: u16,
    /// Logical size of one terminal cell.
    cell_width: f64,
    cell_height: f64,
    /// Row-major, `columns` wide and `rows * 2` tall.
    pixels: Vec<[f64; 4]>,
    /// Opaque colour the pixels are composited onto.
    base: Rgba,
}

impl PixelCanvas {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            columns: 0,
            rows: 0,
            cell_width: cell_width.max(1.0),
            cell_height: cell_height.max(1.0),
            pixels: Vec::new(),
            base: Rgba::rgb(0, 0, 0),
        }
    }

    /// Resize to `columns × rows` cells, clearing every pixel.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        self.pixels = vec![[0.0; 4]; columns as usize * rows as usize * 2];
    }

    /// Size in terminal cells.
    pub fn cells(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    pub fn set_base(&mut self, base: Rgba) {
        self.base = base.with_alpha(1.0);
    }

    fn pixel_width(&self) -> usize {
        self.columns as usize
    }

    fn pixel_height(&self) -> usize {
        self.rows as usize * 2
    }

    /// Logical size of one pixel.
    fn pixel_size(&self) -> (f64, f64) {
        (self.cell_width, self.cell_height / 2.0)
    }

    fn pixel_center(&self, x: usize, y: usize) -> Point {
        let (pw, ph) = self.pixel_size();
        Point::new((x as f64 + 0.5) * pw, (y as f64 + 0.5) * ph)
    }

    /// Pixel containing a logical point, if it is on the canvas.
    fn pixel_at(&self, point: Point) -> Option<(usize, usize)> {
        let (pw, ph) = self.pixel_size();
        let x = (point.x / pw).floor();
        let y = (point.y / ph).floor();
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.pixel_width() && y < self.pixel_height()).then_some((x, y))
    }

    /// Inclusive pixel range covering `[min, max]` on one axis.
    fn span(min: f64, max: f64, size: f64, limit: usize) -> Option<(usize, usize)> {
        if limit == 0 {
            return None;
        }
        let lo = (min / size).floor().max(0.0);
        let hi = (max / size).floor().min(limit as f64 - 1.0);
        (lo <= hi).then_some((lo as usize, hi as usize))
    }

    /// Pixels whose centre lies within `radius` of `point`, plus the pixel under `point`.
    fn pixels_near(&self, point: Point, radius: f64, out: &mut HashSet<(usize, usize)>) {
        let (pw, ph) = self.pixel_size();
        if let Some(own) = self.pixel_at(point) {
            out.insert(own);
        }
        let Some((x0, x1)) =
            Self::span(point.x - radius, point.x + radius, pw, self.pixel_width())
        else {
            return;
        };
        let Some((y0, y1)) =
            Self::span(point.y - radius, point.y + radius, ph, self.pixel_height())
        else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.pixel_center(x, y).distance_to(point) <= radius {
                    out.insert((x, y));
                }
            }
        }
    }

    /// Source-over blend of `color` into one pixel.
    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let index = y * self.pixel_width() + x;
        let Some(dst) = self.pixels.get_mut(index) else {
            return;
        };
        let src = color.premultiplied();
        let keep = 1.0 - src[3];
        for (d, s) in dst.iter_mut().zip(src) {
            *d = s + *d * keep;
        }
    }

    fn paint_pixels(&mut self, pixels: HashSet<(usize, usize)>, paint: &Paint) {
        for (x, y) in pixels {
            let color = paint.color_at(self.pixel_center(x, y));
            self.blend(x, y, color);
        }
    }

    /// Opaque colour of a pixel after compositing onto the base colour.
    pub fn composite(&self, x: usize, y: usize) -> Rgba {
        let [r, g, b, a] = self
            .pixels
            .get(y * self.pixel_width() + x)
            .copied()
            .unwrap_or([0.0; 4]);
        let over = |channel: f64, base: u8| {
            ((channel + base as f64 / 255.0 * (1.0 - a)) * 255.0)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgba::rgb(
            over(r, self.base.r),
            over(g, self.base.g),
            over(b, self.base.b),
        )
    }
}

impl Surface for PixelCanvas {
    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.columns as f64 * self.cell_width,
            self.rows as f64 * self.cell_height,
        )
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn fill_rect(&mut self, origin: Point, size: Viewport, paint: &Paint) {
        let (pw, ph) = self.pixel_size();
        // A pixel is covered when its centre is inside the half-open rectangle.
        let Some((x0, x1)) = Self::span(
            origin.x - pw / 2.0,
            origin.x + size.width - pw / 2.0,
            pw,
            self.pixel_width(),
        ) else {
            return;
        };
        let Some((y0, y1)) = Self::span(
            origin.y - ph / 2.0,
            origin.y + size.height - ph / 2.0,
            ph,
            self.pixel_height(),
        ) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = self.pixel_center(x, y);
                let inside = center.x >= origin.x
                    && center.y >= origin.y
                    && center.x < origin.x + size.width
                    && center.y < origin.y + size.height;
                if inside {
                    self.blend(x, y, paint.color_at(center));
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        let mut pixels = HashSet::new();
        self.pixels_near(center, radius, &mut pixels);
        self.paint_pixels(pixels, paint);
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, paint: &Paint) {
        let (pw, ph) = self.pixel_size();
        let step = pw.min(ph) / 2.0;
        let length = from.distance_to(to);
        let samples = (length / step).ceil().max(1.0) as usize;

        let mut pixels = HashSet::new();
        for i in 0..=samples {
            let t = i as f64 / samples as f64;
            let point = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.pixels_near(point, width / 2.0, &mut pixels);
        }
        self.paint_pixels(pixels, paint);
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = area.width.min(self.columns);
        let rows = area.height.min(self.rows);
        for cy in 0..rows {
            for cx in 0..columns {
                let top = self.composite(cx as usize, cy as usize * 2);
                let bottom = self.composite(cx as usize, cy as usize * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                    cell.set_char(HALF_BLOCK)
                        .set_fg(top.to_color())
                        .set_bg(bottom.to_color());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    fn canvas(columns: u16, rows: u16) -> PixelCanvas {
        let mut c = PixelCanvas::new(8.0, 16.0);
        c.resize(columns, rows);
        c
    }

    fn lit(c: &PixelCanvas) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..c.pixel_height() {
            for x in 0..c.pixel_width() {
                if c.pixels[y * c.pixel_width() + x][3] > 0.0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_viewport_in_logical_units() {
        let c = canvas(100, 30);
        assert_eq!(c.viewport(), Viewport::new(800.0, 480.0));
        assert_eq!(c.cells(), (100, 30));
    }

    #[test]
    fn test_blend_source_over() {
        let mut c = canvas(1, 1);
        c.blend(0, 0, Rgba::new(255, 0, 0, 0.5));
        c.blend(0, 0, Rgba::new(0, 0, 255, 0.5));
        let [r, g, b, a] = c.pixels[0];
        assert!((r - 0.25).abs() < 1e-12);
        assert_eq!(g, 0.0);
        assert!((b - 0.5).abs() < 1e-12);
        assert!((a - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_composite_onto_base() {
        let mut c = canvas(1, 1);
        c.set_base(Rgba::rgb(0, 0, 200));
        c.blend(0, 0, Rgba::new(255, 255, 255, 0.4));
        assert_eq!(c.composite(0, 0), Rgba::rgb(102, 102, 222));
        assert_eq!(c.composite(0, 1), Rgba::rgb(0, 0, 200));
    }

    #[test]
    fn test_small_circle_lights_its_pixel() {
        let mut c = canvas(10, 5);
        c.fill_circle(Point::new(21.0, 13.0), 0.5, &Paint::Solid(Rgba::WHITE));
        assert_eq!(lit(&c), vec![(2, 1)]);
    }

    #[test]
    fn test_large_circle_covers_neighbours() {
        let mut c = canvas(10, 5);
        c.fill_circle(Point::new(40.0, 40.0), 9.0, &Paint::Solid(Rgba::WHITE));
        assert_eq!(lit(&c), vec![(4, 4), (5, 4), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_off_canvas_shapes_are_clipped() {
        let mut c = canvas(4, 2);
        c.fill_circle(Point::new(-50.0, -50.0), 2.0, &Paint::Solid(Rgba::WHITE));
        c.stroke_line(
            Point::new(500.0, 500.0),
            Point::new(900.0, 900.0),
            2.0,
            &Paint::Solid(Rgba::WHITE),
        );
        assert!(lit(&c).is_empty());
    }

    #[test]
    fn test_horizontal_line_touches_each_pixel_once() {
        let mut c = canvas(10, 2);
        c.stroke_line(
            Point::new(4.0, 4.0),
            Point::new(60.0, 4.0),
            2.0,
            &Paint::Solid(Rgba::new(255, 255, 255, 0.5)),
        );
        let lit = lit(&c);
        assert_eq!(lit, (0..8).map(|x| (x, 0)).collect::<Vec<_>>());
        // Blended once: alpha stays at the paint's alpha.
        assert!(c.pixels.iter().filter(|p| p[3] > 0.0).all(|p| (p[3] - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_fill_rect_and_clear() {
        let mut c = canvas(4, 2);
        c.fill_rect(
            Point::new(8.0, 0.0),
            Viewport::new(16.0, 16.0),
            &Paint::Solid(Rgba::WHITE),
        );
        assert_eq!(lit(&c), vec![(1, 0), (2, 0), (1, 1), (2, 1)]);
        c.clear();
        assert!(lit(&c).is_empty());
    }

    #[test]
    fn test_fill_rect_excludes_far_edge() {
        let mut c = canvas(4, 2);
        // Pixel 1's centre sits exactly on the right edge at x = 12.
        c.fill_rect(
            Point::new(0.0, 0.0),
            Viewport::new(12.0, 8.0),
            &Paint::Solid(Rgba::WHITE),
        );
        assert_eq!(lit(&c), vec![(0, 0)]);
    }

    #[test]
    fn test_widget_writes_half_blocks() {
        let mut c = canvas(2, 1);
        c.set_base(Rgba::rgb(10, 20, 30));
        c.blend(1, 0, Rgba::WHITE);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        (&c).render(area, &mut buf);

        let cell = &buf[(1u16, 0u16)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(10, 20, 30));
        assert_eq!(buf[(0u16, 0u16)].fg, Color::Rgb(10, 20, 30));
    }
}
