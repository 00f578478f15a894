//! Symbol - Encoded Module Matrix and Its Serializations
//!
//! A symbol is a `rows x columns` matrix of on/off modules laid out over a
//! `width x height` pixel area, surrounded by padding. Linear barcodes are a
//! single row stretched to the full height.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use crate::config::{Color, Padding};
use crate::encoder::EncodeError;
use crate::symbology::Symbology;

pub const GRID_OFF: char = '0';
pub const GRID_ON: char = '1';

/// Largest canvas, in pixels, that `to_png` will rasterize.
pub const MAX_PNG_PIXELS: u64 = 25_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub color: Color,
    pub padding: Padding,
}

impl Geometry {
    pub fn canvas_width(&self) -> u32 {
        self.padding.left + self.width + self.padding.right
    }

    pub fn canvas_height(&self) -> u32 {
        self.padding.top + self.height + self.padding.bottom
    }
}

/// A horizontal run of "on" modules, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bar {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    symbology: Symbology,
    extended_code: String,
    columns: usize,
    rows: usize,
    modules: Vec<bool>,
    geometry: Geometry,
}

impl Symbol {
    /// `modules` is row-major and must hold `columns * rows` cells.
    pub fn new(
        symbology: Symbology,
        extended_code: String,
        columns: usize,
        modules: Vec<bool>,
        geometry: Geometry,
    ) -> Result<Self, EncodeError> {
        if columns == 0 || modules.is_empty() || modules.len() % columns != 0 {
            return Err(EncodeError::Rejected(format!(
                "module matrix of {} cells does not fit {} columns",
                modules.len(),
                columns
            )));
        }
        let rows = modules.len() / columns;
        Ok(Self { symbology, extended_code, columns, rows, modules, geometry })
    }

    pub fn symbology(&self) -> Symbology {
        self.symbology
    }

    pub fn extended_code(&self) -> &str {
        &self.extended_code
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// `None` outside the matrix.
    pub fn module(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.modules.get(row * self.columns + col).copied()
    }

    fn is_on(&self, row: usize, col: usize) -> bool {
        self.modules[row * self.columns + col]
    }

    fn bars(&self) -> Vec<Bar> {
        let g = &self.geometry;
        let mw = f64::from(g.width) / self.columns as f64;
        let mh = f64::from(g.height) / self.rows as f64;
        let mut bars = Vec::new();
        for row in 0..self.rows {
            let mut col = 0;
            while col < self.columns {
                if !self.is_on(row, col) {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < self.columns && self.is_on(row, col) {
                    col += 1;
                }
                bars.push(Bar {
                    x: f64::from(g.padding.left) + start as f64 * mw,
                    y: f64::from(g.padding.top) + row as f64 * mh,
                    w: (col - start) as f64 * mw,
                    h: mh,
                });
            }
        }
        bars
    }

    pub fn to_svg(&self) -> String {
        let g = &self.geometry;
        let (cw, ch) = (g.canvas_width(), g.canvas_height());
        let mut svg = format!(
            "<svg width=\"{cw}\" height=\"{ch}\" viewBox=\"0 0 {cw} {ch}\" version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\">\n"
        );
        svg += &format!("\t<desc>{}</desc>\n", escape_markup(&self.extended_code));
        svg += &format!(
            "\t<g id=\"bars\" fill=\"{}\" stroke=\"none\" stroke-width=\"0\" stroke-linecap=\"square\">\n",
            g.color
        );
        for bar in self.bars() {
            svg += &format!(
                "\t\t<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" />\n",
                px(bar.x),
                px(bar.y),
                px(bar.w),
                px(bar.h)
            );
        }
        svg += "\t</g>\n</svg>\n";
        svg
    }

    pub fn to_html_div(&self) -> String {
        let g = &self.geometry;
        let mut html = format!(
            "<div style=\"width:{}px;height:{}px;position:relative;font-size:0;border:none;padding:0;margin:0;\">\n",
            g.canvas_width(),
            g.canvas_height()
        );
        for bar in self.bars() {
            html += &format!(
                "\t<div style=\"background-color:{};left:{}px;top:{}px;width:{}px;height:{}px;position:absolute;border:none;padding:0;margin:0;\">&nbsp;</div>\n",
                g.color,
                px(bar.x),
                px(bar.y),
                px(bar.w),
                px(bar.h)
            );
        }
        html += "</div>\n";
        html
    }

    /// Transparent canvas with modules filled in the foreground color.
    /// Canvases above [`MAX_PNG_PIXELS`] are refused before allocating.
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        let g = &self.geometry;
        let (cw, ch) = (g.canvas_width(), g.canvas_height());
        if u64::from(cw) * u64::from(ch) > MAX_PNG_PIXELS {
            return Err(EncodeError::CanvasTooLarge { width: cw, height: ch });
        }
        let [r, gr, b] = g.color.rgb();
        let ink = Rgba([r, gr, b, 255]);
        let mut img = RgbaImage::from_pixel(cw, ch, Rgba([0, 0, 0, 0]));

        for bar in self.bars() {
            let x0 = clamp_px(bar.x, cw);
            let x1 = clamp_px(bar.x + bar.w, cw);
            let y0 = clamp_px(bar.y, ch);
            let y1 = clamp_px(bar.y + bar.h, ch);
            for y in y0..y1 {
                for x in x0..x1 {
                    img.put_pixel(x, y, ink);
                }
            }
        }

        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    /// One text line per module row, each terminated by `\n`.
    pub fn to_grid(&self, off: char, on: char) -> String {
        let mut grid = String::with_capacity((self.columns + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.columns {
                grid.push(if self.is_on(row, col) { on } else { off });
            }
            grid.push('\n');
        }
        grid
    }
}

fn px(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" { "0".to_string() } else { s.to_string() }
}

fn clamp_px(v: f64, limit: u32) -> u32 {
    let rounded = v.round();
    if rounded <= 0.0 {
        0
    } else if rounded >= f64::from(limit) {
        limit
    } else {
        rounded as u32
    }
}

pub(crate) fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Symbol {
        // 2x2: on off / off on
        Symbol::new(
            Symbology::QrCode,
            "a<b".to_string(),
            2,
            vec![true, false, false, true],
            Geometry {
                width: 10,
                height: 10,
                color: Color { r: 255, g: 0, b: 0 },
                padding: Padding::new(1, 2, 3, 4),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_grid() {
        assert_eq!(checker().to_grid(GRID_OFF, GRID_ON), "10\n01\n");
        assert_eq!(checker().to_grid('.', '#'), "#.\n.#\n");
    }

    #[test]
    fn test_svg_geometry() {
        let svg = checker().to_svg();
        assert!(svg.contains("width=\"16\" height=\"14\""));
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(svg.contains("<desc>a&lt;b</desc>"));
        assert!(svg.contains("<rect x=\"4\" y=\"1\" width=\"5\" height=\"5\" />"));
        assert!(svg.contains("<rect x=\"9\" y=\"6\" width=\"5\" height=\"5\" />"));
    }

    #[test]
    fn test_html_div_bars() {
        let html = checker().to_html_div();
        assert!(html.starts_with("<div style=\"width:16px;height:14px;"));
        assert_eq!(html.matches("position:absolute").count(), 2);
    }

    #[test]
    fn test_png_pixels() {
        let bytes = checker().to_png().unwrap();
        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(img.dimensions(), (16, 14));
        assert_eq!(img.get_pixel(4, 1), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(9, 1)[3], 0);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_png_canvas_cap() {
        let geometry = Geometry {
            width: 10_000,
            height: 10_000,
            color: Color::BLACK,
            padding: Padding::new(9_999, 9_999, 9_999, 9_999),
        };
        let huge = Symbol::new(Symbology::QrCode, "x".into(), 1, vec![true], geometry).unwrap();
        assert!(matches!(
            huge.to_png(),
            Err(EncodeError::CanvasTooLarge { width: 29_998, height: 29_998 })
        ));
    }

    #[test]
    fn test_module_lookup() {
        let symbol = checker();
        assert_eq!(symbol.module(0, 0), Some(true));
        assert_eq!(symbol.module(0, 1), Some(false));
        assert_eq!(symbol.module(1, 1), Some(true));
        assert_eq!(symbol.module(2, 0), None);
        assert_eq!(symbol.module(0, 2), None);
        assert_eq!(symbol.module(usize::MAX, usize::MAX), None);
    }

    #[test]
    fn test_mismatched_matrix_rejected() {
        let geometry = checker().geometry().clone();
        assert!(Symbol::new(Symbology::Ean13, String::new(), 3, vec![true; 4], geometry).is_err());
    }

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(5.0), "5");
        assert_eq!(px(2.5), "2.5");
        assert_eq!(px(1.0 / 3.0), "0.3333");
    }
}
