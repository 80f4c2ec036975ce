//! Styled QR rendering to PNG
//!
//! Data modules are drawn one cell at a time with the request's dot style.
//! The three 7x7 finder patterns ("eyes") are drawn as whole shapes with
//! the eye style so that rounded and circular eyes look continuous.

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use qrcode::{Color, QrCode};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use super::{HexColor, QrRequest, QrStyle};
use crate::error::{Error, Result};

const EYE_MODULES: usize = 7;

/// Pixel geometry of the rendered image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Edge length of one module in pixels
    #[serde(default = "default_module_size")]
    pub module_size: u32,

    /// Quiet zone width in modules
    #[serde(default = "default_border")]
    pub border: u32,
}

fn default_module_size() -> u32 {
    10
}

fn default_border() -> u32 {
    4
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_size: default_module_size(),
            border: default_border(),
        }
    }
}

/// Render a request to PNG bytes
pub fn render_png(request: &QrRequest, options: &RenderOptions) -> Result<Vec<u8>> {
    let image = render_image(request, options)?;
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Render a request to an in-memory RGB image
pub fn render_image(request: &QrRequest, options: &RenderOptions) -> Result<RgbImage> {
    if request.url.trim().is_empty() {
        return Err(Error::EmptyPayload);
    }
    if options.module_size == 0 {
        return Err(Error::Config("module_size must be at least 1".to_string()));
    }

    let fill = HexColor::parse(&request.fill_color)?.to_rgb();
    let back = HexColor::parse(&request.back_color)?.to_rgb();
    let code = QrCode::new(request.url.as_bytes())?;

    let width = code.width();
    let colors = code.to_colors();
    let m = options.module_size;
    let side = (width as u32 + 2 * options.border) * m;

    let mut canvas = Canvas {
        image: ImageBuffer::from_pixel(side, side, back),
        fill,
        module: m,
        origin: options.border * m,
    };

    for y in 0..width {
        for x in 0..width {
            if colors[y * width + x] != Color::Dark || in_eye(x, y, width) {
                continue;
            }
            canvas.draw_module(x as u32, y as u32, request.dot_style);
        }
    }

    for (ex, ey) in eye_origins(width) {
        canvas.draw_eye(ex as u32, ey as u32, request.eye_style);
    }

    Ok(canvas.image)
}

fn eye_origins(width: usize) -> [(usize, usize); 3] {
    let far = width - EYE_MODULES;
    [(0, 0), (far, 0), (0, far)]
}

fn in_eye(x: usize, y: usize, width: usize) -> bool {
    eye_origins(width)
        .iter()
        .any(|&(ex, ey)| x >= ex && x < ex + EYE_MODULES && y >= ey && y < ey + EYE_MODULES)
}

/// An axis-aligned square region in pixel space
#[derive(Debug, Clone, Copy)]
struct Square {
    x: f32,
    y: f32,
    size: f32,
}

impl Square {
    fn inset(self, by: f32) -> Square {
        Square {
            x: self.x + by,
            y: self.y + by,
            size: (self.size - 2.0 * by).max(0.0),
        }
    }

    fn contains(&self, style: QrStyle, px: f32, py: f32) -> bool {
        let inside_box =
            px >= self.x && px < self.x + self.size && py >= self.y && py < self.y + self.size;
        if !inside_box {
            return false;
        }
        match style {
            QrStyle::Square | QrStyle::Gapped => true,
            QrStyle::Circle => {
                let r = self.size / 2.0;
                let dx = px - (self.x + r);
                let dy = py - (self.y + r);
                dx * dx + dy * dy <= r * r
            }
            QrStyle::Rounded => {
                let r = self.size / 3.0;
                let dx = (self.x + r - px).max(px - (self.x + self.size - r)).max(0.0);
                let dy = (self.y + r - py).max(py - (self.y + self.size - r)).max(0.0);
                dx * dx + dy * dy <= r * r
            }
        }
    }
}

struct Canvas {
    image: RgbImage,
    fill: Rgb<u8>,
    module: u32,
    origin: u32,
}

impl Canvas {
    fn module_square(&self, x: u32, y: u32, modules: u32) -> Square {
        Square {
            x: (self.origin + x * self.module) as f32,
            y: (self.origin + y * self.module) as f32,
            size: (modules * self.module) as f32,
        }
    }

    fn draw_module(&mut self, x: u32, y: u32, style: QrStyle) {
        let mut cell = self.module_square(x, y, 1);
        if style == QrStyle::Gapped {
            cell = cell.inset((self.module as f32 / 8.0).max(1.0).min(cell.size / 4.0));
        }
        self.fill_where(cell, |px, py| cell.contains(style, px, py));
    }

    fn draw_eye(&mut self, x: u32, y: u32, style: QrStyle) {
        if style == QrStyle::Gapped {
            // Ring of 24 modules plus the 3x3 pupil, each drawn as its own gapped cell
            for dy in 0..EYE_MODULES as u32 {
                for dx in 0..EYE_MODULES as u32 {
                    let ring = dx == 0 || dy == 0 || dx == 6 || dy == 6;
                    let pupil = (2..=4).contains(&dx) && (2..=4).contains(&dy);
                    if ring || pupil {
                        self.draw_module(x + dx, y + dy, style);
                    }
                }
            }
            return;
        }

        let outer = self.module_square(x, y, 7);
        let hole = self.module_square(x + 1, y + 1, 5);
        let pupil = self.module_square(x + 2, y + 2, 3);

        self.fill_where(outer, |px, py| {
            outer.contains(style, px, py) && !hole.contains(style, px, py)
        });
        self.fill_where(pupil, |px, py| pupil.contains(style, px, py));
    }

    fn fill_where(&mut self, bounds: Square, inside: impl Fn(f32, f32) -> bool) {
        let x0 = bounds.x.floor().max(0.0) as u32;
        let y0 = bounds.y.floor().max(0.0) as u32;
        let x1 = ((bounds.x + bounds.size).ceil() as u32).min(self.image.width());
        let y1 = ((bounds.y + bounds.size).ceil() as u32).min(self.image.height());

        for py in y0..y1 {
            for px in x0..x1 {
                if inside(px as f32 + 0.5, py as f32 + 0.5) {
                    self.image.put_pixel(px, py, self.fill);
                }
            }
        }
    }
}
