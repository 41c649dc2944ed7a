// render.rs - Grid to RGB bitmap mapping

use crate::grid::Grid;

/// 24-bit colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scales each channel by `percent` (clamped to 100).
    pub fn dimmed(self, percent: u8) -> Self {
        let scale = |c: u8| (u16::from(c) * u16::from(percent.min(100)) / 100) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// `height x width` pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    height: usize,
    width: usize,
    pixels: Vec<Rgb>,
}

impl Bitmap {
    /// Black bitmap.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            pixels: vec![Rgb::BLACK; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn pixel(&self, row: usize, col: usize) -> Rgb {
        assert!(row < self.height && col < self.width, "pixel ({row}, {col}) out of range");
        self.pixels[row * self.width + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks(self.width.max(1))
    }
}

/// Live cells white, dead cells black. Same dimensions as `grid`.
pub fn render(grid: &Grid) -> Bitmap {
    let pixels = grid
        .rows()
        .flatten()
        .map(|&alive| if alive { Rgb::WHITE } else { Rgb::BLACK })
        .collect();
    Bitmap {
        height: grid.height(),
        width: grid.width(),
        pixels,
    }
}
