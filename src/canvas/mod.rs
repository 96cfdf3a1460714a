use image::{Rgb, RgbImage};
use rand::Rng;

/// Logical cells per side.
pub const GRID_CELLS: u32 = 8;
/// Pixels per cell side on the rendered surface.
pub const CELL_PIXELS: u32 = 16;
/// Rendered surface side in pixels.
pub const CANVAS_PIXELS: u32 = GRID_CELLS * CELL_PIXELS;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// A single cell paint applied by [`Canvas::paint_random_cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPaint {
    pub column: u32,
    pub row: u32,
    pub color: Rgb<u8>,
}

/// The 128x128 painting surface, mutated only in whole 16x16 cell blocks.
#[derive(Debug, Clone)]
pub struct Canvas {
    surface: RgbImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            surface: RgbImage::from_pixel(CANVAS_PIXELS, CANVAS_PIXELS, WHITE),
        }
    }

    pub fn reset(&mut self) {
        self.fill(WHITE);
    }

    /// Terminal visual state of a committed session.
    pub fn stain_dark(&mut self) {
        self.fill(BLACK);
    }

    /// Paints one uniformly chosen cell with a uniformly random color.
    /// Row and column are drawn independently; a cell may be hit again and is
    /// simply overwritten.
    pub fn paint_random_cell<R: Rng>(&mut self, rng: &mut R) -> CellPaint {
        let color = Rgb([rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>()]);
        let column = rng.gen_range(0..GRID_CELLS);
        let row = rng.gen_range(0..GRID_CELLS);

        self.paint_cell(column, row, color);
        CellPaint { column, row, color }
    }

    /// One pixel per cell, sampled at the block's top-left corner.
    pub fn thumbnail(&self) -> RgbImage {
        RgbImage::from_fn(GRID_CELLS, GRID_CELLS, |i, j| {
            *self.surface.get_pixel(i * CELL_PIXELS, j * CELL_PIXELS)
        })
    }

    pub fn cell(&self, column: u32, row: u32) -> Rgb<u8> {
        *self
            .surface
            .get_pixel(column * CELL_PIXELS, row * CELL_PIXELS)
    }

    pub fn surface(&self) -> &RgbImage {
        &self.surface
    }

    fn paint_cell(&mut self, column: u32, row: u32, color: Rgb<u8>) {
        let x0 = column * CELL_PIXELS;
        let y0 = row * CELL_PIXELS;
        for y in y0..y0 + CELL_PIXELS {
            for x in x0..x0 + CELL_PIXELS {
                self.surface.put_pixel(x, y, color);
            }
        }
    }

    fn fill(&mut self, color: Rgb<u8>) {
        for pixel in self.surface.pixels_mut() {
            *pixel = color;
        }
    }
}
