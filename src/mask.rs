//! Raster images and the collision masks derived from them.
//!
//! A `PixelImage` is what a sprite looks like (opaque or transparent per
//! pixel); a `Mask` is the bit grid used for pixel-precise collision tests.
//! Shields keep both: the image loses pixels on impact and the mask is
//! rebuilt from it afterwards.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelImage {
    width: i32,
    height: i32,
    pixels: Vec<bool>,
}

impl PixelImage {
    /// A fully opaque image.
    pub fn filled(width: i32, height: i32) -> Self {
        PixelImage {
            width,
            height,
            pixels: vec![true; (width * height).max(0) as usize],
        }
    }

    /// Build an image from rows of `#` (opaque) and `.` (transparent), each
    /// template cell becoming a `scale` × `scale` block.
    pub fn from_template(rows: &[&str], scale: i32) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0) as i32;
        let width = cols * scale;
        let height = rows.len() as i32 * scale;
        let mut pixels = vec![false; (width * height) as usize];

        for (ty, row) in rows.iter().enumerate() {
            for (tx, cell) in row.bytes().enumerate() {
                if cell != b'#' {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = tx as i32 * scale + dx;
                        let y = ty as i32 * scale + dy;
                        pixels[(y * width + x) as usize] = true;
                    }
                }
            }
        }

        PixelImage { width, height, pixels }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Make every pixel of the rectangle transparent, clipped to the image.
    pub fn clear_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width);
        let y1 = (y + height).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels[(py * self.width + px) as usize] = false;
            }
        }
    }

    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_image(image: &PixelImage) -> Self {
        Mask {
            width: image.width,
            height: image.height,
            bits: image.pixels.clone(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// First pixel set in both masks, scanning rows top to bottom.
    ///
    /// `offset` is the other mask's top-left corner relative to this one;
    /// the returned point is in this mask's coordinates.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (ox, oy) = offset;
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width).min(self.width);
        let y1 = (oy + other.height).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - ox, y - oy) {
                    return Some((x, y));
                }
            }
        }
        None
    }
}
