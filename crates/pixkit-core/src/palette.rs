//! Palette - Color table for palette-indexed images
//!
//! A palette maps the single index sample of a [`Mode::Palette`](crate::Mode)
//! image to an RGBA color. Filters never look colors up; they only need to
//! know that a buffer is indexed so they can refuse or preserve it.

use crate::error::{Error, Result};

/// Maximum number of palette entries (8-bit indices).
pub const MAX_PALETTE_ENTRIES: usize = 256;

/// RGBA color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    /// Red component
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component
    pub blue: u8,
    /// Alpha component
    pub alpha: u8,
}

impl Rgba {
    /// Create a new RGBA color
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an RGB color (alpha = 255)
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create a grayscale color
    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }
}

/// Color table for indexed images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a linear grayscale palette with `len` entries, dark to light.
    pub fn linear_gray(len: usize) -> Result<Self> {
        if len < 2 || len > MAX_PALETTE_ENTRIES {
            return Err(Error::PaletteSize(len));
        }
        let colors = (0..len)
            .map(|i| Rgba::gray((i * 255 / (len - 1)) as u8))
            .collect();
        Ok(Self { colors })
    }

    /// Get the number of colors
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get a color by index
    pub fn get(&self, index: usize) -> Option<&Rgba> {
        self.colors.get(index)
    }

    /// Add a color and return its index
    pub fn add_color(&mut self, color: Rgba) -> Result<usize> {
        if self.colors.len() >= MAX_PALETTE_ENTRIES {
            return Err(Error::PaletteFull(MAX_PALETTE_ENTRIES));
        }
        self.colors.push(color);
        Ok(self.colors.len() - 1)
    }

    /// Add an RGB color and return its index
    pub fn add_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<usize> {
        self.add_color(Rgba::rgb(r, g, b))
    }

    /// Get all colors as a slice
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}
