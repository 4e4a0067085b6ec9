use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Factor by which the capture was enlarged before OCR; word boxes in the
/// markup are in enlarged-image pixels, so mapping back divides by it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f32);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("scale factor must be a positive finite number, got {0}")]
    InvalidScale(f32),
}

impl Scale {
    pub fn new(factor: f32) -> Result<Self, GeometryError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(GeometryError::InvalidScale(factor));
        }
        Ok(Self(factor))
    }

    pub fn factor(self) -> f32 {
        self.0
    }
}

pub fn to_screen(pixel_x: u32, pixel_y: u32, origin: ScreenPoint, scale: Scale) -> ScreenPoint {
    ScreenPoint {
        x: origin.x + pixel_x as f32 / scale.0,
        y: origin.y + pixel_y as f32 / scale.0,
    }
}
