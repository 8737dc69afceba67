// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a css hex string like "#4a1d96"

use crate::error::FieldError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Accepts "#rrggbb" or "rrggbb", alpha is always opaque since particle
    // opacity is carried separately
    pub fn from_hex(hex: &str) -> Result<Color, FieldError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FieldError::InvalidColor(hex.to_owned()));
        }
        let rgb = u32::from_str_radix(digits, 16)
            .map_err(|_| FieldError::InvalidColor(hex.to_owned()))?;

        Ok(Color::from_u32((rgb << 8) | 0xff))
    }

    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
