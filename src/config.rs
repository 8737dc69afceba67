// Tunables for the particle field. Defaults reproduce the portfolio overlay:
// 200 particles max, 50 seeded, 3 per pointer move, 5% ambient chance per frame

use crate::color::Color;
use crate::error::FieldError;
use wasm_bindgen::prelude::*;

const DEFAULT_PALETTE: [u32; 4] = [0x4a1d96ff, 0xbe185dff, 0x3b82f6ff, 0x8b5cf6ff];

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Canvas,
    Window,
}

#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub capacity: usize,
    pub seed_count: usize,
    pub burst_count: usize,
    pub ambient_chance: f64,
    pub decay: f64,
    pub min_size: f64,
    pub idle_ms: f64,
    pub size_min: f64,
    pub size_max: f64,
    pub alpha_min: f64,
    pub alpha_max: f64,
    pub max_speed: f64,
    pub overlay_style: bool,
    pub pointer_source: PointerSource,
    palette: Vec<Color>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            capacity: 200,
            seed_count: 50,
            burst_count: 3,
            ambient_chance: 0.05,
            decay: 0.05,
            min_size: 0.3,
            idle_ms: 200.0,
            size_min: 1.0,
            size_max: 6.0,
            alpha_min: 0.2,
            alpha_max: 1.0,
            max_speed: 1.0,
            overlay_style: true,
            pointer_source: PointerSource::Canvas,
            palette: DEFAULT_PALETTE.iter().map(|&c| Color::from_u32(c)).collect(),
        }
    }
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldConfig {
        FieldConfig::default()
    }

    // Comma separated hex colors, e.g. "#ff0000, #00ff00"
    pub fn set_palette(&mut self, colors: &str) -> Result<(), JsValue> {
        self.set_palette_hex(colors).map_err(JsValue::from)
    }

    pub fn palette_css(&self) -> String {
        self.palette
            .iter()
            .map(Color::to_css)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FieldConfig {
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn set_palette_hex(&mut self, colors: &str) -> Result<(), FieldError> {
        let palette = colors
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Color::from_hex)
            .collect::<Result<Vec<_>, _>>()?;
        if palette.is_empty() {
            return Err(FieldError::InvalidConfig("palette is empty".to_owned()));
        }
        self.palette = palette;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        let invalid = |msg: &str| Err(FieldError::InvalidConfig(msg.to_owned()));

        let finite = [
            ("decay", self.decay),
            ("min_size", self.min_size),
            ("size_min", self.size_min),
            ("size_max", self.size_max),
            ("alpha_min", self.alpha_min),
            ("alpha_max", self.alpha_max),
            ("max_speed", self.max_speed),
            ("idle_ms", self.idle_ms),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(FieldError::InvalidConfig(format!("{} must be finite", name)));
        }
        if self.capacity == 0 {
            return invalid("capacity must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.ambient_chance) {
            return invalid("ambient_chance must be within [0, 1]");
        }
        if !(self.decay > 0.0) {
            return invalid("decay must be positive");
        }
        if !(self.min_size >= 0.0) {
            return invalid("min_size must not be negative");
        }
        if !(self.size_min < self.size_max) || self.size_min <= self.min_size {
            return invalid("size range must be non-empty and above min_size");
        }
        if !(self.alpha_min < self.alpha_max) || self.alpha_min < 0.0 || self.alpha_max > 1.0 {
            return invalid("alpha range must be a non-empty part of [0, 1]");
        }
        if !(self.max_speed >= 0.0) {
            return invalid("max_speed must not be negative");
        }
        if !(self.idle_ms >= 0.0) {
            return invalid("idle_ms must not be negative");
        }
        if self.palette.is_empty() {
            return invalid("palette is empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.palette().len(), 4);
        assert_eq!(config.palette_css(), "#4a1d96,#be185d,#3b82f6,#8b5cf6");
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut config = FieldConfig::default();
        config.ambient_chance = 1.5;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.capacity = 0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.size_min = 6.0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.decay = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        let cases: [fn(&mut FieldConfig); 6] = [
            |c: &mut FieldConfig| c.max_speed = f64::INFINITY,
            |c: &mut FieldConfig| c.size_max = f64::INFINITY,
            |c: &mut FieldConfig| c.size_min = f64::NEG_INFINITY,
            |c: &mut FieldConfig| c.decay = f64::INFINITY,
            |c: &mut FieldConfig| c.min_size = f64::NAN,
            |c: &mut FieldConfig| c.idle_ms = f64::INFINITY,
        ];
        for set in cases.iter() {
            let mut config = FieldConfig::default();
            set(&mut config);
            match config.validate() {
                Err(FieldError::InvalidConfig(msg)) => assert!(msg.contains("finite"), "{}", msg),
                other => panic!("expected InvalidConfig, got {:?}", other),
            }
        }
    }

    #[test]
    fn palette_from_hex_list() {
        let mut config = FieldConfig::default();
        config.set_palette_hex("#ff0000, 00ff00").unwrap();
        assert_eq!(config.palette_css(), "#ff0000,#00ff00");

        assert!(config.set_palette_hex(" , ").is_err());
        assert!(config.set_palette_hex("#ff0000,nope").is_err());
        // failed updates leave the palette alone
        assert_eq!(config.palette().len(), 2);
    }
}
