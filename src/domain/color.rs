//! Color Mapper - temperature to display color
//!
//! Two independent mappings:
//! - sand core: piecewise-linear ramp across four stops (room → max)
//! - airflow particles: coarse four-bucket thresholds (cold blue → hot red)

use std::fmt;

/// Opaque 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed 0xRRGGBB value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub const fn with_alpha(self, a: f64) -> Rgba {
        Rgba { rgb: self, a }
    }

    /// Channel-wise linear blend, factor clamped to [0, 1], channels rounded
    pub fn lerp(self, other: Rgb, factor: f64) -> Rgb {
        let f = factor.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * f;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// CSS `rgb(r, g, b)` string
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// RGB color with straight alpha in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { rgb: Rgb::new(r, g, b), a }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(1.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            return fmt::Display::fmt(&self.rgb, f);
        }
        write!(f, "rgba({}, {}, {}, {})", self.rgb.r, self.rgb.g, self.rgb.b, self.a)
    }
}

/// A (temperature, color) stop on the core ramp
#[derive(Clone, Copy, Debug)]
pub struct ColorStop {
    pub temp: f64,
    pub color: Rgb,
}

pub const SAND_STOPS: [ColorStop; 4] = [
    ColorStop { temp: 25.0, color: Rgb::from_hex(0xD4A373) },
    ColorStop { temp: 200.0, color: Rgb::from_hex(0xE8B87A) },
    ColorStop { temp: 400.0, color: Rgb::from_hex(0xF59E0B) },
    ColorStop { temp: 600.0, color: Rgb::from_hex(0xEF4444) },
];

pub const PARTICLE_COLD: Rgba = Rgba::new(59, 130, 246, 0.8); // blue-500
pub const PARTICLE_COOL: Rgba = Rgba::new(147, 197, 253, 0.8); // blue-300
pub const PARTICLE_WARM: Rgba = Rgba::new(251, 191, 36, 0.8); // amber-400
pub const PARTICLE_HOT: Rgba = Rgba::new(239, 68, 68, 0.8); // red-500

/// Sand core color for a temperature.
///
/// Interpolates between the two bracketing stops. Below the first stop the
/// first color is returned, above the last stop the last color.
pub fn temperature_to_color(temp: f64) -> Rgb {
    let first = SAND_STOPS[0];
    if temp < first.temp || temp.is_nan() {
        return first.color;
    }

    for pair in SAND_STOPS.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if temp >= lo.temp && temp <= hi.temp {
            let factor = (temp - lo.temp) / (hi.temp - lo.temp);
            return lo.color.lerp(hi.color, factor);
        }
    }

    SAND_STOPS[SAND_STOPS.len() - 1].color
}

/// Airflow particle fill for a temperature
pub fn particle_temperature_to_color(temp: f64) -> Rgba {
    if temp < 50.0 {
        PARTICLE_COLD
    } else if temp < 100.0 {
        PARTICLE_COOL
    } else if temp < 150.0 {
        PARTICLE_WARM
    } else {
        PARTICLE_HOT
    }
}
