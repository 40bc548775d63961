use glam::*;

/// A 24-bit RGB color, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xffffff);
    pub const RED: Self = Self(0xff0000);

    /// The largest valid hex value.
    pub const MAX_HEX: u32 = 0xffffff;

    /// Create a color from a hex value, `None` if it does not fit in 24 bits.
    pub const fn from_hex(hex: u32) -> Option<Self> {
        if hex > Self::MAX_HEX {
            None
        } else {
            Some(Self(hex))
        }
    }

    /// Create a color from RGB bytes.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Get the hex value.
    pub const fn hex(&self) -> u32 {
        self.0
    }

    /// Get the red component.
    pub const fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Get the green component.
    pub const fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Get the blue component.
    pub const fn b(&self) -> u8 {
        self.0 as u8
    }

    /// Get the color as unit floats with the given alpha.
    pub fn to_vec4(&self, alpha: f32) -> Vec4 {
        vec4(
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
            alpha,
        )
    }

    /// Get the color as [`wgpu::Color`] with the given alpha.
    pub fn to_wgpu(&self, alpha: f32) -> wgpu::Color {
        let color = self.to_vec4(alpha).as_dvec4();
        wgpu::Color {
            r: color.x,
            g: color.y,
            b: color.z,
            a: color.w,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// An un-normalized color input.
///
/// Use [`normalize_color`] to turn it into a [`Color`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColorValue {
    /// A `0xRRGGBB` integer.
    Hex(u32),
    /// A textual color, e.g. `#ff0000`, `#f00`, `0xff0000`, `ff0000` or `red`.
    Text(String),
    /// RGB bytes.
    Rgb([u8; 3]),
    /// RGB components in `0.0..=1.0`.
    Unit([f32; 3]),
    /// An already valid color.
    Color(Color),
    /// No color supplied.
    #[default]
    Missing,
}

impl From<u32> for ColorValue {
    fn from(hex: u32) -> Self {
        Self::Hex(hex)
    }
}

impl From<i32> for ColorValue {
    fn from(hex: i32) -> Self {
        u32::try_from(hex).map_or(Self::Missing, Self::Hex)
    }
}

impl From<&str> for ColorValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ColorValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<[u8; 3]> for ColorValue {
    fn from(rgb: [u8; 3]) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<[f32; 3]> for ColorValue {
    fn from(unit: [f32; 3]) -> Self {
        Self::Unit(unit)
    }
}

impl From<Vec3> for ColorValue {
    fn from(unit: Vec3) -> Self {
        Self::Unit(unit.to_array())
    }
}

impl From<Color> for ColorValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl<T: Into<ColorValue>> From<Option<T>> for ColorValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Normalize a color input.
///
/// Returns `None` when the input does not describe a color.
pub fn normalize_color(value: impl Into<ColorValue>) -> Option<Color> {
    match value.into() {
        ColorValue::Hex(hex) => Color::from_hex(hex),
        ColorValue::Text(text) => parse_text(&text),
        ColorValue::Rgb([r, g, b]) => Some(Color::from_rgb(r, g, b)),
        ColorValue::Unit(unit) => {
            if !unit.iter().all(|c| c.is_finite() && (0.0..=1.0).contains(c)) {
                return None;
            }
            let [r, g, b] = unit.map(|c| (c * 255.0).round() as u8);
            Some(Color::from_rgb(r, g, b))
        }
        ColorValue::Color(color) => Some(color),
        ColorValue::Missing => None,
    }
}

fn parse_text(text: &str) -> Option<Color> {
    let text = text.trim().to_ascii_lowercase();

    if let Some(hex) = text.strip_prefix('#') {
        return match hex.len() {
            3 => {
                let expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
                parse_hex_digits(&expanded)
            }
            6 => parse_hex_digits(hex),
            _ => None,
        };
    }

    if let Some(hex) = text.strip_prefix("0x") {
        return match hex.len() {
            1..=6 => parse_hex_digits(hex),
            _ => None,
        };
    }

    if let Some(color) = named(&text) {
        return Some(color);
    }

    match text.len() {
        6 => parse_hex_digits(&text),
        _ => None,
    }
}

fn parse_hex_digits(digits: &str) -> Option<Color> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(Color::from_hex)
}

fn named(name: &str) -> Option<Color> {
    let hex = match name {
        "black" => 0x000000,
        "white" => 0xffffff,
        "red" => 0xff0000,
        "green" => 0x008000,
        "blue" => 0x0000ff,
        "yellow" => 0xffff00,
        "cyan" => 0x00ffff,
        "magenta" => 0xff00ff,
        "gray" | "grey" => 0x808080,
        "orange" => 0xffa500,
        _ => return None,
    };
    Color::from_hex(hex)
}
