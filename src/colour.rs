use serde::{Deserialize, Serialize};

/// A fill colour for text runs, expressed in one of the PDF device colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    #[serde(rename = "rgb")]
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    #[serde(rename = "cmyk")]
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// Colours used by the report layout
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    /// Report title
    pub const ACCENT: Colour = Colour::RGB {
        r: 0.0,
        g: 0.4,
        b: 0.7,
    };
    /// Section headers
    pub const CHARCOAL: Colour = Colour::RGB {
        r: 0.2,
        g: 0.2,
        b: 0.2,
    };
    /// Footer attribution
    pub const MUTED: Colour = Colour::RGB {
        r: 0.5,
        g: 0.5,
        b: 0.5,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuples_become_rgb() {
        let c: Colour = (0.0f32, 0.4f32, 0.7f32).into();
        assert_eq!(c, colours::ACCENT);
    }

    #[test]
    fn colours_serialize_by_space() {
        let json = serde_json::to_string(&colours::RED).expect("serializes");
        assert_eq!(json, r#"{"rgb":{"r":1.0,"g":0.0,"b":0.0}}"#);
        let grey: Colour = serde_json::from_str(r#"{"grey":{"g":0.5}}"#).expect("deserializes");
        assert_eq!(grey, Colour::new_grey(0.5));
    }
}
