//! Render style options: module shapes and hex colors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Shape used for data modules (`dot_style`) or finder patterns (`eye_style`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrStyle {
    #[default]
    Square,
    Rounded,
    Circle,
    Gapped,
}

impl QrStyle {
    pub const ALL: [QrStyle; 4] = [
        QrStyle::Square,
        QrStyle::Rounded,
        QrStyle::Circle,
        QrStyle::Gapped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QrStyle::Square => "square",
            QrStyle::Rounded => "rounded",
            QrStyle::Circle => "circle",
            QrStyle::Gapped => "gapped",
        }
    }
}

impl fmt::Display for QrStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "square" => Ok(QrStyle::Square),
            "rounded" => Ok(QrStyle::Rounded),
            "circle" => Ok(QrStyle::Circle),
            "gapped" => Ok(QrStyle::Gapped),
            _ => Err(Error::InvalidStyle(s.to_string())),
        }
    }
}

/// An RGB color parsed from `#rgb` or `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor { r: 0, g: 0, b: 0 };
    pub const WHITE: HexColor = HexColor {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };

    pub fn parse(s: &str) -> crate::error::Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 0x11)
                };
                Ok(Self {
                    r: digit(0).map_err(|_| invalid())?,
                    g: digit(1).map_err(|_| invalid())?,
                    b: digit(2).map_err(|_| invalid())?,
                })
            }
            6 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                Ok(Self {
                    r: pair(0).map_err(|_| invalid())?,
                    g: pair(2).map_err(|_| invalid())?,
                    b: pair(4).map_err(|_| invalid())?,
                })
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HexColor::parse(s)
    }
}
