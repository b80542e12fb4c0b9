//! Branding and the small set of layout options a deployment may change.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::metrics::FontFamily;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const COPPER: Rgb = Rgb(204, 102, 0);
    pub const RED: Rgb = Rgb(204, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 102, 204);
    pub const FOOTER_GREY: Rgb = Rgb(150, 150, 150);

    /// Components scaled to the 0..=1 range PDF color operators expect.
    pub fn unit(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }

    /// Parses `#RRGGBB` (the `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Glyph placed before each content line of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletStyle {
    #[default]
    Dash,
    Dot,
    None,
}

impl BulletStyle {
    /// Prefix for a content line, including the separating space.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Dash => "- ",
            Self::Dot => "\u{2022} ",
            Self::None => "",
        }
    }
}

impl FromStr for BulletStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dash" | "-" => Ok(Self::Dash),
            "dot" | "bullet" | "\u{2022}" => Ok(Self::Dot),
            "none" | "" => Ok(Self::None),
            other => Err(format!(
                "unknown bullet style '{other}' (expected dash, dot or none)"
            )),
        }
    }
}

/// Divider color drawn above each titled section; `None` means no rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DividerPalette {
    pub plumbing: Option<Rgb>,
    pub gas: Option<Rgb>,
    pub inclusions: Option<Rgb>,
    pub exclusions: Option<Rgb>,
    pub terms: Option<Rgb>,
}

impl Default for DividerPalette {
    fn default() -> Self {
        Self {
            plumbing: Some(Rgb::BLUE),
            gas: Some(Rgb::RED),
            inclusions: Some(Rgb::COPPER),
            exclusions: None,
            terms: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStyle {
    pub font: FontFamily,
    pub bullet: BulletStyle,
    pub dividers: DividerPalette,
}

/// Company identity stamped on every page and in the sign-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub company_name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub tagline: String,
    pub signoff: String,
    pub signer_name: String,
    pub signer_title: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "IRON PLUMBING SERVICES".to_string(),
            address: "American Fork, UT 84003".to_string(),
            email: "IRONPLUMBINGUT@gmail.com".to_string(),
            phone: "801-895-5987".to_string(),
            tagline: "Iron Strength, Fluid Precision".to_string(),
            signoff: "- Iron Plumbing Utah".to_string(),
            signer_name: "Jerod Galyean".to_string(),
            signer_title: "Field Manager".to_string(),
        }
    }
}

impl Branding {
    /// The four right-aligned lines of the page header.
    pub fn company_block(&self) -> [&str; 4] {
        [
            self.company_name.as_str(),
            self.address.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#CC6600"), Some(Rgb::COPPER));
        assert_eq!(Rgb::parse_hex("0066cc"), Some(Rgb::BLUE));
        assert_eq!(Rgb::parse_hex("#12345"), None);
        assert_eq!(Rgb::parse_hex("zzzzzz"), None);
    }

    #[test]
    fn test_unit_components() {
        assert_eq!(Rgb(255, 0, 51).unit(), [1.0, 0.0, 0.2]);
    }

    #[test]
    fn test_bullet_prefix() {
        assert_eq!(BulletStyle::Dash.prefix(), "- ");
        assert_eq!(BulletStyle::Dot.prefix(), "\u{2022} ");
        assert_eq!(BulletStyle::None.prefix(), "");
        assert_eq!("dot".parse::<BulletStyle>(), Ok(BulletStyle::Dot));
        assert!("star".parse::<BulletStyle>().is_err());
    }

    #[test]
    fn test_default_palette_matches_brand_colors() {
        let palette = DividerPalette::default();
        assert_eq!(palette.plumbing, Some(Rgb::BLUE));
        assert_eq!(palette.gas, Some(Rgb::RED));
        assert_eq!(palette.inclusions, Some(Rgb::COPPER));
        assert_eq!(palette.exclusions, None);
    }
}
