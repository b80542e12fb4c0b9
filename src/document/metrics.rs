//! Static glyph-width tables for the three PDF base-14 families we emit.
//!
//! Widths come from the Adobe core-font AFM files, in thousandths of an em.
//! Tables cover ASCII 0x20..=0x7E; index = (char as usize) - 32.
//! Oblique/italic faces reuse the upright table, which is exact for Helvetica
//! and Courier and within a few percent for Times.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::units::PT_TO_MM;

/// Font family used for every text run in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

/// Face within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Italic => "F3",
        }
    }
}

impl FontFamily {
    /// PostScript name of the standard Type1 font for this face.
    pub fn base_font(self, face: FontFace) -> &'static str {
        match (self, face) {
            (Self::Helvetica, FontFace::Regular) => "Helvetica",
            (Self::Helvetica, FontFace::Bold) => "Helvetica-Bold",
            (Self::Helvetica, FontFace::Italic) => "Helvetica-Oblique",
            (Self::Times, FontFace::Regular) => "Times-Roman",
            (Self::Times, FontFace::Bold) => "Times-Bold",
            (Self::Times, FontFace::Italic) => "Times-Italic",
            (Self::Courier, FontFace::Regular) => "Courier",
            (Self::Courier, FontFace::Bold) => "Courier-Bold",
            (Self::Courier, FontFace::Italic) => "Courier-Oblique",
        }
    }

    pub fn metrics(self, face: FontFace) -> &'static FontMetricTable {
        match (self, face) {
            (Self::Helvetica, FontFace::Bold) => &HELVETICA_BOLD_TABLE,
            (Self::Helvetica, _) => &HELVETICA_TABLE,
            (Self::Times, FontFace::Bold) => &TIMES_BOLD_TABLE,
            (Self::Times, _) => &TIMES_TABLE,
            (Self::Courier, _) => &COURIER_TABLE,
        }
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "helvetica" | "arial" | "sans" => Ok(Self::Helvetica),
            "times" | "times-roman" | "serif" => Ok(Self::Times),
            "courier" | "mono" => Ok(Self::Courier),
            other => Err(format!(
                "unknown font family '{other}' (expected helvetica, times or courier)"
            )),
        }
    }
}

/// Character-width table for one font face.
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback for Latin-1 characters outside the ASCII range.
    average_char_width: u16,
    bullet_width: u16,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if c == '\u{2022}' {
            self.bullet_width
        } else {
            self.average_char_width
        }
    }

    /// Width of `s` in thousandths of an em.
    pub fn measure_units(&self, s: &str) -> u32 {
        s.chars().map(|c| u32::from(self.char_width(c))).sum()
    }

    /// Width of `s` in millimetres when set at `size_pt`.
    pub fn measure_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_units(s) as f32 / 1000.0 * size_pt * PT_TO_MM
    }
}

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A-M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N-Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a-m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n-z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
    bullet_width: 350,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        333, 333, 584, 584, 584, 611, 975,
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        333, 278, 333, 584, 556, 333,
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        389, 280, 389, 584,
    ],
    average_char_width: 611,
    bullet_width: 350,
};

static TIMES_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        278, 278, 564, 564, 564, 444, 921,
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        333, 278, 333, 469, 500, 333,
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        480, 200, 480, 541,
    ],
    average_char_width: 500,
    bullet_width: 350,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 930,
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        333, 278, 333, 581, 500, 333,
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        394, 220, 394, 520,
    ],
    average_char_width: 556,
    bullet_width: 350,
};

static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [600; 95],
    average_char_width: 600,
    bullet_width: 600,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_units_empty_is_zero() {
        let table = FontFamily::Helvetica.metrics(FontFace::Regular);
        assert_eq!(table.measure_units(""), 0);
    }

    #[test]
    fn test_measure_units_ascii() {
        let table = FontFamily::Helvetica.metrics(FontFace::Regular);
        // P(667) + i(222) + p(556) + e(556)
        assert_eq!(table.measure_units("Pipe"), 2001);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Furnish and install all rough-in";
        let regular = FontFamily::Helvetica.metrics(FontFace::Regular);
        let bold = FontFamily::Helvetica.metrics(FontFace::Bold);
        assert!(bold.measure_units(text) > regular.measure_units(text));
    }

    #[test]
    fn test_courier_is_monospaced() {
        let table = FontFamily::Courier.metrics(FontFace::Regular);
        assert_eq!(table.measure_units("iiii"), table.measure_units("WWWW"));
    }

    #[test]
    fn test_bullet_has_its_own_width() {
        let table = FontFamily::Times.metrics(FontFace::Regular);
        assert_eq!(table.measure_units("\u{2022}"), 350);
    }

    #[test]
    fn test_measure_mm_scales_with_size() {
        let table = FontFamily::Helvetica.metrics(FontFace::Regular);
        let small = table.measure_mm("Valve", 10.0);
        let large = table.measure_mm("Valve", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_font_family_from_str() {
        assert_eq!("Times".parse::<FontFamily>(), Ok(FontFamily::Times));
        assert_eq!("courier".parse::<FontFamily>(), Ok(FontFamily::Courier));
        assert!("comic-sans".parse::<FontFamily>().is_err());
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(FontFamily::Helvetica.base_font(FontFace::Italic), "Helvetica-Oblique");
        assert_eq!(FontFamily::Times.base_font(FontFace::Regular), "Times-Roman");
    }
}
