use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("expected a color in #RRGGBB form, got '{0}'")]
pub struct ColorParseError(String);

/// RGB color triple for box overlays.
///
/// The UI side supplies colors as `#RRGGBB` strings (color-picker
/// output); everything past the boundary works with the parsed triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (case-insensitive hex digits).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        let channel = |range| u8::from_str_radix(&hex[range], 16).expect("digits checked above");
        Ok(Self {
            r: channel(0..2),
            g: channel(2..4),
            b: channel(4..6),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::green("#00FF00", Color::new(0, 255, 0))]
    #[case::lowercase("#ff8000", Color::new(255, 128, 0))]
    #[case::black("#000000", Color::new(0, 0, 0))]
    #[case::white("#FFFFFF", Color::new(255, 255, 255))]
    fn test_from_hex_valid(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(Color::from_hex(input), Ok(expected));
    }

    #[rstest]
    #[case::missing_hash("00FF00")]
    #[case::too_short("#0F0")]
    #[case::too_long("#00FF0000")]
    #[case::non_hex("#00GG00")]
    #[case::empty("")]
    fn test_from_hex_invalid(#[case] input: &str) {
        assert_eq!(
            Color::from_hex(input),
            Err(ColorParseError(input.to_string()))
        );
    }
}
