use palette::Srgb;
use plotters::style::RGBColor;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised colour '{0}', expected a CSS name such as \"red\" or a hex code \"#rrggbb\"")]
pub struct ColorError(pub String);

// ---------------------------------------------------------------------------
// Colour parsing: config string → plotters colour
// ---------------------------------------------------------------------------

/// Parse a CSS colour name (`"red"`, `"steelblue"`) or a hex code
/// (`"#ff0000"`, `"#f00"`) into a colour plotters can stroke with.
pub fn parse_color(spec: &str) -> Result<RGBColor, ColorError> {
    let trimmed = spec.trim();

    let rgb: Srgb<u8> = if trimmed.starts_with('#') {
        trimmed
            .parse()
            .map_err(|_| ColorError(spec.to_string()))?
    } else {
        palette::named::from_str(&trimmed.to_ascii_lowercase())
            .ok_or_else(|| ColorError(spec.to_string()))?
    };

    Ok(RGBColor(rgb.red, rgb.green, rgb.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors() {
        assert_eq!(parse_color("red").unwrap(), RGBColor(255, 0, 0));
        assert_eq!(parse_color(" Black ").unwrap(), RGBColor(0, 0, 0));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_color("#1f77b4").unwrap(), RGBColor(0x1f, 0x77, 0xb4));
        assert_eq!(parse_color("#f00").unwrap(), RGBColor(255, 0, 0));
    }

    #[test]
    fn unknown_color_is_rejected() {
        assert_eq!(
            parse_color("not-a-colour"),
            Err(ColorError("not-a-colour".to_string()))
        );
        assert!(parse_color("#zzzzzz").is_err());
    }
}
