//! CSS length interpretation
//!
//! Pure mapping from a CSS length string to either a value usable as a
//! static node property or a GDScript expression evaluated at scene start.
//! Used for box-model spacing and font sizes alike.

use crate::error::{ConvertError, Result};

/// Fixed root/base font size assumed for `rem`/`em` (no inheritance tracking).
const BASE_FONT_PX: f64 = 16.0;

/// Outcome of interpreting one CSS length.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// Resolved to a fixed number at build time.
    Static(f64),
    /// Needs a runtime expression; only the target engine knows the value.
    Runtime(String),
    /// A keyword sentinel (`auto`) that never becomes a number.
    Literal(String),
}

/// Interpret a single CSS length/unit string.
///
/// Unknown suffixes and unparseable magnitudes are `MalformedLength`
/// errors; the caller decides whether that aborts the run.
pub fn interpret(raw: &str) -> Result<CssValue> {
    let value = raw.trim();

    if value == "auto" {
        return Ok(CssValue::Literal("auto".to_string()));
    }
    if let Some(number) = value.strip_suffix("px") {
        return Ok(CssValue::Static(parse_number(number, raw)?));
    }
    if let Some(number) = value.strip_suffix('%') {
        return Ok(CssValue::Static(parse_number(number, raw)? * 0.01));
    }
    if let Some(number) = value.strip_suffix("vh") {
        let scale = parse_number(number, raw)? * 0.01;
        return Ok(CssValue::Runtime(format!(
            "{} * get_viewport().get_visible_rect().size.y",
            scale
        )));
    }
    if let Some(number) = value.strip_suffix("vw") {
        let scale = parse_number(number, raw)? * 0.01;
        return Ok(CssValue::Runtime(format!(
            "{} * get_viewport().get_visible_rect().size.x",
            scale
        )));
    }
    // rem before em: "2rem" also ends in "em"
    if let Some(number) = value.strip_suffix("rem") {
        return Ok(CssValue::Static(parse_number(number, raw)? * BASE_FONT_PX));
    }
    if let Some(number) = value.strip_suffix("em") {
        return Ok(CssValue::Static(parse_number(number, raw)? * BASE_FONT_PX));
    }

    match value.parse::<f64>() {
        Ok(number) => Ok(CssValue::Static(number)),
        Err(_) => Err(ConvertError::malformed_length(raw)),
    }
}

fn parse_number(text: &str, raw: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ConvertError::malformed_length(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_static() {
        assert_eq!(interpret("16px").unwrap(), CssValue::Static(16.0));
    }

    #[test]
    fn percent_scales_to_fraction() {
        assert_eq!(interpret("50%").unwrap(), CssValue::Static(0.5));
    }

    #[test]
    fn rem_assumes_sixteen_pixel_root() {
        assert_eq!(interpret("2rem").unwrap(), CssValue::Static(32.0));
        assert_eq!(interpret("1em").unwrap(), CssValue::Static(16.0));
    }

    #[test]
    fn viewport_height_becomes_runtime_expression() {
        match interpret("10vh").unwrap() {
            CssValue::Runtime(expr) => {
                assert!(expr.starts_with("0.1 *"));
                assert!(expr.contains("size.y"));
            }
            other => panic!("expected runtime value, got {:?}", other),
        }
    }

    #[test]
    fn viewport_width_uses_x_axis() {
        match interpret("25vw").unwrap() {
            CssValue::Runtime(expr) => {
                assert!(expr.starts_with("0.25 *"));
                assert!(expr.contains("size.x"));
            }
            other => panic!("expected runtime value, got {:?}", other),
        }
    }

    #[test]
    fn auto_is_a_literal_sentinel() {
        assert_eq!(
            interpret("auto").unwrap(),
            CssValue::Literal("auto".to_string())
        );
    }

    #[test]
    fn bare_numbers_parse() {
        assert_eq!(interpret("12").unwrap(), CssValue::Static(12.0));
    }

    #[test]
    fn unknown_suffix_is_rejected() {
        assert!(matches!(
            interpret("7q"),
            Err(ConvertError::MalformedLength { .. })
        ));
        assert!(matches!(
            interpret("xpx"),
            Err(ConvertError::MalformedLength { .. })
        ));
    }
}
