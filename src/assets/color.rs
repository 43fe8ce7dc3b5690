use crate::foundation::core::Rgba8;
use crate::foundation::error::{FramesmithError, FramesmithResult};

/// Parse a catalog color string.
///
/// Accepted forms (case-insensitive, surrounding whitespace ignored):
/// `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`, `rgba(r, g, b, a)`, `hsl(h, s%, l%)`,
/// `hsla(h, s%, l%, a)` and `transparent`.
pub fn parse_css_color(s: &str) -> FramesmithResult<Rgba8> {
    let s = s.trim();
    let lower = s.to_ascii_lowercase();
    if lower == "transparent" {
        return Ok(Rgba8::transparent());
    }
    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = func_args(&lower, "rgba").or_else(|| func_args(&lower, "rgb")) {
        return parse_rgb_args(&args);
    }
    if let Some(args) = func_args(&lower, "hsla").or_else(|| func_args(&lower, "hsl")) {
        return parse_hsl_args(&args);
    }
    Err(FramesmithError::validation(format!(
        "unsupported color \"{s}\""
    )))
}

fn func_args(s: &str, name: &str) -> Option<Vec<String>> {
    let rest = s.strip_prefix(name)?.trim_start();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.split(',').map(|p| p.trim().to_owned()).collect())
}

fn parse_hex(hex: &str) -> FramesmithResult<Rgba8> {
    fn byte(pair: &str) -> FramesmithResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| FramesmithError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let doubled: String = [c, c].iter().collect();
                out[i] = byte(&doubled)?;
            }
            Ok(Rgba8::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Rgba8::rgb(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: byte(&hex[6..8])?,
        }),
        _ => Err(FramesmithError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn parse_number(s: &str) -> FramesmithResult<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FramesmithError::validation(format!("invalid color component \"{s}\"")))
}

fn parse_alpha(args: &[String]) -> FramesmithResult<f32> {
    match args.get(3) {
        Some(a) => Ok(parse_number(a)?.clamp(0.0, 1.0) as f32),
        None => Ok(1.0),
    }
}

fn parse_rgb_args(args: &[String]) -> FramesmithResult<Rgba8> {
    if args.len() != 3 && args.len() != 4 {
        return Err(FramesmithError::validation(
            "rgb()/rgba() expects 3 or 4 components",
        ));
    }
    let channel = |s: &str| -> FramesmithResult<u8> {
        Ok(parse_number(s)?.round().clamp(0.0, 255.0) as u8)
    };
    Ok(Rgba8::rgba_f(
        channel(&args[0])?,
        channel(&args[1])?,
        channel(&args[2])?,
        parse_alpha(args)?,
    ))
}

fn parse_hsl_args(args: &[String]) -> FramesmithResult<Rgba8> {
    if args.len() != 3 && args.len() != 4 {
        return Err(FramesmithError::validation(
            "hsl()/hsla() expects 3 or 4 components",
        ));
    }
    let pct = |s: &str| -> FramesmithResult<f64> {
        Ok(parse_number(s.trim_end_matches('%'))? / 100.0)
    };
    let h = parse_number(args[0].trim_end_matches("deg"))?;
    let (r, g, b) = hsl_to_rgb(h, pct(&args[1])?, pct(&args[2])?);
    let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    Ok(Rgba8::rgba_f(to_u8(r), to_u8(g), to_u8(b), parse_alpha(args)?))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return (l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

/// Format a color as `#RRGGBB` (opaque) or `#RRGGBBAA`.
pub fn to_hex(c: Rgba8) -> String {
    if c.a == 255 {
        format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a)
    }
}

/// Serde adapter storing [`Rgba8`] as a CSS color string.
pub mod css {
    use super::{parse_css_color, to_hex};
    use crate::foundation::core::Rgba8;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `#RRGGBB[AA]`.
    pub fn serialize<S: Serializer>(c: &Rgba8, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&to_hex(*c))
    }

    /// Deserialize from any form accepted by [`parse_css_color`].
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgba8, D::Error> {
        let raw = String::deserialize(d)?;
        parse_css_color(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
