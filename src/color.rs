/// Converts `#rrggbb` into a CSS `rgb()`/`rgba()` string. Colors that do not
/// parse are returned as-is.
pub fn hex_to_rgb(hex: &str, alpha: Option<f64>) -> String {
    let Some((r, g, b)) = parse_hex(hex) else {
        return hex.to_string();
    };

    match alpha {
        Some(alpha) if alpha != 0.0 => format!("rgba({r}, {g}, {b}, {alpha})"),
        _ => format!("rgb({r}, {g}, {b})"),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
