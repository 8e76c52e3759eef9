/// The fixed Excalidraw color palette, in declaration order.
///
/// Nearest-neighbor matching ties break toward the earlier entry, so the
/// order here is part of the engine's deterministic behavior.
pub const PALETTE: &[&str] = &[
    "#000000", // black
    "#343a40", // dark gray
    "#495057", // gray
    "#c92a2a", // red
    "#a61e4d", // pink
    "#862e9c", // purple
    "#5f3dc4", // violet
    "#364fc7", // indigo
    "#1864ab", // blue
    "#0b7285", // cyan
    "#087f5b", // teal
    "#2b8a3e", // green
    "#5c940d", // lime
    "#e67700", // orange
    "#d9480f", // red-orange
    "#f08c00", // yellow
    "#ffffff", // white
    "#f8f9fa", // light gray
    "#1971c2", // primary blue
    "#ffd43b", // bright yellow
    "#ff6b6b", // light red
    "#51cf66", // light green
    "#74c0fc", // light blue
    "#d0bfff", // light purple
    "#ffa8a8", // light pink
];

/// Lowercased 6-digit form of a hex color; shorthand `#rgb` expands,
/// 8-digit alpha suffixes are preserved. Non-hex input passes through.
pub(crate) fn normalize_hex(color: &str) -> String {
    let trimmed = color.trim();
    let Some(hex) = trimmed.strip_prefix('#') else {
        return trimmed.to_ascii_lowercase();
    };
    match hex.len() {
        3 => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for ch in hex.chars() {
                let c = ch.to_ascii_lowercase();
                out.push(c);
                out.push(c);
            }
            out
        }
        6 | 8 => format!("#{}", hex.to_ascii_lowercase()),
        _ => trimmed.to_ascii_lowercase(),
    }
}

/// Parse a color into RGB, accepting `#rgb`/`#rrggbb`/`#rrggbbaa` (alpha
/// ignored) plus the named colors the icon corpus actually uses.
pub(crate) fn parse_rgb(color: &str) -> Option<[u8; 3]> {
    let normalized = normalize_hex(color);
    match normalized.as_str() {
        "white" => return Some([0xff, 0xff, 0xff]),
        "black" => return Some([0x00, 0x00, 0x00]),
        _ => {}
    }
    let hex = normalized.strip_prefix('#')?;
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Whether a color value reads as plain white.
pub(crate) fn is_white(color: &str) -> bool {
    matches!(normalize_hex(color).as_str(), "white" | "#ffffff")
}

/// Deterministic nearest-neighbor lookup into [`PALETTE`].
///
/// `none`/`transparent` map to `"transparent"`; unparsable colors fall back
/// to black. Distance is squared RGB distance; ties break by palette
/// declaration order.
pub fn nearest_palette_color(color: &str) -> &'static str {
    let lowered = color.trim().to_ascii_lowercase();
    if lowered.is_empty() || lowered == "none" || lowered == "transparent" {
        return "transparent";
    }
    let Some(target) = parse_rgb(&lowered) else {
        return "#000000";
    };

    let mut best = PALETTE[0];
    let mut best_dist = u32::MAX;
    for &candidate in PALETTE {
        let rgb = parse_rgb(candidate).unwrap_or([0, 0, 0]);
        let dist = rgb
            .iter()
            .zip(&target)
            .map(|(&a, &b)| {
                let d = i32::from(a) - i32::from(b);
                (d * d) as u32
            })
            .sum::<u32>();
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    best
}
