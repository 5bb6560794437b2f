// Inline style values written to host page elements.

#[inline]
pub fn pointer_events(enabled: bool) -> &'static str {
    if enabled {
        "all"
    } else {
        "none"
    }
}

#[inline]
pub fn display(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        "none"
    }
}

#[inline]
pub fn opacity_css(opacity: f32) -> String {
    format!("{}", opacity.clamp(0.0, 1.0))
}

/// Computed opacity; unset or unparsable values count as fully opaque.
#[inline]
pub fn parse_opacity(value: &str) -> f32 {
    value
        .trim()
        .parse::<f32>()
        .map(|o| o.clamp(0.0, 1.0))
        .unwrap_or(1.0)
}
