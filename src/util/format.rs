use unicode_width::UnicodeWidthStr;

/// MM:SS readout for the pixel display.
pub fn clock(seconds: u64) -> String {
    let m = seconds / 60;
    let s = seconds % 60;
    format!("{m:02}:{s:02}")
}

pub fn clock_ms(millis: u64) -> String {
    clock(millis / 1000)
}

/// Truncates to the given display width, appending `…` when cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_both_fields() {
        assert_eq!(clock(0), "00:00");
        assert_eq!(clock(61), "01:01");
        assert_eq!(clock(900), "15:00");
        assert_eq!(clock(3000), "50:00");
    }

    #[test]
    fn clock_ms_floors_to_seconds() {
        assert_eq!(clock_ms(1999), "00:01");
        assert_eq!(clock_ms(215_000), "03:35");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("NIGHT_DRIVE", 20), "NIGHT_DRIVE");
        assert_eq!(truncate("NIGHT_DRIVE", 6), "NIGHT…");
    }
}
