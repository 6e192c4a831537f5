//! 8-bit intensity arithmetic: scaling, interpolation and easing.

/// Multiplies `value` by `scale / 255`, rounding to nearest.
///
/// `scale8(v, 255) == v` and `scale8(v, 0) == 0` for every `v`.
#[inline]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * scale as u16 + 127) / 255) as u8
}

/// Linear interpolation from `from` to `to` at `position` out of `span`.
///
/// `from` may be greater than `to` for falling ramps. A zero `span` means the
/// ramp is already complete and yields `to`; positions past the span clamp.
#[inline]
pub fn lerp8(from: u8, to: u8, position: u32, span: u32) -> u8 {
    if span == 0 {
        return to;
    }
    let position = position.min(span) as u64;
    let span = span as u64;

    if to >= from {
        let delta = ((to - from) as u64 * position) / span;
        from + delta as u8
    } else {
        let delta = ((from - to) as u64 * position) / span;
        from - delta as u8
    }
}

/// Symmetric quadratic ease-in/ease-out over the full 8-bit domain.
#[inline]
pub const fn ease8_in_out(x: u8) -> u8 {
    let upper = x & 0x80 != 0;
    let y = (if upper { 255 - x } else { x }) as u16;
    let z = (y * y) >> 7;
    let out = if z > 255 { 255 } else { z as u8 };
    if upper { 255 - out } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale8_identity_and_zero() {
        for v in 0..=255u8 {
            assert_eq!(scale8(v, 255), v);
            assert_eq!(scale8(v, 0), 0);
        }
    }

    #[test]
    fn scale8_rounds_to_nearest() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(1, 128), 1);
        assert_eq!(scale8(1, 127), 0);
    }

    #[test]
    fn lerp8_endpoints() {
        assert_eq!(lerp8(0, 255, 0, 1000), 0);
        assert_eq!(lerp8(0, 255, 1000, 1000), 255);
        assert_eq!(lerp8(0, 255, 500, 1000), 127);
        assert_eq!(lerp8(255, 0, 500, 1000), 128);
        assert_eq!(lerp8(20, 255, 0, 10), 20);
    }

    #[test]
    fn lerp8_zero_span_is_complete() {
        assert_eq!(lerp8(0, 200, 0, 0), 200);
        assert_eq!(lerp8(200, 0, 7, 0), 0);
    }

    #[test]
    fn lerp8_clamps_past_span() {
        assert_eq!(lerp8(0, 255, 5000, 1000), 255);
    }

    #[test]
    fn ease8_is_symmetric_and_monotonic() {
        assert_eq!(ease8_in_out(0), 0);
        assert_eq!(ease8_in_out(255), 255);
        let mut previous = 0;
        for x in 0..=255u8 {
            let y = ease8_in_out(x);
            assert!(y >= previous);
            assert_eq!(y, 255 - ease8_in_out(255 - x));
            previous = y;
        }
    }
}
