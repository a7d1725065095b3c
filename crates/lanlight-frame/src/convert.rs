//! Little-endian field access and 16-bit normalization helpers.
//!
//! Scaled fields travel as `round(v / max * 65535)` and come back as
//! `w / 65535 * max`. Rounding is half away from zero (`f64::round`).

/// Full scale of a normalized 16-bit wire field.
pub const WIRE_MAX: f64 = u16::MAX as f64;

/// Scale `value` in `0..=max` to the 16-bit wire range.
pub fn scale_to_wire(value: f64, max: f64) -> u16 {
    let scaled = (value / max * WIRE_MAX).round();
    // Saturating cast; callers validate the range before scaling.
    scaled as u16
}

/// Scale a 16-bit wire value back to `0..=max`.
pub fn scale_from_wire(wire: u16, max: f64) -> f64 {
    f64::from(wire) / WIRE_MAX * max
}

/// Read a little-endian `u16` at `offset`.
pub fn u16_at(buf: &[u8], offset: usize) -> Option<u16> {
    let bytes = buf.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian `u32` at `offset`.
pub fn u32_at(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset.checked_add(4)?)?;
    let mut raw = [0u8; 4];
    raw.copy_from_slice(bytes);
    Some(u32::from_le_bytes(raw))
}

/// Read a little-endian `u64` at `offset`.
pub fn u64_at(buf: &[u8], offset: usize) -> Option<u64> {
    let bytes = buf.get(offset..offset.checked_add(8)?)?;
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    Some(u64::from_le_bytes(raw))
}

/// Milliseconds for a 32-bit duration field, saturating at `u32::MAX`.
pub fn duration_to_millis(duration: std::time::Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn scale_endpoints() {
        assert_eq!(scale_to_wire(0.0, 1.0), 0);
        assert_eq!(scale_to_wire(1.0, 1.0), u16::MAX);
        assert_eq!(scale_to_wire(360.0, 360.0), u16::MAX);
        assert_eq!(scale_from_wire(u16::MAX, 360.0), 360.0);
        assert_eq!(scale_from_wire(0, 1.0), 0.0);
    }

    #[test]
    fn scale_rounds_half_away_from_zero() {
        // 0.5 * 65535 = 32767.5
        assert_eq!(scale_to_wire(0.5, 1.0), 32768);
        assert_eq!(scale_to_wire(180.0, 360.0), 32768);
    }

    #[test]
    fn scale_roundtrip_within_one_step() {
        let step = 1.0 / WIRE_MAX;
        for i in 0..=1000 {
            let value = f64::from(i) / 1000.0;
            let back = scale_from_wire(scale_to_wire(value, 1.0), 1.0);
            assert!((back - value).abs() <= step, "value {value} came back as {back}");
        }
    }

    #[test]
    fn reads_little_endian_fields() {
        let buf = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0, 0, 0, 0];
        assert_eq!(u16_at(&buf, 0), Some(0x1234));
        assert_eq!(u32_at(&buf, 2), Some(0x1234_5678));
        assert_eq!(u64_at(&buf, 2), Some(0x1234_5678));
    }

    #[test]
    fn reads_past_end_return_none() {
        let buf = [0u8; 3];
        assert_eq!(u16_at(&buf, 2), None);
        assert_eq!(u32_at(&buf, 0), None);
        assert_eq!(u64_at(&buf, usize::MAX), None);
    }

    #[test]
    fn duration_saturates() {
        assert_eq!(duration_to_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(duration_to_millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }
}
