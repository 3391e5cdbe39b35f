//! Box Codec
//!
//! Converts between the packed flat bit-state and the 5×5 lane box.
//! Flat bit `W·(5y + x) + z` is lane `(x, y)` bit `z`; flat bit `i` lives in
//! bit `i % 8` of byte `i / 8`.

use crate::types::{StateBox, Width, ZERO_BOX};

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// =============================================================================
// BIT ACCESS
// =============================================================================

/// Read `count` bits (`count <= 64`) starting at flat bit `offset`.
///
/// Bits beyond the end of `bits` read as zero.
pub(crate) fn read_bits(bits: &[u8], offset: usize, count: u32) -> u64 {
    let mut value = 0u64;
    let mut done = 0u32;
    while done < count {
        let pos = offset + done as usize;
        let byte = bits.get(pos / 8).copied().unwrap_or(0);
        let shift = (pos % 8) as u32;
        let take = (8 - shift).min(count - done);
        let chunk = (u64::from(byte) >> shift) & ((1u64 << take) - 1);
        value |= chunk << done;
        done += take;
    }
    value
}

/// Write the low `count` bits of `value` starting at flat bit `offset`.
pub(crate) fn write_bits(bits: &mut [u8], offset: usize, count: u32, value: u64) {
    let mut done = 0u32;
    while done < count {
        let pos = offset + done as usize;
        let shift = (pos % 8) as u32;
        let take = (8 - shift).min(count - done);
        let mask = (((1u16 << take) - 1) as u8) << shift;
        let chunk = (((value >> done) as u8) << shift) & mask;
        if let Some(byte) = bits.get_mut(pos / 8) {
            *byte = (*byte & !mask) | chunk;
        }
        done += take;
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Unpack a flat bit-state into lanes.
pub fn to_box(bits: &[u8], width: Width) -> StateBox {
    let w = width.lane_bits();
    let mut state = ZERO_BOX;
    for y in 0..5 {
        for x in 0..5 {
            state[x][y] = read_bits(bits, w as usize * (5 * y + x), w);
        }
    }
    state
}

/// Pack lanes into a flat bit-state of `width.state_bytes()` bytes.
pub fn to_bits(state: &StateBox, width: Width) -> Vec<u8> {
    let mut out = vec![0u8; width.state_bytes()];
    write_box(state, width, &mut out);
    out
}

/// Pack lanes into an existing buffer; bits past the buffer are dropped.
pub fn write_box(state: &StateBox, width: Width, out: &mut [u8]) {
    let w = width.lane_bits();
    let mask = width.lane_mask();
    for y in 0..5 {
        for x in 0..5 {
            write_bits(out, w as usize * (5 * y + x), w, state[x][y] & mask);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SUPPORTED_WIDTHS;

    fn pattern(len: usize, seed: u8) -> Vec<u8> {
        (0..len)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect()
    }

    #[test]
    fn roundtrip_every_width() {
        for &bits in &SUPPORTED_WIDTHS {
            let width = Width::new(bits).unwrap_or(Width::F1600);
            let mut flat = pattern(width.state_bytes(), 7);
            // Clear the padding bits of the last byte.
            let tail = bits % 8;
            if tail != 0 {
                if let Some(last) = flat.last_mut() {
                    *last &= (1u8 << tail) - 1;
                }
            }
            assert_eq!(to_bits(&to_box(&flat, width), width), flat, "width {bits}");
        }
    }

    #[test]
    fn f1600_layout_is_little_endian_lanes() {
        let flat = pattern(200, 3);
        let state = to_box(&flat, Width::F1600);
        for y in 0..5 {
            for x in 0..5 {
                let off = 8 * (5 * y + x);
                let mut lane = [0u8; 8];
                lane.copy_from_slice(&flat[off..off + 8]);
                assert_eq!(state[x][y], u64::from_le_bytes(lane));
            }
        }
    }

    #[test]
    fn narrow_lanes_pack_across_bytes() {
        // 50-bit state: two bits per lane, lane (x, y) at bits 2(5y + x).
        let width = Width::new(50).unwrap_or(Width::F1600);
        let mut state = ZERO_BOX;
        state[1][0] = 0b10;
        state[4][4] = 0b01;
        let flat = to_bits(&state, width);
        assert_eq!(flat.len(), 7);
        assert_eq!(flat[0], 0b0000_1000);
        assert_eq!(flat[6], 0b0000_0001);
        assert_eq!(to_box(&flat, width), state);
    }

    #[test]
    fn short_input_reads_as_zero() {
        let state = to_box(&[0xFF], Width::F1600);
        assert_eq!(state[0][0], 0xFF);
        assert_eq!(state[1][0], 0);
    }
}
