//! Bitwise CRC-8 engine shared by the framer and the extractor.
//!
//! The register is seeded with the first payload byte of a block rather than
//! zero. Both directions go through [`block_checksum`], so the two sides can
//! never disagree on seeding or bit order.

/// Default generator polynomial.
pub const DEFAULT_POLYNOMIAL: u8 = 0x87;

/// Advance the register by one input bit.
///
/// If the top bit of `remainder` is set it is first XORed with `polynomial`,
/// then the register shifts left and takes `bit` into its low position.
#[inline]
pub fn step(remainder: u8, bit: bool, polynomial: u8) -> u8 {
    let remainder = if remainder & 0x80 != 0 {
        remainder ^ polynomial
    } else {
        remainder
    };
    (remainder << 1) | u8::from(bit)
}

/// Feed all eight bits of `byte`, most significant first.
#[inline]
pub fn feed_byte(remainder: u8, byte: u8, polynomial: u8) -> u8 {
    (0..8)
        .rev()
        .fold(remainder, |rem, shift| step(rem, (byte >> shift) & 1 == 1, polynomial))
}

/// Drain the eight zero pad bits that close a block.
#[inline]
pub fn finish(remainder: u8, polynomial: u8) -> u8 {
    (0..8).fold(remainder, |rem, _| step(rem, false, polynomial))
}

/// Checksum of one block (1..=8 payload bytes).
///
/// The register starts out holding the first byte, which accounts for that
/// byte's bits; the remaining bytes and the zero pad are then fed through
/// [`step`]. Returns `None` for an empty block, which has no seed.
pub fn block_checksum(block: &[u8], polynomial: u8) -> Option<u8> {
    let (&seed, rest) = block.split_first()?;
    let remainder = rest
        .iter()
        .fold(seed, |rem, &byte| feed_byte(rem, byte, polynomial));
    Some(finish(remainder, polynomial))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_without_top_bit_only_shifts() {
        assert_eq!(step(0b0000_0001, false, DEFAULT_POLYNOMIAL), 0b0000_0010);
        assert_eq!(step(0b0000_0001, true, DEFAULT_POLYNOMIAL), 0b0000_0011);
    }

    #[test]
    fn step_with_top_bit_xors_before_shift() {
        // 0x80 ^ 0x87 = 0x07, shifted = 0x0E
        assert_eq!(step(0x80, false, DEFAULT_POLYNOMIAL), 0x0E);
        assert_eq!(step(0x80, true, DEFAULT_POLYNOMIAL), 0x0F);
    }

    #[test]
    fn feed_byte_is_eight_steps_msb_first() {
        let mut manual = 0x5Au8;
        for bit in [true, false, true, true, false, false, true, false] {
            manual = step(manual, bit, DEFAULT_POLYNOMIAL);
        }
        assert_eq!(feed_byte(0x5A, 0b1011_0010, DEFAULT_POLYNOMIAL), manual);
    }

    #[test]
    fn known_checksums() {
        assert_eq!(block_checksum(b"HELLO", DEFAULT_POLYNOMIAL), Some(0x90));
        assert_eq!(block_checksum(b"A", DEFAULT_POLYNOMIAL), Some(156));
        assert_eq!(block_checksum(b"AB", DEFAULT_POLYNOMIAL), Some(12));
    }

    #[test]
    fn single_byte_block_is_seed_through_zero_pad() {
        assert_eq!(
            block_checksum(&[0x41], DEFAULT_POLYNOMIAL),
            Some(finish(0x41, DEFAULT_POLYNOMIAL))
        );
    }

    #[test]
    fn empty_block_has_no_checksum() {
        assert_eq!(block_checksum(&[], DEFAULT_POLYNOMIAL), None);
    }

    #[test]
    fn polynomial_changes_result() {
        let a = block_checksum(b"HELLO", 0x87);
        let b = block_checksum(b"HELLO", 0x31);
        assert_ne!(a, b);
    }
}
