use num_bigint_dig::{prime::probably_prime, BigUint, RandBigInt};
use rand::{CryptoRng, Rng, RngCore};
use tiny_keccak::Hasher;

/// Size of a compressed G1 group element.
pub(crate) const G1_BYTES: usize = 48;

/// Number of Miller-Rabin rounds every generated prime has to survive.
pub const PRIME_CERTAINTY: usize = 10;

#[inline(always)]
pub fn is_probable_prime(n: &BigUint) -> bool {
    probably_prime(n, PRIME_CERTAINTY)
}

#[inline(always)]
pub fn rand_bool<R: RngCore + CryptoRng>(rng: &mut R) -> bool {
    rng.gen::<bool>()
}

/// Uniform integer in `[0, 2^bits)`.
#[inline(always)]
pub fn rand_below_pow2<R: RngCore + CryptoRng>(rng: &mut R, bits: usize) -> BigUint {
    rng.gen_biguint(bits)
}

/// Uniform integer in `[0, limit)`.
#[inline(always)]
pub fn rand_below<R: RngCore + CryptoRng>(rng: &mut R, limit: &BigUint) -> BigUint {
    rng.gen_biguint_below(limit)
}

/// True when the bit length of `n` fills its last byte completely.
pub fn is_byte_aligned(n: &BigUint) -> bool {
    let bits = n.bits();
    (bits + 7) / 8 == bits / 8
}

/// Number of bytes needed to hold `n`.
pub fn byte_len(n: &BigUint) -> usize {
    (n.bits() + 7) / 8
}

/// Big-endian encoding of `n`, left padded with zeroes to `len` bytes.
pub fn to_padded_bytes(n: &BigUint, len: usize) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    let mut buf = vec![0u8; len.saturating_sub(bytes.len())];
    buf.extend_from_slice(&bytes);

    buf
}

/// Absorbs every slice in order and squeezes `len` bytes out of SHAKE256.
pub fn shake256(slices: &[&[u8]], len: usize) -> Vec<u8> {
    let mut digest = tiny_keccak::Shake::v256();
    for slice in slices {
        digest.update(slice);
    }

    let mut buf = vec![0u8; len];
    digest.finalize(&mut buf);

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_alignment() {
        assert!(is_byte_aligned(&BigUint::from(0xffu32)));
        assert!(is_byte_aligned(&BigUint::from(0x80_00u32)));
        assert!(!is_byte_aligned(&BigUint::from(0x7fu32)));
        assert!(!is_byte_aligned(&BigUint::from(0x1_00u32)));
    }

    #[test]
    fn padded_encoding() {
        let n = BigUint::from(0x0102u32);
        assert_eq!(to_padded_bytes(&n, 4), [0, 0, 1, 2]);
        assert_eq!(to_padded_bytes(&n, 1), [1, 2]);
    }

    #[test]
    fn shake_output_length() {
        let a = shake256(&["abc".as_bytes()], 16);
        let b = shake256(&["abc".as_bytes()], 40);

        assert_eq!(a.len(), 16);
        assert_eq!(&b[..16], &a[..]);
        assert_ne!(shake256(&["ab".as_bytes(), "c".as_bytes()], 16), shake256(&["abd".as_bytes()], 16));
    }

    #[test]
    fn small_primes() {
        assert!(is_probable_prime(&BigUint::from(65537u32)));
        assert!(!is_probable_prime(&BigUint::from(65535u32)));
    }
}
