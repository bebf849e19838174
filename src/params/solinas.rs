//! Solinas primes, i.e. primes of the form `2^a +- 2^b +- 1` with `0 < b < a`.
//!
//! Reduction modulo such a prime only needs a few shifts and additions.

use super::{Attempts, Sign};
use crate::error::Result;
use crate::util::{is_probable_prime, rand_bool};
use num_bigint_dig::BigUint;
use num_traits::One;
use rand::{CryptoRng, Rng, RngCore};
use tracing::trace;

/// A Solinas prime `2^exp2 + sign1*2^exp1 + sign0` together with its exponents and signs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolinasPrime {
    pub value: BigUint,
    pub exp1: usize,
    pub exp2: usize,
    pub sign0: Sign,
    pub sign1: Sign,
}

impl SolinasPrime {
    /// Recomputes the value from the exponents and signs.
    pub fn evaluate(exp1: usize, exp2: usize, sign0: Sign, sign1: Sign) -> BigUint {
        let one = BigUint::one();
        let high = &one << exp2;
        let low = &one << exp1;

        let r = match sign1 {
            Sign::Plus => high + low,
            Sign::Minus => high - low,
        };

        match sign0 {
            Sign::Plus => r + one,
            Sign::Minus => r - one,
        }
    }
}

/// Draws one Solinas candidate of about `bits` bits. The result may be composite.
///
/// Either `2^(bits-1) + 2^exp1 +- 1` or `2^bits - 2^exp1 +- 1`, with `exp1` uniform
/// in `[1, exp2 - 1]`.
pub fn candidate<R: RngCore + CryptoRng>(bits: usize, rng: &mut R) -> SolinasPrime {
    debug_assert!(bits >= 3);

    let (exp2, sign1) = if rand_bool(rng) {
        (bits - 1, Sign::Plus)
    } else {
        (bits, Sign::Minus)
    };
    let exp1 = rng.gen_range(1..exp2);
    let sign0 = if rand_bool(rng) { Sign::Plus } else { Sign::Minus };

    SolinasPrime {
        value: SolinasPrime::evaluate(exp1, exp2, sign0, sign1),
        exp1,
        exp2,
        sign0,
        sign1,
    }
}

/// Every candidate [`candidate`] can draw for `bits`, without duplicates.
pub fn all_candidates(bits: usize) -> Vec<BigUint> {
    let mut values: Vec<BigUint> = Vec::new();

    for &(exp2, sign1) in [(bits - 1, Sign::Plus), (bits, Sign::Minus)].iter() {
        for exp1 in 1..exp2 {
            for &sign0 in [Sign::Plus, Sign::Minus].iter() {
                let value = SolinasPrime::evaluate(exp1, exp2, sign0, sign1);
                if !values.contains(&value) {
                    values.push(value);
                }
            }
        }
    }

    values
}

/// Every Solinas prime of `bits` bits [`generate`] can return, in ascending order.
pub fn all_primes(bits: usize) -> Vec<BigUint> {
    let mut primes: Vec<BigUint> = all_candidates(bits)
        .into_iter()
        .filter(is_probable_prime)
        .collect();
    primes.sort();

    primes
}

/// Samples candidates until one passes the primality test.
pub(crate) fn generate<R: RngCore + CryptoRng>(
    bits: usize,
    rng: &mut R,
    attempts: &mut Attempts<'_, '_>,
) -> Result<SolinasPrime> {
    loop {
        attempts.tick()?;

        let prime = candidate(bits, rng);
        if is_probable_prime(&prime.value) {
            return Ok(prime);
        }

        trace!(exp1 = prime.exp1, exp2 = prime.exp2, "solinas candidate is composite");
    }
}
