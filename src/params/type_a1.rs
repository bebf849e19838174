//! Type A1 curve parameters: `y^2 = x^3 + x` over `F_p` with a composite group order.
//!
//! The order `n` is a product of distinct Solinas primes and `p = l*n - 1` for the
//! smallest multiple of four `l` that makes `p` prime. Both `n` and `p` are required
//! to fill their last byte completely, which keeps serialized elements compact.

use super::{solinas, Attempts, ParameterMap, SearchControl, TYPE_KEY};
use crate::error::{Error, Result};
use crate::util::{is_byte_aligned, is_probable_prime};
use num_bigint_dig::BigUint;
use num_traits::One;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

/// Value of the `type` key for this family.
pub const CURVE_TYPE: &str = "a1";

/// Step between successive cofactor candidates `l`.
const COFACTOR_STEP: u64 = 4;

/// Parameters of a type A1 curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeA1Parameters {
    /// Field modulus, `p = l*n - 1`.
    pub p: BigUint,
    /// Group order, the product of all `factors`.
    pub n: BigUint,
    /// Pairwise distinct Solinas primes.
    pub factors: Vec<BigUint>,
    pub l: u64,
}

impl TypeA1Parameters {
    pub fn to_map(&self) -> ParameterMap {
        let mut map = ParameterMap::new();
        map.put(TYPE_KEY, CURVE_TYPE);
        map.put("p", &self.p);
        map.put("n", &self.n);
        for (i, factor) in self.factors.iter().enumerate() {
            map.put(format!("n{}", i), factor);
        }
        map.put("l", self.l);

        map
    }

    /// Factors are read from `n0`, `n1`, ... up to the first missing index.
    pub fn from_map(map: &ParameterMap) -> Result<Self> {
        let mut factors = Vec::new();
        while map.contains_key(&format!("n{}", factors.len())) {
            factors.push(map.parse(&format!("n{}", factors.len()))?);
        }

        if factors.is_empty() {
            return Err(Error::MissingParameter("n0".to_string()));
        }

        Ok(TypeA1Parameters {
            p: map.parse("p")?,
            n: map.parse("n")?,
            factors,
            l: map.parse("l")?,
        })
    }

    /// Checks the algebraic relations between the parameters.
    pub fn is_consistent(&self) -> bool {
        let distinct = self
            .factors
            .iter()
            .enumerate()
            .all(|(i, f)| !self.factors[..i].contains(f));
        let product = self
            .factors
            .iter()
            .fold(BigUint::one(), |acc, f| acc * f);

        distinct
            && product == self.n
            && self.l % COFACTOR_STEP == 0
            && &self.n * BigUint::from(self.l) == &self.p + BigUint::one()
            && is_byte_aligned(&self.n)
            && is_byte_aligned(&self.p)
            && self.factors.iter().all(is_probable_prime)
            && is_probable_prime(&self.p)
    }
}

/// Steps of the type A1 search.
///
/// A misaligned order restarts from `SamplingFactors`; so does a misaligned
/// modulus, because the order determines every modulus candidate.
#[derive(Debug)]
enum State {
    SamplingFactors,
    CheckingOrderAlignment {
        factors: Vec<BigUint>,
        order: BigUint,
    },
    SearchingModulus {
        factors: Vec<BigUint>,
        order: BigUint,
        l: u64,
    },
    CheckingModulusAlignment {
        factors: Vec<BigUint>,
        order: BigUint,
        l: u64,
        p: BigUint,
    },
    Done(TypeA1Parameters),
}

/// Generator for [`TypeA1Parameters`] with `num_primes` factors of `bits` bits each.
#[derive(Clone, Debug)]
pub struct TypeA1CurveGenerator {
    num_primes: usize,
    bits: usize,
}

impl TypeA1CurveGenerator {
    pub fn new(num_primes: usize, bits: usize) -> Result<Self> {
        if num_primes == 0 {
            return Err(Error::InvalidConfig("at least one prime factor is required".to_string()));
        }

        if bits < 3 {
            return Err(Error::InvalidConfig(format!(
                "prime factors need at least 3 bits, got {}",
                bits
            )));
        }

        let primes = solinas::all_primes(bits);
        if primes.len() < num_primes {
            return Err(Error::InvalidConfig(format!(
                "only {} distinct solinas primes of {} bits exist, {} requested",
                primes.len(),
                bits,
                num_primes
            )));
        }

        let (min_bits, max_bits) = order_bit_range(&primes, num_primes);
        if max_bits / 8 * 8 < min_bits {
            return Err(Error::InvalidConfig(format!(
                "a product of {} primes of {} bits has {} to {} bits and is never byte aligned",
                num_primes, bits, min_bits, max_bits
            )));
        }

        Ok(TypeA1CurveGenerator { num_primes, bits })
    }

    pub fn num_primes(&self) -> usize {
        self.num_primes
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn generate<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<TypeA1Parameters> {
        self.generate_with(rng, &SearchControl::unbounded())
    }

    pub fn generate_with<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        control: &SearchControl<'_>,
    ) -> Result<TypeA1Parameters> {
        debug!(
            num_primes = self.num_primes,
            bits = self.bits,
            "searching type a1 parameters"
        );

        let mut attempts = Attempts::new(control);
        let mut state = State::SamplingFactors;

        loop {
            attempts.tick()?;

            state = match state {
                State::SamplingFactors => match self.sample_factors(rng, &mut attempts)? {
                    Some(factors) => {
                        let order = factors.iter().fold(BigUint::one(), |acc, f| acc * f);
                        State::CheckingOrderAlignment { factors, order }
                    }
                    None => {
                        trace!("duplicate prime factor, resampling the batch");
                        State::SamplingFactors
                    }
                },
                State::CheckingOrderAlignment { factors, order } => {
                    if is_byte_aligned(&order) {
                        State::SearchingModulus {
                            factors,
                            order,
                            l: COFACTOR_STEP,
                        }
                    } else {
                        trace!(bits = order.bits(), "group order not byte aligned");
                        State::SamplingFactors
                    }
                }
                State::SearchingModulus { factors, order, l } => {
                    let p = &order * BigUint::from(l) - BigUint::one();
                    if is_probable_prime(&p) {
                        State::CheckingModulusAlignment { factors, order, l, p }
                    } else {
                        State::SearchingModulus {
                            factors,
                            order,
                            l: l + COFACTOR_STEP,
                        }
                    }
                }
                State::CheckingModulusAlignment { factors, order, l, p } => {
                    if is_byte_aligned(&p) {
                        State::Done(TypeA1Parameters {
                            p,
                            n: order,
                            factors,
                            l,
                        })
                    } else {
                        trace!(bits = p.bits(), l, "field modulus not byte aligned");
                        State::SamplingFactors
                    }
                }
                State::Done(params) => {
                    debug!(
                        pbits = params.p.bits(),
                        nbits = params.n.bits(),
                        l = params.l,
                        attempts = attempts.count(),
                        "found type a1 parameters"
                    );

                    return Ok(params);
                }
            };
        }
    }

    /// Draws `num_primes` Solinas primes, or `None` as soon as one repeats.
    fn sample_factors<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        attempts: &mut Attempts<'_, '_>,
    ) -> Result<Option<Vec<BigUint>>> {
        let mut factors: Vec<BigUint> = Vec::with_capacity(self.num_primes);

        for _ in 0..self.num_primes {
            let prime = solinas::generate(self.bits, rng, attempts)?.value;
            if factors.contains(&prime) {
                return Ok(None);
            }

            factors.push(prime);
        }

        Ok(Some(factors))
    }
}

/// Smallest and largest bit length of a product of `count` distinct entries of the
/// ascending list `primes`.
fn order_bit_range(primes: &[BigUint], count: usize) -> (usize, usize) {
    let product = |factors: &[BigUint]| factors.iter().fold(BigUint::one(), |acc, f| acc * f);

    (
        product(&primes[..count]).bits(),
        product(&primes[primes.len() - count..]).bits(),
    )
}
