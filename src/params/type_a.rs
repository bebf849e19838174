//! Type A curve parameters: `y^2 = x^3 + x` over `F_q` with embedding degree 2.
//!
//! The group order `r` is a Solinas prime and `q = h*r - 1` with the cofactor `h`
//! a multiple of 12. Since then `q = -1 mod 12`, the quadratic extension can be
//! represented as `F_q[i]` with `i^2 = -1`, and cube roots in `F_q` are cheap.

use super::{solinas, Attempts, ParameterMap, SearchControl, Sign, TYPE_KEY};
use crate::error::{Error, Result};
use crate::util::{byte_len, is_probable_prime, rand_below, rand_below_pow2, rand_bool, to_padded_bytes};
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

/// Value of the `type` key for this family.
pub const CURVE_TYPE: &str = "a";

/// Cofactor candidates tried per group order before a new order is drawn.
const COFACTOR_ATTEMPTS: usize = 10;

/// Every cofactor is a multiple of this.
const COFACTOR_MULTIPLE: u32 = 12;

/// Accepted field moduli have between `qbits - Q_BITS_SLACK` and `qbits` bits.
const Q_BITS_SLACK: usize = 3;

/// Smallest supported distance between `qbits` and `rbits`.
const MIN_COFACTOR_BITS: usize = 6;

/// Parameters of a type A curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAParameters {
    /// Field modulus.
    pub q: BigUint,
    /// Prime group order, `2^exp2 + sign1*2^exp1 + sign0`.
    pub r: BigUint,
    /// Cofactor, `q = h*r - 1`.
    pub h: BigUint,
    pub exp1: usize,
    pub exp2: usize,
    pub sign0: Sign,
    pub sign1: Sign,
    /// Big-endian `x || y` of a curve point before cofactor multiplication.
    pub gen_no_cofac: Option<BigUint>,
}

impl TypeAParameters {
    pub fn to_map(&self) -> ParameterMap {
        let mut map = ParameterMap::new();
        map.put(TYPE_KEY, CURVE_TYPE);
        map.put("q", &self.q);
        map.put("r", &self.r);
        map.put("h", &self.h);
        map.put("exp1", self.exp1);
        map.put("exp2", self.exp2);
        map.put("sign0", self.sign0);
        map.put("sign1", self.sign1);

        if let Some(gen) = &self.gen_no_cofac {
            map.put("genNoCofac", gen);
        }

        map
    }

    /// A negative `genNoCofac` is read as the two's complement of `x || y`.
    pub fn from_map(map: &ParameterMap) -> Result<Self> {
        let q: BigUint = map.parse("q")?;
        let gen_no_cofac = if map.contains_key("genNoCofac") {
            Some(parse_point(map, 2 * byte_len(&q))?)
        } else {
            None
        };

        Ok(TypeAParameters {
            q,
            r: map.parse("r")?,
            h: map.parse("h")?,
            exp1: map.parse("exp1")?,
            exp2: map.parse("exp2")?,
            sign0: map.parse("sign0")?,
            sign1: map.parse("sign1")?,
            gen_no_cofac,
        })
    }

    /// Checks the algebraic relations between the parameters.
    ///
    /// `r` must match its Solinas witnesses, `h` must be a multiple of 12,
    /// `q = h*r - 1`, and both `q` and `r` must be probably prime.
    pub fn is_consistent(&self) -> bool {
        let r = solinas::SolinasPrime::evaluate(self.exp1, self.exp2, self.sign0, self.sign1);
        let multiple = BigUint::from(COFACTOR_MULTIPLE);

        r == self.r
            && !self.h.is_zero()
            && (&self.h % &multiple).is_zero()
            && &self.h * &self.r == &self.q + BigUint::one()
            && is_probable_prime(&self.r)
            && is_probable_prime(&self.q)
    }
}

/// Generator for [`TypeAParameters`] with a `rbits`-bit group order and a field
/// modulus of at most `qbits` bits.
#[derive(Clone, Debug)]
pub struct TypeACurveGenerator {
    rbits: usize,
    qbits: usize,
    generate_curve_field_gen: bool,
}

impl TypeACurveGenerator {
    pub fn new(rbits: usize, qbits: usize) -> Result<Self> {
        if rbits < 3 {
            return Err(Error::InvalidConfig(format!(
                "rbits must be at least 3, got {}",
                rbits
            )));
        }

        if qbits < rbits + MIN_COFACTOR_BITS {
            return Err(Error::InvalidConfig(format!(
                "qbits ({}) must exceed rbits ({}) by at least {}",
                qbits, rbits, MIN_COFACTOR_BITS
            )));
        }

        Ok(TypeACurveGenerator {
            rbits,
            qbits,
            generate_curve_field_gen: false,
        })
    }

    /// Also emit `genNoCofac`, a curve point before cofactor multiplication.
    pub fn with_generator(mut self, generate: bool) -> Self {
        self.generate_curve_field_gen = generate;
        self
    }

    pub fn rbits(&self) -> usize {
        self.rbits
    }

    pub fn qbits(&self) -> usize {
        self.qbits
    }

    pub fn generate<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<TypeAParameters> {
        self.generate_with(rng, &SearchControl::unbounded())
    }

    pub fn generate_with<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        control: &SearchControl<'_>,
    ) -> Result<TypeAParameters> {
        debug!(rbits = self.rbits, qbits = self.qbits, "searching type a parameters");

        let mut attempts = Attempts::new(control);
        let multiple = BigUint::from(COFACTOR_MULTIPLE);

        loop {
            let r = solinas::generate(self.rbits, rng, &mut attempts)?;

            for _ in 0..COFACTOR_ATTEMPTS {
                attempts.tick()?;

                // h = 12*u keeps (hr)^2 large enough against finite field attacks
                let h = rand_below_pow2(rng, self.cofactor_bits()) * &multiple;
                if h.is_zero() {
                    continue;
                }

                let q = &h * &r.value - BigUint::one();
                if !self.accepts_modulus(&q) {
                    trace!(bits = q.bits(), "field modulus outside the requested size");
                    continue;
                }

                if !is_probable_prime(&q) {
                    continue;
                }

                let gen_no_cofac = if self.generate_curve_field_gen {
                    Some(point_without_cofactor(&q, rng, &mut attempts)?)
                } else {
                    None
                };

                debug!(
                    exp1 = r.exp1,
                    exp2 = r.exp2,
                    qbits = q.bits(),
                    attempts = attempts.count(),
                    "found type a parameters"
                );

                return Ok(TypeAParameters {
                    q,
                    r: r.value,
                    h,
                    exp1: r.exp1,
                    exp2: r.exp2,
                    sign0: r.sign0,
                    sign1: r.sign1,
                    gen_no_cofac,
                });
            }

            trace!(exp1 = r.exp1, exp2 = r.exp2, "no prime field modulus, drawing a new order");
        }
    }

    fn cofactor_bits(&self) -> usize {
        core::cmp::max(self.qbits - self.rbits - 3, 3)
    }

    fn accepts_modulus(&self, q: &BigUint) -> bool {
        let bits = q.bits();
        bits <= self.qbits && bits + Q_BITS_SLACK >= self.qbits
    }
}

/// Picks a random point `(x, y)` on `y^2 = x^3 + x` over `F_q` and encodes it as
/// the big-endian integer `x || y`, both coordinates padded to the size of `q`.
///
/// Requires `q = 3 mod 4` so that `t^((q+1)/4)` is a square root of a residue `t`.
fn point_without_cofactor<R: RngCore + CryptoRng>(
    q: &BigUint,
    rng: &mut R,
    attempts: &mut Attempts<'_, '_>,
) -> Result<BigUint> {
    let sqrt_exp = (q + BigUint::one()) >> 2;
    let len = byte_len(q);

    loop {
        attempts.tick()?;

        let x = rand_below(rng, q);
        let t = (&x * &x * &x + &x) % q;
        if t.is_zero() {
            continue;
        }

        let mut y = t.modpow(&sqrt_exp, q);
        if (&y * &y) % q != t {
            continue;
        }

        if rand_bool(rng) {
            y = q - &y;
        }

        let mut bytes = to_padded_bytes(&x, len);
        bytes.extend_from_slice(&to_padded_bytes(&y, len));

        return Ok(BigUint::from_bytes_be(&bytes));
    }
}

/// Reads `genNoCofac` as an unsigned integer, or as a signed one of `len` bytes.
fn parse_point(map: &ParameterMap, len: usize) -> Result<BigUint> {
    const KEY: &str = "genNoCofac";

    let value = map.require(KEY)?.trim();
    let magnitude = match value.strip_prefix('-') {
        Some(magnitude) => magnitude,
        None => return map.parse(KEY),
    };

    let magnitude: BigUint = magnitude
        .parse()
        .map_err(|_| Error::MalformedParameter(KEY.to_string()))?;
    let modulus = BigUint::one() << (8 * len);
    if magnitude.is_zero() || magnitude > (&modulus >> 1) {
        return Err(Error::MalformedParameter(KEY.to_string()));
    }

    Ok(modulus - magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicBool;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    test_generator_determinism!(deterministic_small, TypeACurveGenerator::new(32, 96).unwrap());

    #[test]
    fn generate_160_512() {
        let mut rng = ChaCha20Rng::seed_from_u64(160_512);
        let params = TypeACurveGenerator::new(160, 512)
            .unwrap()
            .generate(&mut rng)
            .unwrap();

        let map = params.to_map();
        assert_eq!(map.get("type"), Some("a"));

        let r: BigUint = map.parse("r").unwrap();
        let q: BigUint = map.parse("q").unwrap();
        assert!(r.bits() == 160 || r.bits() == 161);
        assert!(q.bits() >= 509 && q.bits() <= 512);
        assert_eq!(&q % BigUint::from(12u32), BigUint::from(11u32));
        assert!(params.is_consistent());
    }

    #[test]
    fn structural_relations() {
        let mut rng = rand::thread_rng();
        let generator = TypeACurveGenerator::new(40, 120).unwrap();

        for _ in 0..5 {
            let params = generator.generate(&mut rng).unwrap();

            assert!(params.is_consistent());
            assert!((&params.h % BigUint::from(12u32)).is_zero());
            assert_eq!(&params.h * &params.r - BigUint::one(), params.q);
            assert_eq!(&params.q % BigUint::from(12u32), BigUint::from(11u32));
            assert!(params.gen_no_cofac.is_none());
        }
    }

    #[test]
    fn generator_point_on_curve() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let params = TypeACurveGenerator::new(32, 96)
            .unwrap()
            .with_generator(true)
            .generate(&mut rng)
            .unwrap();

        let q = &params.q;
        let len = byte_len(q);
        let bytes = to_padded_bytes(params.gen_no_cofac.as_ref().unwrap(), 2 * len);
        let x = BigUint::from_bytes_be(&bytes[..len]);
        let y = BigUint::from_bytes_be(&bytes[len..]);

        assert!(&x < q && &y < q);
        assert_eq!((&y * &y) % q, (&x * &x * &x + &x) % q);
        assert_eq!(params.to_map().iter().last().map(|(k, _)| k), Some("genNoCofac"));
    }

    #[test]
    fn signed_generator_point() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut params = TypeACurveGenerator::new(32, 96)
            .unwrap()
            .with_generator(true)
            .generate(&mut rng)
            .unwrap();

        // x with its top bit set reads as a negative signed integer
        let modulus = BigUint::one() << (16 * byte_len(&params.q));
        let gen = &modulus - BigUint::from(12345u32);
        params.gen_no_cofac = Some(gen.clone());

        let mut map = params.to_map();
        map.put("genNoCofac", format!("-{}", &modulus - &gen));
        assert_eq!(TypeAParameters::from_map(&map).unwrap(), params);

        map.put("genNoCofac", format!("-{}", &modulus));
        assert!(matches!(
            TypeAParameters::from_map(&map),
            Err(Error::MalformedParameter(k)) if k == "genNoCofac"
        ));

        map.put("genNoCofac", "-0");
        assert!(TypeAParameters::from_map(&map).is_err());
        map.put("genNoCofac", "-x1");
        assert!(TypeAParameters::from_map(&map).is_err());
    }

    #[test]
    fn map_round_trip_ignores_unknown_keys() {
        let mut rng = rand::thread_rng();
        let params = TypeACurveGenerator::new(24, 64)
            .unwrap()
            .generate(&mut rng)
            .unwrap();

        let mut map = params.to_map();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["type", "q", "r", "h", "exp1", "exp2", "sign0", "sign1"]);

        map.put("comment", "ignored");
        assert_eq!(
            crate::params::CurveParameters::from_map(&map).unwrap(),
            crate::params::CurveParameters::TypeA(params)
        );
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(TypeACurveGenerator::new(2, 64), Err(Error::InvalidConfig(_))));
        assert!(matches!(TypeACurveGenerator::new(160, 165), Err(Error::InvalidConfig(_))));
        assert!(TypeACurveGenerator::new(160, 166).is_ok());
    }

    #[test]
    fn bounded_and_cancelled_search() {
        let mut rng = rand::thread_rng();
        let generator = TypeACurveGenerator::new(160, 512).unwrap();

        let control = SearchControl::unbounded().with_max_attempts(1);
        assert!(matches!(
            generator.generate_with(&mut rng, &control),
            Err(Error::SearchExhausted(1))
        ));

        let flag = AtomicBool::new(true);
        let control = SearchControl::unbounded().with_cancel(&flag);
        assert!(matches!(
            generator.generate_with(&mut rng, &control),
            Err(Error::Cancelled)
        ));
    }
}
