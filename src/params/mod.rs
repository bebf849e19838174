//! Generation of pairing-friendly curve parameters.
//!
//! Two curve families are supported:
//! - Type A: the supersingular curve `y^2 = x^3 + x` over `F_q`, with a prime order
//!   subgroup of Solinas-prime order `r` and `q = h*r - 1` (see [`type_a`]);
//! - Type A1: the same curve equation over `F_p` with a composite group order `n`
//!   made of distinct Solinas primes and `p = l*n - 1` (see [`type_a1`]).
//!
//! Generated parameters are strongly typed ([`CurveParameters`]). They convert to and
//! from the ordered string mapping ([`ParameterMap`]) that consumers such as pairing
//! engines read.
//!
//! # Example
//!
//! ```
//! use pbc_kit::params::{CurveGenerator, TypeA1CurveGenerator};
//!
//! let mut rng = rand::thread_rng();
//! let generator = CurveGenerator::TypeA1(TypeA1CurveGenerator::new(3, 16).unwrap());
//! let params = generator.generate(&mut rng).unwrap();
//!
//! println!("{}", params.to_map());
//! ```

pub mod solinas;
pub mod type_a;
pub mod type_a1;

pub use type_a::{TypeACurveGenerator, TypeAParameters};
pub use type_a1::{TypeA1CurveGenerator, TypeA1Parameters};

use crate::error::{Error, Result};
use core::fmt;
use core::str::FromStr;
use core::sync::atomic::{AtomicBool, Ordering};
use rand::{CryptoRng, RngCore};

/// Key holding the curve family discriminator.
pub const TYPE_KEY: &str = "type";

/// Ordered mapping from parameter names to decimal strings.
///
/// Insertion order is kept so that the rendered form is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<(String, String)>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. An existing key keeps its position.
    pub fn put<K: Into<String>, V: ToString>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.to_string();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Looks up `key` and fails when it is absent.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::MissingParameter(key.to_string()))
    }

    /// Parses the value under `key` as a base-10 number.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<T> {
        self.require(key)?
            .trim()
            .parse()
            .map_err(|_| Error::MalformedParameter(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders one `key value` pair per line.
impl fmt::Display for ParameterMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "{} {}", key, value)?;
        }

        Ok(())
    }
}

/// Sign of a term in a Solinas prime `2^exp2 + sign1*2^exp1 + sign0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn as_i32(self) -> i32 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

impl FromStr for Sign {
    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, ()> {
        match s {
            "1" | "+1" => Ok(Sign::Plus),
            "-1" => Ok(Sign::Minus),
            _ => Err(()),
        }
    }
}

/// Parameters of one of the supported curve families.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurveParameters {
    TypeA(TypeAParameters),
    TypeA1(TypeA1Parameters),
}

impl CurveParameters {
    /// Value of the `type` discriminator.
    pub fn curve_type(&self) -> &'static str {
        match self {
            CurveParameters::TypeA(_) => type_a::CURVE_TYPE,
            CurveParameters::TypeA1(_) => type_a1::CURVE_TYPE,
        }
    }

    /// Converts into the ordered wire form.
    pub fn to_map(&self) -> ParameterMap {
        match self {
            CurveParameters::TypeA(params) => params.to_map(),
            CurveParameters::TypeA1(params) => params.to_map(),
        }
    }

    /// Reads parameters back from the wire form, dispatching on `type`.
    ///
    /// Keys that do not belong to the family are ignored.
    pub fn from_map(map: &ParameterMap) -> Result<Self> {
        match map.require(TYPE_KEY)? {
            type_a::CURVE_TYPE => TypeAParameters::from_map(map).map(CurveParameters::TypeA),
            type_a1::CURVE_TYPE => TypeA1Parameters::from_map(map).map(CurveParameters::TypeA1),
            other => Err(Error::UnknownCurveType(other.to_string())),
        }
    }
}

impl From<TypeAParameters> for CurveParameters {
    fn from(params: TypeAParameters) -> Self {
        CurveParameters::TypeA(params)
    }
}

impl From<TypeA1Parameters> for CurveParameters {
    fn from(params: TypeA1Parameters) -> Self {
        CurveParameters::TypeA1(params)
    }
}

/// Controls how long a randomized parameter search may run.
///
/// Every iteration of a search loop is a checkpoint: the cancellation flag is
/// polled and the attempt budget, if any, is charged.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchControl<'a> {
    cancel: Option<&'a AtomicBool>,
    max_attempts: Option<u64>,
}

impl<'a> SearchControl<'a> {
    /// Unbounded, uncancellable search.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Stops the search with [`Error::Cancelled`] once `flag` is set.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Stops the search with [`Error::SearchExhausted`] after `attempts` iterations.
    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub(crate) fn checkpoint(&self, attempt: u64) -> Result<()> {
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(Error::Cancelled);
            }
        }

        match self.max_attempts {
            Some(max) if attempt >= max => Err(Error::SearchExhausted(max)),
            _ => Ok(()),
        }
    }
}

/// Iteration counter charged against a [`SearchControl`].
#[derive(Debug)]
pub(crate) struct Attempts<'c, 'a> {
    control: &'c SearchControl<'a>,
    count: u64,
}

impl<'c, 'a> Attempts<'c, 'a> {
    pub(crate) fn new(control: &'c SearchControl<'a>) -> Self {
        Attempts { control, count: 0 }
    }

    pub(crate) fn tick(&mut self) -> Result<()> {
        self.control.checkpoint(self.count)?;
        self.count += 1;

        Ok(())
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }
}

/// Configured curve parameter generator.
#[derive(Clone, Debug)]
pub enum CurveGenerator {
    TypeA(TypeACurveGenerator),
    TypeA1(TypeA1CurveGenerator),
}

impl CurveGenerator {
    /// Runs the configured search until it succeeds.
    pub fn generate<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<CurveParameters> {
        self.generate_with(rng, &SearchControl::unbounded())
    }

    /// Runs the configured search under `control`.
    pub fn generate_with<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        control: &SearchControl<'_>,
    ) -> Result<CurveParameters> {
        match self {
            CurveGenerator::TypeA(generator) => generator.generate_with(rng, control).map(Into::into),
            CurveGenerator::TypeA1(generator) => generator.generate_with(rng, control).map(Into::into),
        }
    }
}

impl From<TypeACurveGenerator> for CurveGenerator {
    fn from(generator: TypeACurveGenerator) -> Self {
        CurveGenerator::TypeA(generator)
    }
}

impl From<TypeA1CurveGenerator> for CurveGenerator {
    fn from(generator: TypeA1CurveGenerator) -> Self {
        CurveGenerator::TypeA1(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_insertion_order() {
        let mut map = ParameterMap::new();
        map.put("type", "a");
        map.put("q", 11);
        map.put("r", 3);
        map.put("q", 23);

        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["type", "q", "r"]);
        assert_eq!(map.get("q"), Some("23"));
        assert_eq!(map.to_string(), "type a\nq 23\nr 3\n");
    }

    #[test]
    fn map_parse_errors() {
        let mut map = ParameterMap::new();
        map.put("l", "four");

        assert!(matches!(map.parse::<u64>("l"), Err(Error::MalformedParameter(k)) if k == "l"));
        assert!(matches!(map.parse::<u64>("p"), Err(Error::MissingParameter(k)) if k == "p"));
    }

    #[test]
    fn unknown_curve_type() {
        let mut map = ParameterMap::new();
        map.put("type", "d");

        assert!(matches!(
            CurveParameters::from_map(&map),
            Err(Error::UnknownCurveType(t)) if t == "d"
        ));
    }

    #[test]
    fn sign_wire_form() {
        assert_eq!(Sign::Plus.to_string(), "1");
        assert_eq!(Sign::Minus.to_string(), "-1");
        assert_eq!("-1".parse::<Sign>(), Ok(Sign::Minus));
        assert!("0".parse::<Sign>().is_err());
    }

    #[test]
    fn control_budget_and_cancel() {
        let control = SearchControl::unbounded().with_max_attempts(2);
        let mut attempts = Attempts::new(&control);
        assert!(attempts.tick().is_ok());
        assert!(attempts.tick().is_ok());
        assert!(matches!(attempts.tick(), Err(Error::SearchExhausted(2))));

        let flag = AtomicBool::new(true);
        let control = SearchControl::unbounded().with_cancel(&flag);
        assert!(matches!(Attempts::new(&control).tick(), Err(Error::Cancelled)));
    }
}
