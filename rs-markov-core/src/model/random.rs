use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Source of uniformly distributed unsigned integers.
///
/// The model only ever asks for one integer at a time and reduces it modulo
/// the total count of a distribution. Any generator whose output is uniform
/// over the full `u64` range is suitable; a fixed source makes generation
/// fully reproducible.
pub trait RandomSource {
	fn next_uint(&mut self) -> u64;
}

/// Closures returning `u64` are random sources, which keeps deterministic
/// fakes short: `|| 0u64` always picks the first successor.
impl<F: FnMut() -> u64> RandomSource for F {
	fn next_uint(&mut self) -> u64 {
		self()
	}
}

/// Adapter turning any `rand` generator into a `RandomSource`.
#[derive(Clone, Debug)]
pub struct RngSource<R> {
	rng: R,
}

impl<R: RngCore> RngSource<R> {
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl RngSource<StdRng> {
	/// Reproducible source: the same seed yields the same stream.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}

	/// Source seeded from the operating system.
	pub fn from_os() -> Self {
		Self::new(StdRng::from_os_rng())
	}
}

impl<R: RngCore> RandomSource for RngSource<R> {
	fn next_uint(&mut self) -> u64 {
		self.rng.next_u64()
	}
}
