//! Seeded random plist tree generator.
//!
//! Produces arbitrary [`PlistValue`] trees from an explicit seed so a
//! failing differential test reproduces byte for byte. Every node kind
//! the codec understands is reachable, including dates, uids, and
//! non-ASCII strings.

use bplist_codec::{PlistDate, PlistValue};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Shape profile for generated trees.
#[derive(Debug, Clone)]
pub struct RandomPlistOptions {
    /// Deepest container nesting generated.
    pub max_depth: usize,
    /// Largest child count per container.
    pub max_children: usize,
    /// Chance in percent that a node below `max_depth` is a container.
    pub container_chance: u32,
}

impl Default for RandomPlistOptions {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_children: 8,
            container_chance: 40,
        }
    }
}

/// Random plist tree generator with a deterministic seed.
pub struct RandomPlist {
    rng: Xoshiro256PlusPlus,
    options: RandomPlistOptions,
}

impl RandomPlist {
    pub fn new(seed: u64) -> Self {
        Self::with_options(seed, RandomPlistOptions::default())
    }

    pub fn with_options(seed: u64, options: RandomPlistOptions) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            options,
        }
    }

    /// Generates the next tree.
    pub fn value(&mut self) -> PlistValue {
        self.value_at(0)
    }

    fn value_at(&mut self, depth: usize) -> PlistValue {
        let make_container = depth < self.options.max_depth
            && self.rng.gen_range(0u32..100) < self.options.container_chance;
        if make_container {
            if self.rng.gen::<bool>() {
                self.array_at(depth)
            } else {
                self.dict_at(depth)
            }
        } else {
            self.scalar()
        }
    }

    fn array_at(&mut self, depth: usize) -> PlistValue {
        let len = self.rng.gen_range(0..=self.options.max_children);
        PlistValue::Array((0..len).map(|_| self.value_at(depth + 1)).collect())
    }

    fn dict_at(&mut self, depth: usize) -> PlistValue {
        let len = self.rng.gen_range(0..=self.options.max_children);
        let mut dict = PlistValue::Dict(Vec::new());
        for i in 0..len {
            // suffix keeps keys unique regardless of the random stem
            let key = format!("{}-{}", self.string(), i);
            let value = self.value_at(depth + 1);
            let _ = dict.dict_set(key, value);
        }
        dict
    }

    fn scalar(&mut self) -> PlistValue {
        match self.rng.gen_range(0..8) {
            0 => PlistValue::Null,
            1 => PlistValue::Bool(self.rng.gen()),
            2 => PlistValue::Integer(self.rng.gen()),
            3 => {
                // finite reals only; NaN would break tree equality
                PlistValue::Real(self.rng.gen_range(-1.0e12..1.0e12))
            }
            4 => {
                let millis = self.rng.gen_range(-(1i64 << 50)..(1i64 << 50));
                PlistValue::Date(PlistDate::from_unix_millis(millis))
            }
            5 => PlistValue::Str(self.string()),
            6 => {
                let len = self.rng.gen_range(0..48);
                PlistValue::Bytes((0..len).map(|_| self.rng.gen()).collect())
            }
            _ => PlistValue::Uid(self.rng.gen::<u32>() as u64),
        }
    }

    fn string(&mut self) -> String {
        const ALPHABET: &[char] = &[
            'a', 'b', 'c', 'd', 'e', 'f', 'g', 'x', 'y', 'z', '0', '7', ' ', '/', '~', 'é', 'ß',
            '✅', '中', '𝄞',
        ];
        let len = self.rng.gen_range(0..16);
        (0..len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())])
            .collect()
    }
}
