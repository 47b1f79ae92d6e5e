//! Constrained random generation of three vectors.
//!
//! Angles are drawn by rejection sampling: a candidate triple is redrawn
//! until every pair is at least `min_separation` degrees apart. The loop is
//! capped by `max_attempts` so a misconfigured threshold fails instead of
//! spinning forever.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::geometry::{angular_distance, polar_to_cartesian, Point, PolarVector};

/// Largest minimum pairwise separation three angles can satisfy.
pub const MAX_FEASIBLE_SEPARATION: f64 = 120.0;

#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    #[error("minimum separation of {0}° cannot be satisfied by three vectors (must be within 0..=120)")]
    InfeasibleSeparation(f64),
    #[error("length_span must be at least 1")]
    InvalidLengthSpan,
    #[error("length_min {length_min} + length_span {length_span} exceeds the largest length")]
    LengthOverflow { length_min: u32, length_span: u32 },
    #[error("no vector triple {min_separation}° apart found after {attempts} attempts")]
    AttemptsExhausted { attempts: u64, min_separation: f64 },
}

/// Vector labels, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    A,
    B,
    C,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::A, Label::B, Label::C];

    fn index(self) -> usize {
        match self {
            Label::A => 0,
            Label::B => 1,
            Label::C => 2,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Label::A => "A",
            Label::B => "B",
            Label::C => "C",
        };
        f.write_str(s)
    }
}

/// Three labeled vectors and the screen points they resolve to.
///
/// A set is immutable once built; each generation produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSet {
    origin: Point,
    vectors: [PolarVector; 3],
    points: [Point; 3],
}

impl VectorSet {
    /// Resolve `vectors` (in A, B, C order) around `origin`.
    pub fn from_vectors(origin: Point, vectors: [PolarVector; 3]) -> Self {
        let points = vectors.map(|v| polar_to_cartesian(origin, v));
        Self {
            origin,
            vectors,
            points,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn vector(&self, label: Label) -> PolarVector {
        self.vectors[label.index()]
    }

    pub fn point(&self, label: Label) -> Point {
        self.points[label.index()]
    }

    pub fn points(&self) -> [Point; 3] {
        self.points
    }

    /// Pairwise angular distances in AB, AC, BC order.
    pub fn separations(&self) -> [f64; 3] {
        separations(&self.vectors.map(|v| v.angle_degrees))
    }

    pub fn min_separation(&self) -> f64 {
        self.separations().into_iter().fold(f64::INFINITY, f64::min)
    }
}

impl fmt::Display for VectorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in Label::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", label, self.vector(*label))?;
        }
        let [ab, ac, bc] = self.separations();
        write!(f, " | dAB={}°, dAC={}°, dBC={}°", ab, ac, bc)
    }
}

fn separations(angles: &[u32; 3]) -> [f64; 3] {
    let [a, b, c] = angles.map(f64::from);
    [
        angular_distance(a, b),
        angular_distance(a, c),
        angular_distance(b, c),
    ]
}

/// Produces vector sets that honor the configured minimum separation.
pub struct Generator<R = StdRng> {
    config: GeneratorConfig,
    origin: Point,
    rng: R,
}

impl Generator<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_entropy(config: GeneratorConfig, origin: Point) -> Result<Self, GenerateError> {
        Self::new(config, origin, StdRng::from_os_rng())
    }

    /// Deterministic generator: the same seed yields the same sequence of sets.
    pub fn seeded(
        config: GeneratorConfig,
        origin: Point,
        seed: u64,
    ) -> Result<Self, GenerateError> {
        Self::new(config, origin, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(config: GeneratorConfig, origin: Point, rng: R) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self {
            config,
            origin,
            rng,
        })
    }

    /// Uniform integer length in `[length_min, length_min + length_span)`.
    pub fn random_length(&mut self) -> u32 {
        self.config.length_min + self.rng.random_range(0..self.config.length_span)
    }

    fn random_angle(&mut self) -> u32 {
        self.rng.random_range(0..360)
    }

    /// Draw a fresh vector set.
    pub fn generate(&mut self) -> Result<VectorSet, GenerateError> {
        let lengths = [
            self.random_length(),
            self.random_length(),
            self.random_length(),
        ];
        let min_separation = self.config.min_separation;

        let mut attempts = 0u64;
        let angles = loop {
            if attempts >= self.config.max_attempts {
                return Err(GenerateError::AttemptsExhausted {
                    attempts,
                    min_separation,
                });
            }
            attempts += 1;

            let angles = [self.random_angle(), self.random_angle(), self.random_angle()];
            if separations(&angles).iter().all(|&d| d >= min_separation) {
                break angles;
            }
        };
        let vectors = [0, 1, 2].map(|i| PolarVector::new(lengths[i], angles[i]));
        let set = VectorSet::from_vectors(self.origin, vectors);
        debug!(
            "Accepted after {} attempts, tightest pair {}°",
            attempts,
            set.min_separation()
        );
        info!("Generated vectors: {}", set);
        Ok(set)
    }
}
