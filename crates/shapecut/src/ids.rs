//! Shape ID allocation.
//!
//! An element keeps its own `id` when it is an integer nobody in this run
//! has taken yet. Everything else gets a synthesized ID. The allocator is
//! created per extraction run, so two documents processed side by side never
//! see each other's IDs.

use std::collections::HashSet;

use crate::config::IdStrategy;
use crate::geometry::ShapeId;

/// Synthesized hashed IDs land in `[0, HASHED_ID_RANGE)`.
pub const HASHED_ID_RANGE: u64 = 4000;

/// Give up on random probing after this many collisions.
const MAX_HASH_ATTEMPTS: usize = 4 * HASHED_ID_RANGE as usize;

/// Hands out unique IDs for one extraction run.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    strategy: IdStrategy,
    used: HashSet<ShapeId>,
    /// Next candidate for sequential allocation
    next: ShapeId,
}

impl IdAllocator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            used: HashSet::new(),
            next: 0,
        }
    }

    /// IDs handed out so far.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn is_used(&self, id: ShapeId) -> bool {
        self.used.contains(&id)
    }

    /// Allocate an ID for an element with the given `id` attribute.
    pub fn allocate(&mut self, element_id: Option<&str>) -> ShapeId {
        if let Some(parsed) = element_id.and_then(|s| s.trim().parse::<ShapeId>().ok()) {
            if self.used.insert(parsed) {
                return parsed;
            }
        }

        let id = match self.strategy {
            IdStrategy::Sequential => self.next_sequential(),
            IdStrategy::Hashed { salt } => self.next_hashed(element_id.unwrap_or(""), salt),
        };
        self.used.insert(id);
        id
    }

    fn next_sequential(&mut self) -> ShapeId {
        while self.used.contains(&self.next) {
            self.next += 1;
        }
        self.next
    }

    fn next_hashed(&mut self, element_id: &str, salt: u64) -> ShapeId {
        let mut probe = Probe::new(fnv1a(element_id.as_bytes()) ^ salt);
        for _ in 0..MAX_HASH_ATTEMPTS {
            let candidate = (probe.next_u64() % HASHED_ID_RANGE) as ShapeId;
            if !self.used.contains(&candidate) {
                return candidate;
            }
        }

        // Range is (nearly) full: step past it instead of looping forever.
        self.next = self.next.max(HASHED_ID_RANGE as ShapeId);
        self.next_sequential()
    }
}

/// FNV-1a, stable across runs and platforms (unlike `DefaultHasher`).
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Collision probe sequence: an LCG seeded from the hash.
struct Probe {
    state: u64,
}

impl Probe {
    fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self.state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // High bits have the better period
        self.state >> 33
    }
}
