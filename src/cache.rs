//! Computed table for BDD operations.
//!
//! Caches results of recursive operations to avoid redundant computation.
//! The table has a fixed number of slots and is lossy: a colliding insert
//! evicts the older entry. The cache is only valid while every cached node
//! is alive, so it is cleared on every garbage collection.

use std::cell::Cell;

use crate::reference::Ref;

/// Binary boolean connectives supported by [`Bdd::apply`][crate::bdd::Bdd::apply].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    And,
    Or,
    Xor,
    Biimp,
}

impl BinOp {
    /// Evaluate the connective on two constants.
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            BinOp::And => a && b,
            BinOp::Or => a || b,
            BinOp::Xor => a != b,
            BinOp::Biimp => a == b,
        }
    }
}

/// Cache key for all memoized operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKey {
    Apply(BinOp, Ref, Ref),
    Not(Ref),
    Ite(Ref, Ref, Ref),
    Exists(Ref, Ref),
    Forall(Ref, Ref),
    Replace(Ref, u64),
}

impl OpKey {
    /// Key for a binary connective. All supported connectives are
    /// commutative, so operands are normalized.
    pub fn apply(op: BinOp, f: Ref, g: Ref) -> Self {
        let (f, g) = if f <= g { (f, g) } else { (g, f) };
        OpKey::Apply(op, f, g)
    }
}

/// Szudzik pairing, wrapping on overflow.
fn pairing2(a: u64, b: u64) -> u64 {
    if a < b {
        b.wrapping_mul(b).wrapping_add(a)
    } else {
        a.wrapping_mul(a).wrapping_add(a).wrapping_add(b)
    }
}

fn pairing3(a: u64, b: u64, c: u64) -> u64 {
    pairing2(pairing2(a, b), c)
}

impl OpKey {
    /// Slot hash. Distinct keys may collide; the full key is compared on lookup.
    pub fn hash64(&self) -> u64 {
        let r = |f: &Ref| f.raw() as u64;
        match self {
            OpKey::Apply(op, f, g) => pairing3(*op as u64, r(f), r(g)),
            OpKey::Not(f) => pairing2(4, r(f)),
            OpKey::Ite(f, g, h) => pairing2(5, pairing3(r(f), r(g), r(h))),
            OpKey::Exists(f, s) => pairing3(6, r(f), r(s)),
            OpKey::Forall(f, s) => pairing3(7, r(f), r(s)),
            OpKey::Replace(f, id) => pairing3(8, r(f), *id),
        }
    }
}

/// Direct-mapped operation cache with `2^bits` slots.
///
/// Each key has exactly one slot (`hash & bitmask`); inserting into an
/// occupied slot overwrites the previous entry, so the table never grows.
pub struct Cache {
    data: Vec<Option<(OpKey, Ref)>>,
    bitmask: u64,
    occupied: usize,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl Cache {
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Cache size too big: 2^{}", bits);
        let size = 1 << bits;
        let mut data = Vec::with_capacity(size);
        data.resize_with(size, || None);
        Self {
            data,
            bitmask: (size - 1) as u64,
            occupied: 0,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    fn index(&self, key: &OpKey) -> usize {
        (key.hash64() & self.bitmask) as usize
    }

    /// Look up a cached result.
    pub fn get(&self, key: &OpKey) -> Option<Ref> {
        match &self.data[self.index(key)] {
            Some((k, res)) if k == key => {
                self.hits.set(self.hits.get() + 1);
                Some(*res)
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Insert a result, evicting whatever occupied the slot.
    pub fn insert(&mut self, key: OpKey, value: Ref) {
        let index = self.index(&key);
        let slot = &mut self.data[index];
        if slot.is_none() {
            self.occupied += 1;
        }
        *slot = Some((key, value));
    }

    /// Clear the cache.
    pub fn clear(&mut self) {
        self.data.fill_with(|| None);
        self.occupied = 0;
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }
}
