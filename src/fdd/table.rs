use log::debug;

use crate::bdd::Bdd;
use crate::error::{Error, Result};
use crate::fdd::domain::{bit_width, Domain};
use crate::types::Var;

/// Registry of finite domain blocks.
///
/// The table binds to the manager passed to its first successful
/// [`extend`][Domains::extend] and rejects every other manager with
/// [`Error::State`] until [`teardown`][Domains::teardown].
#[derive(Debug, Default)]
pub struct Domains {
    domains: Vec<Domain>,
    engine: Option<u64>,
}

impl Domains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Allocated block capacity. Grows, never shrinks while blocks are live.
    pub fn capacity(&self) -> usize {
        self.domains.capacity()
    }

    /// Identity of the bound manager, if any.
    pub fn engine(&self) -> Option<u64> {
        self.engine
    }

    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.domains.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Domain> {
        self.domains.get(index).ok_or(Error::BlockIndex {
            index,
            count: self.domains.len(),
        })
    }

    /// Number of legal values of block `index`.
    pub fn domain_size(&self, index: usize) -> Result<u64> {
        Ok(self.get(index)?.size())
    }

    pub fn bit_width(&self, index: usize) -> Result<usize> {
        Ok(self.get(index)?.bit_width())
    }

    /// Variables of block `index`, most significant bit first.
    pub fn vars(&self, index: usize) -> Result<&[Var]> {
        Ok(self.get(index)?.vars())
    }

    pub(crate) fn check_engine(&self, bdd: &Bdd) -> Result<()> {
        match self.engine {
            Some(expected) if expected != bdd.id() => Err(Error::State {
                expected,
                actual: bdd.id(),
            }),
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Add one block per entry of `sizes` and return the index of the first.
    ///
    /// The blocks' variables are allocated in one batch at the bottom of the
    /// ordering and interleaved by bit column: first the most significant
    /// bit of every block, then the next bit of every block still having
    /// one, and so on. The remaining blocks get consecutive indices.
    ///
    /// # Examples
    ///
    /// ```
    /// use fdd_rs::bdd::Bdd;
    /// use fdd_rs::fdd::Domains;
    /// use fdd_rs::types::Var;
    ///
    /// let bdd = Bdd::default();
    /// let mut domains = Domains::new();
    /// assert_eq!(domains.extend(&bdd, &[2, 4]).unwrap(), 0);
    /// assert_eq!(domains.vars(0).unwrap(), &[Var::new(1)]);
    /// assert_eq!(domains.vars(1).unwrap(), &[Var::new(2), Var::new(3)]);
    /// ```
    pub fn extend(&mut self, bdd: &Bdd, sizes: &[u64]) -> Result<usize> {
        self.check_engine(bdd)?;

        let widths = sizes
            .iter()
            .map(|&size| {
                if size == 0 {
                    Err(Error::InvalidSize { size })
                } else {
                    Ok(bit_width(size))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let offset = self.domains.len();
        if sizes.is_empty() {
            return Ok(offset);
        }

        let total: usize = widths.iter().sum();
        let first = bdd.new_vars(total)?;
        self.engine = Some(bdd.id());

        let mut vars: Vec<Vec<Var>> = widths.iter().map(|&w| Vec::with_capacity(w)).collect();
        let max_width = widths.iter().copied().max().unwrap_or(0);
        let mut next = 0;
        for column in 0..max_width {
            for (block, &width) in vars.iter_mut().zip(&widths) {
                if column < width {
                    block.push(first.offset(next));
                    next += 1;
                }
            }
        }

        self.domains.reserve(sizes.len());
        for (k, (vars, &size)) in vars.into_iter().zip(sizes).enumerate() {
            let varset = bdd.hold(bdd.makeset(vars.iter().copied()));
            debug!(
                "extend: block {} of size {} -> [{}]",
                offset + k,
                size,
                vars.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
            );
            self.domains.push(Domain {
                index: offset + k,
                size,
                vars,
                varset,
            });
        }

        Ok(offset)
    }

    /// Add a block encoded by the variables of `v1` followed by those of `v2`.
    ///
    /// No variables are allocated: the new block shares them with its
    /// sources. Its size is the product of theirs. `v1 == v2` is accepted;
    /// the resulting block then repeats every variable.
    pub fn overlap(&mut self, bdd: &Bdd, v1: usize, v2: usize) -> Result<usize> {
        self.check_engine(bdd)?;
        let left = self.get(v1)?;
        let right = self.get(v2)?;

        let size = left
            .size
            .checked_mul(right.size)
            .ok_or(Error::SizeOverflow { left: v1, right: v2 })?;
        let vars: Vec<Var> = left.vars.iter().chain(&right.vars).copied().collect();
        let varset = bdd.hold(bdd.apply_and(left.varset, right.varset));

        let index = self.domains.len();
        debug!("overlap({}, {}) -> block {} of size {}", v1, v2, index, size);
        self.domains.push(Domain {
            index,
            size,
            vars,
            varset,
        });

        Ok(index)
    }

    /// Release every block's variable set and empty the table.
    ///
    /// Variables stay allocated in the manager; a later [`extend`][Domains::extend]
    /// starts again at block index 0 with fresh variables.
    pub fn teardown(&mut self, bdd: &Bdd) -> Result<()> {
        self.check_engine(bdd)?;
        debug!("teardown: releasing {} blocks", self.domains.len());
        for domain in self.domains.drain(..) {
            bdd.release(domain.varset);
        }
        self.engine = None;
        Ok(())
    }
}
