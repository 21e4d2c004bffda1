use itertools::Itertools;
use std::fmt::{Debug, Display, Error, Formatter};
use std::num::{NonZeroI32, NonZeroU32};
use std::ops::{Deref, Not};

/// A propositional variable, identified by a positive integer (DIMACS convention).
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Var {
    id: NonZeroU32,
}

impl Var {
    /// Largest identifier that can be represented by a signed DIMACS literal.
    pub const MAX_ID: u32 = i32::MAX as u32;

    /// Returns the variable with the given 1-based identifier, or `None` if the identifier is
    /// 0 or too large to be encoded as a literal.
    pub fn new(id: u32) -> Option<Var> {
        if id > Self::MAX_ID {
            return None;
        }
        NonZeroU32::new(id).map(|id| Var { id })
    }

    pub fn get(self) -> u32 {
        self.id.get()
    }

    /// Zero-based index of the variable, suitable to index a vector.
    pub fn index(self) -> usize {
        (self.id.get() - 1) as usize
    }

    pub fn from_index(index: usize) -> Option<Var> {
        u32::try_from(index + 1).ok().and_then(Var::new)
    }

    pub fn pos(self) -> Lit {
        Lit::new(self, true)
    }

    pub fn neg(self) -> Lit {
        Lit::new(self, false)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.id)
    }
}
impl Debug for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "v{}", self.id)
    }
}

/// A signed reference to a variable: positive when the variable is asserted true,
/// negative when it is asserted false. Never zero.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Lit {
    dimacs: NonZeroI32,
}

impl Lit {
    pub fn new(var: Var, positive: bool) -> Lit {
        // var ids are bounded by `Var::MAX_ID` so the cast cannot overflow
        let v = var.get() as i32;
        let dimacs = if positive { v } else { -v };
        Lit {
            dimacs: NonZeroI32::new(dimacs).unwrap(),
        }
    }

    pub fn from_dimacs(lit: i32) -> Option<Lit> {
        if lit == i32::MIN {
            return None;
        }
        NonZeroI32::new(lit).map(|dimacs| Lit { dimacs })
    }

    pub fn to_dimacs(self) -> i32 {
        self.dimacs.get()
    }

    pub fn var(self) -> Var {
        Var {
            id: self.dimacs.unsigned_abs(),
        }
    }

    pub fn is_positive(self) -> bool {
        self.dimacs.get() > 0
    }

    pub fn is_negative(self) -> bool {
        !self.is_positive()
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Self::Output {
        Lit { dimacs: -self.dimacs }
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.dimacs)
    }
}
impl Debug for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.dimacs)
    }
}

/// A disjunction of literals.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Clause {
        Clause { lits }
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    /// The clause as signed integers.
    pub fn to_dimacs(&self) -> Vec<i32> {
        self.lits.iter().map(|l| l.to_dimacs()).collect()
    }

    /// Builds a clause from signed integers. Returns `None` if any of them is 0.
    pub fn from_dimacs(lits: &[i32]) -> Option<Clause> {
        lits.iter()
            .map(|&l| Lit::from_dimacs(l))
            .collect::<Option<Vec<_>>>()
            .map(Clause::new)
    }

    /// Largest variable appearing in the clause.
    pub fn max_var(&self) -> Option<Var> {
        self.lits.iter().map(|l| l.var()).max()
    }
}

impl Deref for Clause {
    type Target = [Lit];

    fn deref(&self) -> &Self::Target {
        &self.lits
    }
}

impl From<Vec<Lit>> for Clause {
    fn from(lits: Vec<Lit>) -> Self {
        Clause::new(lits)
    }
}

impl From<&[Lit]> for Clause {
    fn from(lits: &[Lit]) -> Self {
        Clause::new(lits.to_vec())
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "({})", self.lits.iter().join(" "))
    }
}
impl Debug for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{self}")
    }
}
