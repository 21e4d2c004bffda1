use derive_more::Display;

/// Compact, numeric identifier of a ground fluent.
///
/// Identifiers are dense and zero-based: the i-th fluent declared in a problem
/// has the identifier `i`.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Display)]
#[display("f{_0}")]
pub struct FluentId(u32);

impl FluentId {
    pub const fn from_u32(id: u32) -> Self {
        FluentId(id)
    }
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<usize> for FluentId {
    fn from(i: usize) -> Self {
        FluentId(i as u32)
    }
}

impl From<FluentId> for usize {
    fn from(f: FluentId) -> Self {
        f.0 as usize
    }
}

/// An atomic ground proposition such as `(on a b)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display)]
#[display("{name}")]
pub struct Fluent {
    pub name: String,
}

impl Fluent {
    pub fn new(name: impl Into<String>) -> Self {
        Fluent { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
