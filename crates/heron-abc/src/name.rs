//! Qualified names
//!
//! The constant-pool name model lives in a neighboring compiler stage; the
//! assembler carries names as opaque operand payload and never interprets
//! them.

/// An opaque qualified name carried as an instruction operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    /// Namespace qualifier, if any.
    qualifier: Option<Box<str>>,
    /// Unqualified base name.
    base: Box<str>,
}

impl Name {
    /// Create an unqualified name.
    pub fn new(base: impl Into<Box<str>>) -> Self {
        Self {
            qualifier: None,
            base: base.into(),
        }
    }

    /// Create a name qualified by a namespace.
    pub fn qualified(qualifier: impl Into<Box<str>>, base: impl Into<Box<str>>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            base: base.into(),
        }
    }

    /// Get the namespace qualifier, if any.
    #[inline]
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Get the unqualified base name.
    #[inline]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.qualifier {
            Some(ns) => write!(f, "{}::{}", ns, self.base),
            None => f.write_str(&self.base),
        }
    }
}
