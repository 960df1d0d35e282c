//! Reference paths: `$Name.field`, `$.field`, `^field`, with `["label"]` indexing.

use std::{fmt, num::NonZeroUsize};

use crate::{identifier::Id, span::Span};

/// Where a reference path starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// `$Name…`: the first top-level block called `Name`.
    Global(Id),
    /// `$.…`: the block containing the field.
    Local,
    /// `^…`: the ancestor this many levels above the containing block.
    Parent(NonZeroUsize),
}

/// One step of a reference path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// `.name`: a child block, or a field when it is the last segment.
    Name(Id),
    /// `["label"]`: the first child carrying this label.
    Index(String),
    /// `name["label"]`: the first child with both this name and this label.
    Labeled { name: Id, label: String },
}

/// An unresolved reference value.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    scope: Scope,
    segments: Vec<Segment>,
    span: Span,
}

impl Reference {
    pub fn new(scope: Scope, segments: Vec<Segment>, span: Span) -> Self {
        Self {
            scope,
            segments,
            span,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Source location of the whole reference expression.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Renders the reference in source syntax, e.g. `$Network.interface["eth0"].gateway`.
impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut leading_dot = true;
        match self.scope {
            Scope::Global(name) => write!(f, "${name}")?,
            Scope::Local => f.write_str("$")?,
            Scope::Parent(levels) => {
                f.write_str(&"^".repeat(levels.get()))?;
                leading_dot = false;
            }
        }

        for segment in &self.segments {
            match segment {
                Segment::Name(name) => {
                    if leading_dot {
                        f.write_str(".")?;
                    }
                    write!(f, "{name}")?;
                }
                Segment::Index(label) => write!(f, "[\"{label}\"]")?,
                Segment::Labeled { name, label } => {
                    if leading_dot {
                        f.write_str(".")?;
                    }
                    write!(f, "{name}[\"{label}\"]")?;
                }
            }
            leading_dot = true;
        }
        Ok(())
    }
}
