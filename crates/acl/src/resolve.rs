//! Reference resolution.
//!
//! [`resolve`] replaces every reference in a document, including array
//! elements at any depth, with a copy of the value it designates. It runs
//! full-tree passes in document order until a pass changes nothing or the
//! configured pass ceiling is reached. A value is written back as soon as it
//! resolves, so later lookups in the same pass already see it.
//!
//! A reference whose target field still holds a reference is not copied; it
//! is retried on the next pass. References that never resolve stay in the
//! tree and are listed in the returned [`Resolution`].

use std::fmt;

use log::{debug, trace};

use acl_core::{BlockId, Document, Id, Reference, Scope, Segment, Value};

use crate::config::ResolveConfig;

/// Why a reference could not be resolved on its last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    /// `$Name…`: no top-level block is called `Name`.
    MissingRoot,
    /// `^…`: the containing block has fewer ancestors than carets.
    TooFewAncestors,
    /// A segment names no child block, label or field.
    MissingPath,
    /// The path designates a block rather than a field.
    EndsAtBlock,
    /// The target field itself still holds a reference.
    PendingTarget,
    /// The pass ceiling allowed no attempt.
    NotAttempted,
}

impl Failure {
    /// Returns `true` if the path exists but leads to a value that never resolved.
    pub fn is_pending(&self) -> bool {
        matches!(self, Failure::PendingTarget)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Failure::MissingRoot => "no top-level block has this name",
            Failure::TooFewAncestors => "the block does not have that many ancestors",
            Failure::MissingPath => "no block or field matches this path",
            Failure::EndsAtBlock => "the path ends at a block, not a field",
            Failure::PendingTarget => "the target value is itself unresolved",
            Failure::NotAttempted => "resolution ran no passes",
        };
        f.write_str(reason)
    }
}

/// A reference still present after resolution finished.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedReference {
    /// The block holding the field.
    pub block: BlockId,
    /// The field the reference appears in.
    pub field: Id,
    pub reference: Reference,
    pub reason: Failure,
}

/// Outcome of a [`resolve`] run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    passes: usize,
    resolved: usize,
    unresolved: Vec<UnresolvedReference>,
}

impl Resolution {
    /// Number of full-tree passes that ran.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Number of references replaced by values.
    pub fn resolved(&self) -> usize {
        self.resolved
    }

    /// References left in the document, in document order.
    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    /// Returns `true` if no reference is left.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolve every reference in `document` reachable under `config`'s pass ceiling.
///
/// Never fails: whatever cannot be resolved is left in place and reported.
pub fn resolve(document: &mut Document, config: &ResolveConfig) -> Resolution {
    let mut resolution = Resolution::default();
    if !document.has_references() {
        debug!("Document holds no references");
        return resolution;
    }

    let order = document.walk();
    while resolution.passes < config.max_passes() {
        resolution.passes += 1;
        let mut pass = Pass::default();
        for &block in &order {
            resolve_block(document, block, &mut pass);
        }

        trace!(
            pass = resolution.passes,
            resolved = pass.resolved,
            remaining = pass.failures.len();
            "Resolution pass finished"
        );
        resolution.resolved += pass.resolved;
        resolution.unresolved = pass.failures;

        if pass.resolved == 0 || resolution.unresolved.is_empty() {
            break;
        }
    }

    if resolution.passes == 0 {
        resolution.unresolved = unattempted(document, &order);
    }

    debug!(
        passes = resolution.passes,
        resolved = resolution.resolved,
        unresolved = resolution.unresolved.len();
        "Resolution finished"
    );
    resolution
}

/// Changes and failures observed during one pass.
#[derive(Debug, Default)]
struct Pass {
    resolved: usize,
    failures: Vec<UnresolvedReference>,
}

fn resolve_block(document: &mut Document, block: BlockId, pass: &mut Pass) {
    for index in 0..document.block(block).fields().len() {
        let field = &document.block(block).fields()[index];
        if !field.value().contains_reference() {
            continue;
        }

        let name = field.name();
        let mut value = field.value().clone();
        let before = pass.resolved;
        resolve_value(document, block, name, &mut value, pass);

        if pass.resolved != before {
            if let Some(field) = document.field_mut(block, index) {
                *field.value_mut() = value;
            }
        }
    }
}

fn resolve_value(document: &Document, block: BlockId, field: Id, value: &mut Value, pass: &mut Pass) {
    match value {
        Value::Reference(reference) => {
            let outcome = lookup(document, block, reference);
            match outcome {
                Ok(target) => {
                    trace!(reference:% = reference, kind = target.kind_name(); "Resolved reference");
                    *value = target;
                    pass.resolved += 1;
                }
                Err(reason) => pass.failures.push(UnresolvedReference {
                    block,
                    field,
                    reference: reference.clone(),
                    reason,
                }),
            }
        }
        Value::Array(elements) => {
            for element in elements {
                resolve_value(document, block, field, element, pass);
            }
        }
        _ => {}
    }
}

fn unattempted(document: &Document, order: &[BlockId]) -> Vec<UnresolvedReference> {
    let mut unresolved = Vec::new();
    for &block in order {
        for field in document.block(block).fields() {
            for reference in field.value().references() {
                unresolved.push(UnresolvedReference {
                    block,
                    field: field.name(),
                    reference: reference.clone(),
                    reason: Failure::NotAttempted,
                });
            }
        }
    }
    unresolved
}

/// Walk `reference` from its scope, starting at the block holding it.
fn lookup(document: &Document, context: BlockId, reference: &Reference) -> Result<Value, Failure> {
    let mut current = match reference.scope() {
        Scope::Global(name) => document.find_root(name).ok_or(Failure::MissingRoot)?,
        Scope::Local => context,
        Scope::Parent(levels) => document
            .ancestor(context, levels.get())
            .ok_or(Failure::TooFewAncestors)?,
    };

    let segments = reference.segments();
    for (i, segment) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();
        current = match segment {
            Segment::Index(label) => document
                .child_labeled(current, label)
                .ok_or(Failure::MissingPath)?,
            Segment::Labeled { name, label } => document
                .child_named_labeled(current, *name, label)
                .ok_or(Failure::MissingPath)?,
            Segment::Name(name) => match document.child_named(current, *name) {
                Some(child) => child,
                None if is_last => {
                    let field = document
                        .block(current)
                        .field(*name)
                        .ok_or(Failure::MissingPath)?;
                    if field.value().contains_reference() {
                        return Err(Failure::PendingTarget);
                    }
                    return Ok(field.value().clone());
                }
                None => return Err(Failure::MissingPath),
            },
        };
    }

    Err(Failure::EndsAtBlock)
}
