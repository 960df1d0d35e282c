//! The block/field tree produced by the parser and mutated by resolution.
//!
//! All blocks of a document live in one arena owned by [`Document`] and are
//! addressed by [`BlockId`]. A block's child list is the only thing that owns
//! it logically; its parent handle is a plain index used for parent-scoped
//! lookups, so dropping the document is a flat drop of the arena.

use crate::{
    identifier::Id,
    reference::Reference,
    span::Span,
    value::{TypeTag, Value},
};

/// Handle of a block inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    /// Position of the block in the document arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A `name = value;` entry, with an optional declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    ty: Option<TypeTag>,
    name: Id,
    value: Value,
    span: Span,
}

impl Field {
    pub fn new(ty: Option<TypeTag>, name: Id, value: Value, span: Span) -> Self {
        Self {
            ty,
            name,
            value,
            span,
        }
    }

    /// The declared type, or `None` for an inferred field.
    pub fn ty(&self) -> Option<TypeTag> {
        self.ty
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// A named, optionally labeled container of fields and child blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    name: Id,
    label: Option<String>,
    fields: Vec<Field>,
    children: Vec<BlockId>,
    parent: Option<BlockId>,
    span: Span,
}

impl Block {
    pub fn name(&self) -> Id {
        self.name
    }

    /// The string literal written after the block name, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Child blocks in declaration order.
    pub fn children(&self) -> &[BlockId] {
        &self.children
    }

    /// The enclosing block, `None` for top-level blocks.
    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The first field called `name`.
    pub fn field(&self, name: Id) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A parsed ACL document: the ordered top-level blocks and everything below them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
    roots: Vec<BlockId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new empty block under `parent`, or at top level when `parent` is `None`.
    pub fn add_block(
        &mut self,
        name: Id,
        label: Option<String>,
        parent: Option<BlockId>,
        span: Span,
    ) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(Block {
            name,
            label,
            fields: Vec::new(),
            children: Vec::new(),
            parent,
            span,
        });

        match parent {
            Some(parent) => self.blocks[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Appends a field to the end of `block`'s field list.
    pub fn push_field(&mut self, block: BlockId, field: Field) {
        self.blocks[block.0].fields.push(field);
    }

    /// Replaces the recorded source span of `block`.
    pub fn set_block_span(&mut self, block: BlockId, span: Span) {
        self.blocks[block.0].span = span;
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0]
    }

    /// Mutable access to one field of a block.
    pub fn field_mut(&mut self, block: BlockId, index: usize) -> Option<&mut Field> {
        self.blocks.get_mut(block.0)?.fields.get_mut(index)
    }

    /// Top-level blocks in declaration order.
    pub fn roots(&self) -> &[BlockId] {
        &self.roots
    }

    /// Total number of blocks at every depth.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The first top-level block called `name`.
    pub fn find_root(&self, name: Id) -> Option<BlockId> {
        self.roots
            .iter()
            .copied()
            .find(|&id| self.block(id).name == name)
    }

    /// The first child of `block` called `name`.
    pub fn child_named(&self, block: BlockId, name: Id) -> Option<BlockId> {
        self.find_child(block, |child| child.name == name)
    }

    /// The first child of `block` labeled `label`.
    pub fn child_labeled(&self, block: BlockId, label: &str) -> Option<BlockId> {
        self.find_child(block, |child| child.label() == Some(label))
    }

    /// The first child of `block` called `name` and labeled `label`.
    pub fn child_named_labeled(&self, block: BlockId, name: Id, label: &str) -> Option<BlockId> {
        self.find_child(block, |child| {
            child.name == name && child.label() == Some(label)
        })
    }

    fn find_child(&self, block: BlockId, pred: impl Fn(&Block) -> bool) -> Option<BlockId> {
        self.block(block)
            .children
            .iter()
            .copied()
            .find(|&child| pred(self.block(child)))
    }

    /// Follows parent handles `levels` times from `block`.
    ///
    /// Returns `None` if fewer than `levels` ancestors exist.
    pub fn ancestor(&self, block: BlockId, levels: usize) -> Option<BlockId> {
        let mut current = block;
        for _ in 0..levels {
            current = self.block(current).parent?;
        }
        Some(current)
    }

    /// All block ids in document order: roots in order, each followed by its
    /// subtree depth first.
    pub fn walk(&self) -> Vec<BlockId> {
        let mut order = Vec::with_capacity(self.blocks.len());
        let mut stack: Vec<BlockId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.block(id).children.iter().rev().copied());
        }
        order
    }

    /// Every reference still present in the document, with its containing block.
    pub fn references(&self) -> Vec<(BlockId, &Reference)> {
        self.walk()
            .into_iter()
            .flat_map(|id| {
                self.block(id).fields.iter().flat_map(move |field| {
                    field
                        .value
                        .references()
                        .into_iter()
                        .map(move |reference| (id, reference))
                })
            })
            .collect()
    }

    /// Returns `true` if any field still holds a reference.
    pub fn has_references(&self) -> bool {
        self.blocks
            .iter()
            .flat_map(|block| block.fields.iter())
            .any(|field| field.value.contains_reference())
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Build a document where block `i` hangs under `parents[i]`, if that names an earlier block.
    fn build(parents: &[Option<usize>]) -> Document {
        let mut doc = Document::new();
        let mut ids: Vec<BlockId> = Vec::new();
        for (i, parent) in parents.iter().enumerate() {
            let parent = parent.filter(|&p| p < i).map(|p| ids[p]);
            ids.push(doc.add_block(Id::new("B"), None, parent, Span::default()));
        }
        doc
    }

    /// `walk` visits every block once and each parent before its children.
    fn check_walk_is_preorder(parents: &[Option<usize>]) -> Result<(), TestCaseError> {
        let doc = build(parents);
        let order = doc.walk();
        prop_assert_eq!(order.len(), doc.len());

        let mut seen = vec![false; doc.len()];
        for id in order {
            prop_assert!(!seen[id.index()]);
            if let Some(parent) = doc.block(id).parent() {
                prop_assert!(seen[parent.index()]);
            }
            seen[id.index()] = true;
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn walk_is_preorder(parents in prop::collection::vec(prop::option::of(0usize..32), 0..32)) {
            check_walk_is_preorder(&parents)?;
        }
    }
}
