//! Textual dump of a document.
//!
//! ```text
//! Block: Network
//!   Field: name  (type: string)  value: "office"
//!   Block: interface  label: "eth0"
//!     Field: gateway  (type: inferred)  value: "1.1.1.1"
//!
//! ```
//!
//! One line per block, its fields one indent deeper, then its children.
//! Each top-level block is followed by a blank line.

use std::fmt::{self, Write};

use acl_core::{BlockId, Document};

const INDENT: &str = "  ";

/// Render `document` into a new string.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_document(document, &mut out);
    out
}

/// Write `document` into `out`.
pub fn write_document(document: &Document, out: &mut impl Write) -> fmt::Result {
    for &root in document.roots() {
        write_block(document, root, 0, out)?;
        out.write_char('\n')?;
    }
    Ok(())
}

fn write_block(document: &Document, id: BlockId, depth: usize, out: &mut impl Write) -> fmt::Result {
    let block = document.block(id);
    let indent = INDENT.repeat(depth);

    match block.label() {
        Some(label) => writeln!(out, "{indent}Block: {}  label: \"{label}\"", block.name())?,
        None => writeln!(out, "{indent}Block: {}", block.name())?,
    }

    for field in block.fields() {
        let ty = field.ty().map_or("inferred", |ty| ty.as_str());
        writeln!(
            out,
            "{indent}{INDENT}Field: {}  (type: {ty})  value: {}",
            field.name(),
            field.value()
        )?;
    }

    for &child in block.children() {
        write_block(document, child, depth + 1, out)?;
    }
    Ok(())
}
