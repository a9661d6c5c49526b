//! XML helpers: the element tree built at the parse boundary and escaping
//! for emitted markup.

pub mod escape;
pub mod tree;

pub use escape::escape_attr;
pub use tree::{Element, parse_document};
