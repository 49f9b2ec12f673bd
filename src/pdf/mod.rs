//! PDF rendering layer.
//!
//! Built directly on `pdf-writer`:
//! - `canvas` - content-stream drawing primitives for a single page
//! - `numbered` - the two-pass capture-and-replay page numbering machine
//! - `layout` - walks the abstract layout blocks and paginates them onto A4

pub mod canvas;
pub mod layout;
pub mod numbered;

pub use canvas::{Font, PageCanvas};
pub use layout::{render, A4_HEIGHT, A4_WIDTH, PAGE_MARGIN};
pub use numbered::NumberedDocument;
