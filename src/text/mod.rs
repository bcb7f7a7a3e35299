//! Styled text storage, layout, and editing.
//!
//! This module is the crate's core: run-length styled text with atom
//! tokenization, on-demand word-wrapped layout, and transactional
//! undo/redo.
//!
//! Key types:
//!
//! - [`TextDocument`]: styled text stored as an ordered run sequence
//! - [`LayoutCursor`]: forward-only word-wrap layout and geometry queries
//! - [`UndoStack`]: transaction-grouped, cost-bounded edit history
//! - [`Editor`]: the host-facing facade tying the above together
//!
//! # Examples
//!
//! ## Documents and runs
//!
//! ```
//! use textrun::{MonoMetrics, Style, TextDocument};
//!
//! let style = Style::with_size(10.0);
//! let mut doc = TextDocument::new();
//! doc.insert("hello world", 0, style, &MonoMetrics);
//! assert_eq!(doc.total_len(), 11);
//! assert_eq!(doc.runs().len(), 1);
//! ```
//!
//! ## Editing with undo
//!
//! ```
//! use textrun::{Editor, MonoMetrics};
//!
//! let mut editor = Editor::new(MonoMetrics);
//! editor.insert_at_caret("Hello");
//! editor.new_transaction();
//! editor.insert_at_caret(" World");
//! assert_eq!(editor.full_text(), "Hello World");
//!
//! editor.undo();
//! assert_eq!(editor.full_text(), "Hello");
//!
//! editor.redo();
//! assert_eq!(editor.full_text(), "Hello World");
//! ```

mod atom;
mod document;
mod editor;
mod layout;
mod run;
mod undo;

pub use atom::{Atom, AtomKind};
pub use document::TextDocument;
pub use editor::{ChangeEvent, Editor, Selection, Subscription};
pub use layout::{
    CharPosition, Justification, LayoutCursor, LayoutOptions, Rect, VerticalAnchor,
};
pub use run::StyledRun;
pub use undo::{UndoAction, UndoStack};
