//! `textrun` - styled text editing core
//!
//! The engine beneath a rich text widget: styled text stored as an ordered
//! sequence of uniformly-styled runs, tokenized into indivisible layout
//! atoms, word-wrapped on demand by a forward-only layout cursor, and
//! edited through a transactional undo/redo stack.
//!
//! Rendering, input, clipboard, and scrolling are the host's business; the
//! core consumes a [`StyleMetrics`] capability for measurement and answers
//! geometry queries in the host's units.

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_precision_loss)] // Intentional char-count → f32 conversions
#![allow(clippy::module_name_repetitions)] // Allow TextDocument, StyledRun etc
#![allow(clippy::missing_errors_doc)] // Error conditions documented inline
#![allow(clippy::missing_panics_doc)] // Public API does not panic on valid input
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine

pub mod color;
pub mod error;
pub mod event;
pub mod metrics;
pub mod style;
pub mod text;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_log, set_log_callback};
pub use metrics::{GlyphEdge, MonoMetrics, StyleMetrics};
pub use style::{FontAttributes, FontSpec, Style};
pub use text::{
    Atom, AtomKind, ChangeEvent, CharPosition, Editor, Justification, LayoutCursor,
    LayoutOptions, Rect, Selection, StyledRun, Subscription, TextDocument, UndoAction, UndoStack,
    VerticalAnchor,
};
