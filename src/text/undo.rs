//! Transactional undo/redo over document edits.
//!
//! Every recorded edit is an [`UndoAction`] — a tagged variant whose
//! inversion logic lives next to the action kind, so the stack needs no
//! polymorphic command objects. Actions group into transactions bounded
//! three ways: an action-count cap, an idle-time gap between actions, and
//! an explicit [`UndoStack::begin_transaction`] signal from the host.
//! Aggregate history is cost-bounded; the oldest transactions are evicted
//! first, but the most recent one always survives.

use crate::event::{LogLevel, emit_log};
use crate::metrics::StyleMetrics;
use crate::style::Style;
use crate::text::document::TextDocument;
use crate::text::run::StyledRun;
use std::ops::Range;
use std::time::{Duration, Instant};

/// Most actions a transaction may hold before a new one opens.
const MAX_ACTIONS_PER_TRANSACTION: usize = 100;

/// Idle gap after which the next recorded action opens a new transaction.
const IDLE_LIMIT: Duration = Duration::from_millis(200);

/// Default aggregate cost budget, in cost units.
const DEFAULT_COST_BUDGET: usize = 30_000;

/// Fixed per-action overhead added to each action's cost.
const ACTION_OVERHEAD: usize = 16;

/// One recorded edit, invertible.
#[derive(Clone, Debug)]
pub enum UndoAction {
    /// Text was inserted at `index`.
    Insert {
        text: String,
        index: usize,
        style: Style,
        caret_before: usize,
        caret_after: usize,
    },
    /// The runs fully covering `range` were removed. `removed_runs` is the
    /// boundary-aligned deep copy taken before removal.
    Remove {
        range: Range<usize>,
        caret_before: usize,
        caret_after: usize,
        removed_runs: Vec<StyledRun>,
    },
}

impl UndoAction {
    /// Memory cost: covered text length plus fixed overhead.
    #[must_use]
    pub fn cost(&self) -> usize {
        match self {
            Self::Insert { text, .. } => text.chars().count() + ACTION_OVERHEAD,
            Self::Remove { removed_runs, .. } => {
                removed_runs.iter().map(StyledRun::total_len).sum::<usize>() + ACTION_OVERHEAD
            }
        }
    }

    /// Caret position before the edit was applied.
    #[must_use]
    pub fn caret_before(&self) -> usize {
        match self {
            Self::Insert { caret_before, .. } | Self::Remove { caret_before, .. } => *caret_before,
        }
    }

    /// Caret position after the edit was applied.
    #[must_use]
    pub fn caret_after(&self) -> usize {
        match self {
            Self::Insert { caret_after, .. } | Self::Remove { caret_after, .. } => *caret_after,
        }
    }

    /// Apply the action's forward effect.
    fn apply(&self, document: &mut TextDocument, metrics: &dyn StyleMetrics) {
        match self {
            Self::Insert {
                text, index, style, ..
            } => document.insert(text, *index, *style, metrics),
            Self::Remove { range, .. } => document.remove(range.clone(), metrics),
        }
    }

    /// Apply the action's inverse.
    fn revert(&self, document: &mut TextDocument, metrics: &dyn StyleMetrics) {
        match self {
            Self::Insert { text, index, .. } => {
                document.remove(*index..*index + text.chars().count(), metrics);
            }
            Self::Remove {
                range,
                removed_runs,
                ..
            } => document.reinsert(range.start, removed_runs, metrics),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Transaction {
    actions: Vec<UndoAction>,
}

impl Transaction {
    fn cost(&self) -> usize {
        self.actions.iter().map(UndoAction::cost).sum()
    }
}

/// Undo/redo history with transaction grouping and cost-bounded eviction.
#[derive(Debug)]
pub struct UndoStack {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    open: Transaction,
    last_action_at: Option<Instant>,
    cost_budget: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            open: Transaction::default(),
            last_action_at: None,
            cost_budget: DEFAULT_COST_BUDGET,
        }
    }
}

impl UndoStack {
    /// Create a stack with the default cost budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack with a custom cost budget.
    #[must_use]
    pub fn with_cost_budget(cost_budget: usize) -> Self {
        Self {
            cost_budget,
            ..Self::default()
        }
    }

    /// Close the open transaction; the next recorded action starts a new
    /// undo unit. Hosts call this when a logical burst of input ends.
    pub fn begin_transaction(&mut self) {
        self.commit_open();
    }

    /// Record and apply an insertion. No-op when `text` is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn record_insert(
        &mut self,
        document: &mut TextDocument,
        metrics: &dyn StyleMetrics,
        text: &str,
        index: usize,
        style: Style,
        caret_before: usize,
        caret_after: usize,
    ) {
        if text.is_empty() {
            return;
        }

        let index = index.min(document.total_len());
        self.record(
            UndoAction::Insert {
                text: text.to_string(),
                index,
                style,
                caret_before,
                caret_after,
            },
            document,
            metrics,
        );
    }

    /// Record and apply a removal. No-op when the (normalized, clamped)
    /// range is empty.
    pub fn record_remove(
        &mut self,
        document: &mut TextDocument,
        metrics: &dyn StyleMetrics,
        range: Range<usize>,
        caret_before: usize,
        caret_after: usize,
    ) {
        let len = document.total_len();
        let start = range.start.min(range.end).min(len);
        let end = range.start.max(range.end).min(len);
        if start == end {
            return;
        }

        let removed_runs = document.snapshot_range(start..end, metrics);
        self.record(
            UndoAction::Remove {
                range: start..end,
                caret_before,
                caret_after,
                removed_runs,
            },
            document,
            metrics,
        );
    }

    /// Undo the most recent transaction, replaying its actions' inverses in
    /// reverse order. Returns the caret position to restore, or `None` when
    /// there is nothing to undo.
    pub fn undo(
        &mut self,
        document: &mut TextDocument,
        metrics: &dyn StyleMetrics,
    ) -> Option<usize> {
        self.commit_open();
        let transaction = self.undo_stack.pop()?;

        for action in transaction.actions.iter().rev() {
            action.revert(document, metrics);
        }

        let caret = transaction.actions.first().map(UndoAction::caret_before);
        self.redo_stack.push(transaction);
        caret
    }

    /// Redo the most recently undone transaction, replaying its actions'
    /// forward effects in order. Returns the caret position to restore, or
    /// `None` when there is nothing to redo.
    pub fn redo(
        &mut self,
        document: &mut TextDocument,
        metrics: &dyn StyleMetrics,
    ) -> Option<usize> {
        let transaction = self.redo_stack.pop()?;

        for action in &transaction.actions {
            action.apply(document, metrics);
        }

        let caret = transaction.actions.last().map(UndoAction::caret_after);
        self.undo_stack.push(transaction);
        caret
    }

    /// True when a transaction is available to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || !self.open.actions.is_empty()
    }

    /// True when a transaction is available to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of committed transactions available to undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len() + usize::from(!self.open.actions.is_empty())
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open.actions.clear();
        self.last_action_at = None;
    }

    /// Aggregate cost of everything the stack retains.
    #[must_use]
    pub fn total_cost(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(Transaction::cost)
            .sum::<usize>()
            + self.open.cost()
    }

    fn record(
        &mut self,
        action: UndoAction,
        document: &mut TextDocument,
        metrics: &dyn StyleMetrics,
    ) {
        let idle_exceeded = self
            .last_action_at
            .is_some_and(|at| at.elapsed() > IDLE_LIMIT);
        if self.open.actions.len() >= MAX_ACTIONS_PER_TRANSACTION || idle_exceeded {
            self.commit_open();
        }

        action.apply(document, metrics);
        self.open.actions.push(action);
        self.last_action_at = Some(Instant::now());
        self.redo_stack.clear();
    }

    fn commit_open(&mut self) {
        if self.open.actions.is_empty() {
            return;
        }
        let transaction = std::mem::take(&mut self.open);
        self.undo_stack.push(transaction);
        self.evict_over_budget();
    }

    fn evict_over_budget(&mut self) {
        let mut evicted = 0;
        while self.total_cost() > self.cost_budget && self.undo_stack.len() > 1 {
            self.undo_stack.remove(0);
            evicted += 1;
        }
        if evicted > 0 {
            emit_log(
                LogLevel::Debug,
                &format!("undo history evicted {evicted} transaction(s) over cost budget"),
            );
        }
    }
}
