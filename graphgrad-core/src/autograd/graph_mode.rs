//! Graph-growth switch.
//!
//! Every `Function::call` consults a graph context to decide whether the
//! outputs are linked back to their inputs. The ambient context is a
//! thread-local flag overridden through an RAII guard. Callers that prefer
//! explicit state pass a [`GraphContext`] to `Function::call_with` instead.

use std::cell::Cell;

thread_local! {
    static GRAPH_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Returns whether forward calls on this thread currently grow the graph.
pub fn is_graph_enabled() -> bool {
    GRAPH_ENABLED.with(|flag| flag.get())
}

/// Installs `enabled` as the graph-growth flag until the returned guard drops.
///
/// Guards nest: each restores exactly the value it replaced, even when the
/// scope is left early through `?` or a panic.
#[must_use = "the previous graph mode is restored as soon as the guard is dropped"]
pub fn set_graph_enabled(enabled: bool) -> GraphModeGuard {
    let previous = GRAPH_ENABLED.with(|flag| flag.replace(enabled));
    log::debug!("graph growth set to {} (was {})", enabled, previous);
    GraphModeGuard { previous }
}

/// Runs `f` with graph growth disabled.
pub fn no_grad<R>(f: impl FnOnce() -> R) -> R {
    let _guard = set_graph_enabled(false);
    f()
}

/// Restores the previous graph-growth flag on drop.
#[derive(Debug)]
pub struct GraphModeGuard {
    previous: bool,
}

impl Drop for GraphModeGuard {
    fn drop(&mut self) {
        GRAPH_ENABLED.with(|flag| flag.set(self.previous));
        log::debug!("graph growth restored to {}", self.previous);
    }
}

/// Explicit graph-tracking context for a single forward call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphContext {
    pub enable_graph: bool,
}

impl GraphContext {
    /// Snapshot of the thread-local flag.
    pub fn current() -> Self {
        GraphContext {
            enable_graph: is_graph_enabled(),
        }
    }

    pub fn tracking() -> Self {
        GraphContext { enable_graph: true }
    }

    pub fn inference() -> Self {
        GraphContext {
            enable_graph: false,
        }
    }
}

impl Default for GraphContext {
    fn default() -> Self {
        GraphContext::current()
    }
}

#[cfg(test)]
#[path = "graph_mode_test.rs"]
mod tests;
