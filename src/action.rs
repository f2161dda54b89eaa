//! Declarative widget actions: navigate, script, write.
//!
//! Actions are a closed catalog dispatched by a single `match` at the point of
//! use. An [`ActionSet`] holds a widget's declared actions, addressable by
//! integer index; index resolution is lazy and out-of-range indices are a
//! silent no-op rather than an error.

use crate::pv::PvValue;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// How an `OpenDisplay` action replaces or augments the current session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenMode {
    /// Tear down the current document and load the referenced one in place.
    Replace,
    /// Report the request upward; opening windows is the host's concern.
    NewWindow,
}

/// A single declarative effect attached to a widget.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    OpenDisplay {
        path: String,
        mode: OpenMode,
    },
    ExecuteScript {
        /// Inline script body, or a path when `embedded` is false.
        text: String,
        embedded: bool,
    },
    WritePv {
        pv_name: String,
        value: PvValue,
    },
}

// ---------------------------------------------------------------------------
// ActionSet
// ---------------------------------------------------------------------------

/// An ordered set of actions plus the click-hook flags that decide which of
/// them run when the widget's holder area is clicked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionSet {
    actions: Vec<Action>,
    /// Run only the first action on click.
    pub hook_first: bool,
    /// Run every action on click.
    pub hook_all: bool,
}

impl ActionSet {
    /// Create an empty action set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action (builder).
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Set the first-action click hook (builder).
    pub fn hooked_first(mut self) -> Self {
        self.hook_first = true;
        self
    }

    /// Set the all-actions click hook (builder).
    pub fn hooked_all(mut self) -> Self {
        self.hook_all = true;
        self
    }

    /// Append an action.
    pub fn add(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Number of declared actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Resolve an action by index. Negative or out-of-range indices yield
    /// `None`; callers treat that as a no-op.
    pub fn action(&self, index: i64) -> Option<&Action> {
        usize::try_from(index).ok().and_then(|i| self.actions.get(i))
    }

    /// Whether clicking the widget's holder area triggers anything.
    pub fn is_clickable(&self) -> bool {
        !self.actions.is_empty() && (self.hook_first || self.hook_all)
    }

    /// The indices of the actions to run on a holder click, in order.
    pub fn click_actions(&self) -> Vec<i64> {
        if self.hook_all {
            (0..self.actions.len() as i64).collect()
        } else if self.hook_first && !self.actions.is_empty() {
            vec![0]
        } else {
            Vec::new()
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ActionSet {
        ActionSet::new()
            .with_action(Action::WritePv {
                pv_name: "pump".into(),
                value: PvValue::Num(1.0),
            })
            .with_action(Action::OpenDisplay {
                path: "detail.opi".into(),
                mode: OpenMode::Replace,
            })
    }

    #[test]
    fn action_lookup_by_index() {
        let set = sample_set();
        assert!(matches!(set.action(0), Some(Action::WritePv { .. })));
        assert!(matches!(set.action(1), Some(Action::OpenDisplay { .. })));
    }

    #[test]
    fn out_of_range_index_is_none() {
        let set = sample_set();
        assert!(set.action(2).is_none());
        assert!(set.action(-1).is_none());
        assert!(set.action(i64::MAX).is_none());
    }

    #[test]
    fn clickability_requires_hook_and_actions() {
        assert!(!sample_set().is_clickable());
        assert!(sample_set().hooked_first().is_clickable());
        assert!(sample_set().hooked_all().is_clickable());
        assert!(!ActionSet::new().hooked_all().is_clickable());
    }

    #[test]
    fn click_actions_follow_hooks() {
        assert!(sample_set().click_actions().is_empty());
        assert_eq!(sample_set().hooked_first().click_actions(), vec![0]);
        assert_eq!(sample_set().hooked_all().click_actions(), vec![0, 1]);
    }
}
