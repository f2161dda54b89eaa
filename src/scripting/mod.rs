//! Script execution boundary.
//!
//! Widgets can attach scripts to actions. The session does not embed an
//! interpreter; it hands the script text to a host-installed [`ScriptRunner`]
//! together with a [`ScriptContext`] exposing the only capabilities scripts
//! get: reading and writing bound data points, and requesting a repaint.
//!
//! The default runner discards scripts with a warning, so displays that use
//! scripting still render on hosts that do not wire up an interpreter.

use tracing::warn;

use crate::pv::{PvEngine, PvValue};

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// A script payload attached to an action.
#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    /// Source text, either inline or pre-fetched by the host.
    pub text: String,
    /// Whether the text was embedded in the document (as opposed to
    /// referenced by path and loaded by the host).
    pub embedded: bool,
}

impl Script {
    pub fn embedded(text: impl Into<String>) -> Self {
        Self { text: text.into(), embedded: true }
    }

    pub fn external(text: impl Into<String>) -> Self {
        Self { text: text.into(), embedded: false }
    }
}

/// A script execution failure, reported by the runner.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script raised: {0}")]
    Runtime(String),
    #[error("no script runner installed")]
    NoRunner,
}

// ---------------------------------------------------------------------------
// ScriptContext
// ---------------------------------------------------------------------------

/// The capability surface handed to a running script.
pub struct ScriptContext<'a> {
    pvs: &'a mut PvEngine,
    repaint: bool,
}

impl<'a> ScriptContext<'a> {
    pub fn new(pvs: &'a mut PvEngine) -> Self {
        Self { pvs, repaint: false }
    }

    /// A handle to a named data point.
    pub fn pv(&self, name: &str) -> PvHandle {
        PvHandle { name: name.to_owned() }
    }

    /// Last known value of a data point.
    pub fn get_value(&self, name: &str) -> Option<PvValue> {
        self.pvs.value(name).cloned()
    }

    /// Write a data point; schedules a repaint if local state changed.
    pub fn set_value(&mut self, name: &str, value: PvValue) {
        if self.pvs.set_value(name, value) {
            self.repaint = true;
        }
    }

    /// Ask the session to redraw after the script returns.
    pub fn request_repaint(&mut self) {
        self.repaint = true;
    }

    /// Whether the script asked for (or caused) a repaint.
    pub fn repaint_requested(&self) -> bool {
        self.repaint
    }
}

/// A named data point as seen from a script.
///
/// Handles carry no engine reference; reads and writes go back through the
/// context, which keeps the borrow story trivial for runner implementations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PvHandle {
    name: String,
}

impl PvHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, ctx: &ScriptContext<'_>) -> Option<PvValue> {
        ctx.get_value(&self.name)
    }

    pub fn set_value(&self, ctx: &mut ScriptContext<'_>, value: PvValue) {
        ctx.set_value(&self.name, value);
    }
}

// ---------------------------------------------------------------------------
// ScriptRunner
// ---------------------------------------------------------------------------

/// Host-installed script interpreter.
pub trait ScriptRunner {
    fn run(&mut self, script: &Script, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError>;
}

/// Default runner: warns and drops the script.
#[derive(Default)]
pub struct NoopRunner;

impl ScriptRunner for NoopRunner {
    fn run(&mut self, script: &Script, _ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        warn!(embedded = script.embedded, "script dropped, no runner installed");
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
