//! Action dispatch: the effect context handed to interacting widgets.

use tracing::warn;

use crate::action::{Action, OpenMode};
use crate::pv::{PvEngine, PvValue};
use crate::scripting::{Script, ScriptContext, ScriptRunner};

/// A navigation or host effect that the session cannot resolve by itself
/// and reports upward instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayRequest {
    /// Replace the current document with the referenced one.
    OpenDisplay { path: String },
    /// Open the referenced document in a new window; windowing is the
    /// host's concern.
    OpenWindow { path: String },
    /// Fetch and run an externally stored script.
    RunExternalScript { path: String },
}

/// Mutable context for one interaction.
///
/// Widgets never hold a reference to the session; every effect of an
/// interaction flows through here: data point writes, script execution,
/// navigation requests, and the repaint obligation. The session consumes
/// the accumulated state after the interaction returns.
pub struct Dispatch<'a> {
    pvs: &'a mut PvEngine,
    scripts: &'a mut dyn ScriptRunner,
    requests: Vec<DisplayRequest>,
    repaint: bool,
}

impl<'a> Dispatch<'a> {
    pub fn new(pvs: &'a mut PvEngine, scripts: &'a mut dyn ScriptRunner) -> Self {
        Self { pvs, scripts, requests: Vec::new(), repaint: false }
    }

    /// The data binding engine, for reads during interaction.
    pub fn pvs(&self) -> &PvEngine {
        self.pvs
    }

    /// Write a data point; schedules a repaint if local state changed.
    pub fn write_pv(&mut self, name: &str, value: PvValue) {
        if self.pvs.set_value(name, value) {
            self.repaint = true;
        }
    }

    /// Run one declarative action.
    pub fn execute(&mut self, action: &Action) {
        match action {
            Action::OpenDisplay { path, mode } => {
                let request = match mode {
                    OpenMode::Replace => DisplayRequest::OpenDisplay { path: path.clone() },
                    OpenMode::NewWindow => DisplayRequest::OpenWindow { path: path.clone() },
                };
                self.requests.push(request);
            }
            Action::ExecuteScript { text, embedded } => {
                if *embedded {
                    self.run_script(&Script::embedded(text.clone()));
                } else {
                    self.requests
                        .push(DisplayRequest::RunExternalScript { path: text.clone() });
                }
            }
            Action::WritePv { pv_name, value } => {
                self.write_pv(pv_name, value.clone());
            }
        }
    }

    /// Run a script through the installed runner. Failures are logged and
    /// contained; the interaction continues.
    pub fn run_script(&mut self, script: &Script) {
        let mut ctx = ScriptContext::new(self.pvs);
        match self.scripts.run(script, &mut ctx) {
            Ok(()) => {
                if ctx.repaint_requested() {
                    self.repaint = true;
                }
            }
            Err(e) => warn!(%e, "action script failed"),
        }
    }

    /// Ask the session to redraw after the interaction.
    pub fn request_repaint(&mut self) {
        self.repaint = true;
    }

    /// Whether the interaction left the screen stale.
    pub fn repaint_requested(&self) -> bool {
        self.repaint
    }

    /// Consume the accumulated navigation requests.
    pub fn take_requests(&mut self) -> Vec<DisplayRequest> {
        std::mem::take(&mut self.requests)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
