//! Data binding: process variables and the inbound update channel.
//!
//! A widget names the data point it is bound to with its `pv_name` property.
//! The [`PvEngine`] keeps one record per subscribed point: last value,
//! writability, and update time. The transport is an external collaborator
//! behind [`PvSource`]; inbound updates arrive asynchronously on a channel
//! and are drained inside the session's frame step, never applied mid-draw.
//!
//! Replacing the document resets the engine; a late-arriving update for a
//! point the new document no longer subscribes to is a harmless no-op.

pub mod sample;

pub use sample::{Sample, SampleBuffer};

use std::collections::HashMap;
use std::time::SystemTime;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Values and updates
// ---------------------------------------------------------------------------

/// A live data point value.
#[derive(Clone, Debug, PartialEq)]
pub enum PvValue {
    Num(f64),
    Str(String),
    Bool(bool),
}

impl PvValue {
    /// Render the value the way text monitors display it.
    pub fn to_display_string(&self) -> String {
        match self {
            PvValue::Num(v) => v.to_string(),
            PvValue::Str(s) => s.clone(),
            PvValue::Bool(b) => b.to_string(),
        }
    }
}

/// One inbound sample from the data source.
#[derive(Clone, Debug, PartialEq)]
pub struct PvUpdate {
    pub name: String,
    pub value: PvValue,
    pub writable: bool,
    pub timestamp: SystemTime,
}

// ---------------------------------------------------------------------------
// Collaborator boundary
// ---------------------------------------------------------------------------

/// A data-source write or subscribe failure.
///
/// Surfaced at the collaborator boundary and logged; never propagated back
/// through the draw path.
#[derive(Debug, thiserror::Error)]
#[error("pv {name}: {message}")]
pub struct BindingError {
    pub name: String,
    pub message: String,
}

/// The external data-source transport.
///
/// Writes are fire-and-forget from the widget's perspective; delivery
/// guarantees are the collaborator's concern. Updates flow back through the
/// sender obtained from [`PvEngine::update_sender`].
pub trait PvSource {
    fn subscribe(&mut self, name: &str);
    fn unsubscribe(&mut self, name: &str);
    fn write(&mut self, name: &str, value: &PvValue) -> Result<(), BindingError>;
}

// ---------------------------------------------------------------------------
// Pv
// ---------------------------------------------------------------------------

/// The engine's record of one subscribed data point.
#[derive(Clone, Debug)]
pub struct Pv {
    name: String,
    value: Option<PvValue>,
    writable: bool,
    last_update: Option<SystemTime>,
}

impl Pv {
    fn new(name: String) -> Self {
        Self { name, value: None, writable: false, last_update: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last known value; `None` until the first update arrives.
    pub fn value(&self) -> Option<&PvValue> {
        self.value.as_ref()
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn last_update(&self) -> Option<SystemTime> {
        self.last_update
    }
}

// ---------------------------------------------------------------------------
// PvEngine
// ---------------------------------------------------------------------------

/// Subscription registry and inbound update pump.
pub struct PvEngine {
    records: HashMap<String, Pv>,
    source: Option<Box<dyn PvSource>>,
    tx: UnboundedSender<PvUpdate>,
    rx: UnboundedReceiver<PvUpdate>,
}

impl Default for PvEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PvEngine {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { records: HashMap::new(), source: None, tx, rx }
    }

    /// Install the transport collaborator.
    pub fn set_source(&mut self, source: Box<dyn PvSource>) {
        self.source = Some(source);
    }

    /// A sender the collaborator uses to deliver `(timestamp, name, value)`
    /// updates. Cheap to clone; safe to use from other tasks.
    pub fn update_sender(&self) -> UnboundedSender<PvUpdate> {
        self.tx.clone()
    }

    /// Subscribe to a named point, creating its record.
    pub fn subscribe(&mut self, name: &str) {
        if !self.records.contains_key(name) {
            self.records.insert(name.to_owned(), Pv::new(name.to_owned()));
            if let Some(source) = self.source.as_mut() {
                source.subscribe(name);
            }
        }
    }

    /// The record for a subscribed point.
    pub fn pv(&self, name: &str) -> Option<&Pv> {
        self.records.get(name)
    }

    /// Last known value of a subscribed point.
    pub fn value(&self, name: &str) -> Option<&PvValue> {
        self.records.get(name).and_then(|pv| pv.value())
    }

    /// Whether a point accepts user-initiated writes. Unknown points do not.
    pub fn is_writable(&self, name: &str) -> bool {
        self.records.get(name).is_some_and(|pv| pv.writable)
    }

    /// Write a value to a point: updates the local record and forwards to
    /// the transport fire-and-forget. Returns whether local state changed.
    pub fn set_value(&mut self, name: &str, value: PvValue) -> bool {
        if let Some(source) = self.source.as_mut() {
            if let Err(e) = source.write(name, &value) {
                warn!(%e, "pv write failed");
            }
        }
        match self.records.get_mut(name) {
            Some(pv) if pv.value.as_ref() != Some(&value) => {
                pv.value = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Drain pending inbound updates into the records.
    ///
    /// Returns whether anything changed (the caller owes a repaint).
    /// Updates for points without an active subscription — including any
    /// late arrivals for a torn-down document — are ignored.
    pub fn drain_updates(&mut self) -> bool {
        let mut changed = false;
        while let Ok(update) = self.rx.try_recv() {
            match self.records.get_mut(&update.name) {
                Some(pv) => {
                    pv.value = Some(update.value);
                    pv.writable = update.writable;
                    pv.last_update = Some(update.timestamp);
                    changed = true;
                }
                None => debug!(name = %update.name, "dropping update for unsubscribed pv"),
            }
        }
        changed
    }

    /// Tear down all subscriptions (document replacement).
    pub fn reset(&mut self) {
        if let Some(source) = self.source.as_mut() {
            for name in self.records.keys() {
                source.unsubscribe(name);
            }
        }
        self.records.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
