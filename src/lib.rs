//! # opiview
//!
//! A canvas-based renderer for control-system operator displays. A declarative
//! document describing a tree of widgets (shapes, text monitors, switches) is
//! parsed, bound to live data points ("PVs"), and painted onto a 2D drawing
//! surface with pixel-accurate mouse interaction.
//!
//! ## Core Systems
//!
//! - **[`property`]** — Typed, self-describing property model with defaults,
//!   document parsing, and re-entrancy-safe change listeners
//! - **[`border`]** — Border style catalog and the holder-box → content-box
//!   inset computation
//! - **[`hit`]** — Off-screen color-keyed picking surface for O(1) pixel-based
//!   interaction lookup
//! - **[`widget`]** — Widget node lifecycle: parse → layout → draw → hit-test → act
//! - **[`widgets`]** — Built-in widget kinds and the kind registry
//! - **[`display`]** — Display session: repaint scheduler, overlay passes,
//!   document replacement
//! - **[`pv`]** — Data binding: subscriptions, writability, inbound update
//!   channel, sample buffering
//! - **[`action`]** — Declarative widget actions (navigate, script, write)
//! - **[`scripting`]** — Binding surface handed to an embedded script engine
//! - **[`render`]** — Drawing surface contract plus a software raster fallback
//! - **[`event`]** — Pointer events and cursor hints
//! - **[`geometry`]** — Point and Bounds primitives in canvas coordinates

// Foundation
pub mod geometry;

// Document and property model
pub mod action;
pub mod document;
pub mod property;

// Geometry/border model and rendering
pub mod border;
pub mod hit;
pub mod render;

// Widget system
pub mod widget;
pub mod widgets;

// Collaborators
pub mod pv;
pub mod scripting;

// Session
pub mod display;
pub mod event;

// Headless test helpers
pub mod testing;
