//! Course Runtime - Tick-driven lifecycle engine for interactive training
//!
//! A course is a tree of chapters, steps, behaviors, transitions and
//! conditions. Every node walks the same four-stage lifecycle, driven by
//! per-frame ticks from an external loop.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
