//! Progressive rendering runs.
//!
//! A run partitions the frame into worker ranges, computes them through the
//! selected executor and streams coloured patches back to the caller's sink.
//! Results travel through a single mailbox and are gated on this side, so a
//! newer run, a cancel or a resize stops all further delivery of older work.

pub mod config;
pub mod controller;
pub mod delivery;
pub mod ports;
pub mod run;
pub mod scheduler;
