//! qfp-land-pattern: IPC-7351 land patterns for quad flat packages
//!
//! This library computes QFP footprints from their IPC-7351 name and writes
//! them as `KiCad` footprints, PNG previews or JSON.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! - **Name parsing**: `QFP50P900X900-48` → pitch, toe-to-toe span, pin count
//! - **Density rules**: Least/Nominal/Most → toe, heel and side margins
//! - **Geometry**: pads, silkscreen and courtyard for all four sides
//! - **Rendering**: primitives → `.kicad_mod`, `.png` or `.json`
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`ipc7351`] — Name parsing, density rules and land pattern geometry
//! - [`render`] — Output writers

pub mod config;
pub mod error;
pub mod ipc7351;
pub mod render;
