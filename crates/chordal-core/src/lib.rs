//! Chordal Core Types and Definitions
//!
//! This crate provides the foundational types for Chordal chord diagrams.
//! It includes:
//!
//! - **Identifiers**: Efficient string-interned entity identifiers ([`identifier::Id`])
//! - **Colors**: CSS color handling and the cycling [`color::Palette`]
//! - **Geometry**: Points, bounds and polar helpers ([`geometry`] module)
//! - **Semantic**: Validated relation data ([`semantic`] module)
//! - **Draw**: Renderable arches, ribbons and labels ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
