//! Sample data structures: the grid mesh, per-frame state and GPU-facing types.
//!
//! - `grid` generates vertices and indices of the subdivided plane
//! - `frame` accumulates animation time and composes the world-view-projection matrix
//! - `uniform` is the constant buffer layout shared with the water shader
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `colour` converts linear colours for surfaces without hardware sRGB

pub mod colour;
pub mod frame;
pub mod grid;
pub mod texture;
pub mod uniform;
