//! Loading assets from disk and turning CPU-side data into GPU resources.

pub mod mesh;
pub mod texture;
