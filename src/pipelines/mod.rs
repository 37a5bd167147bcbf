//! Render pipelines. The sample draws everything with the water pipeline.

pub mod water;
