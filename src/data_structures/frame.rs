use cgmath::{Matrix4, SquareMatrix};

/// Animation time and transform carried from one frame to the next.
///
/// Owned by the sample and advanced by [`FrameState::update`] before every
/// render. The world-view-projection matrix is recomputed on each update.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameState {
    time: f32,
    world_view_proj: Matrix4<f32>,
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameState {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            world_view_proj: Matrix4::identity(),
        }
    }

    /// Seconds accumulated over all updates so far.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn world_view_proj(&self) -> Matrix4<f32> {
        self.world_view_proj
    }

    /// Add `elapsed` seconds to the accumulated time and return the new total.
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        debug_assert!(elapsed >= 0.0, "elapsed time must not be negative");
        self.time += elapsed;
        self.time
    }

    /// Advance time and recompute the world-view-projection matrix.
    pub fn update(
        &mut self,
        elapsed: f32,
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        pretransform: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        self.advance(elapsed);
        self.world_view_proj = compose_world_view_proj(model, view, pretransform, projection);
    }
}

/// Model, then view, then surface pre-transform, then projection.
///
/// With column vectors the first transform applied is the rightmost factor.
pub fn compose_world_view_proj(
    model: &Matrix4<f32>,
    view: &Matrix4<f32>,
    pretransform: &Matrix4<f32>,
    projection: &Matrix4<f32>,
) -> Matrix4<f32> {
    *projection * *pretransform * *view * *model
}
