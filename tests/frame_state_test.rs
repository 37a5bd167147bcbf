use cgmath::{Matrix4, Rad, SquareMatrix, Vector3, Vector4};
use water_plane::{
    camera::{OPENGL_TO_WGPU_MATRIX, Projection, SurfaceTransform},
    config::WaterConfig,
    data_structures::frame::{FrameState, compose_world_view_proj},
};

fn assert_vec_close(actual: Vector4<f32>, expected: Vector4<f32>) {
    let diff = actual - expected;
    let max = diff.x.abs().max(diff.y.abs()).max(diff.z.abs()).max(diff.w.abs());
    assert!(max < 1e-4, "expected {expected:?}, got {actual:?}");
}

fn assert_matrix_close(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    for (a, e) in [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.z, expected.z),
        (actual.w, expected.w),
    ] {
        assert_vec_close(a, e);
    }
}

#[test]
fn should_start_at_zero_time() {
    let frame = FrameState::new();
    assert_eq!(frame.time(), 0.0);
    assert_eq!(frame.world_view_proj(), Matrix4::identity());
}

#[test]
fn should_accumulate_elapsed_time_in_order() {
    let deltas = [0.016_f32, 0.017, 0.5, 0.0, 1.25, 0.033_3];
    let mut frame = FrameState::new();
    let mut expected = 0.0_f32;
    for delta in deltas {
        expected += delta;
        assert_eq!(frame.advance(delta), expected);
    }
    assert_eq!(frame.time(), expected);
}

#[test]
fn should_advance_time_on_update() {
    let identity = Matrix4::identity();
    let mut frame = FrameState::new();
    frame.update(0.25, &identity, &identity, &identity, &identity);
    frame.update(0.5, &identity, &identity, &identity, &identity);
    assert_eq!(frame.time(), 0.75);
}

#[test]
fn should_apply_model_then_view_then_pretransform_then_projection() {
    let model = Matrix4::from_angle_x(Rad(0.4));
    let view = Matrix4::from_translation(Vector3::new(1.0, 2.0, -20.0));
    let pretransform = SurfaceTransform::Rotate90.matrix();
    let projection = Projection::new(800, 600, Rad(std::f32::consts::FRAC_PI_4), 0.1, 100.0).matrix();

    let wvp = compose_world_view_proj(&model, &view, &pretransform, &projection);

    let point = Vector4::new(3.0, 0.0, -2.0, 1.0);
    let sequential = projection * (pretransform * (view * (model * point)));
    assert_vec_close(wvp * point, sequential);

    // Reordering the factors moves the point somewhere else
    let reordered = compose_world_view_proj(&view, &model, &pretransform, &projection);
    let diff = reordered * point - sequential;
    assert!(diff.x.abs() + diff.y.abs() + diff.z.abs() > 1e-3);
}

#[test]
fn should_recompute_transform_on_every_update() {
    let config = WaterConfig::default();
    let mut projection = Projection::new(800, 600, config.fovy, config.znear, config.zfar);
    let identity = Matrix4::identity();
    let mut frame = FrameState::new();

    frame.update(
        0.1,
        &config.model_matrix(),
        &config.view_matrix(),
        &identity,
        &projection.matrix(),
    );
    let before = frame.world_view_proj();

    projection.resize(600, 800);
    frame.update(
        0.1,
        &config.model_matrix(),
        &config.view_matrix(),
        &identity,
        &projection.matrix(),
    );
    assert_ne!(frame.world_view_proj(), before);
}

#[test]
fn should_keep_plane_centre_inside_clip_volume() {
    let config = WaterConfig::default();
    let projection = Projection::new(1280, 720, config.fovy, config.znear, config.zfar);
    let wvp = compose_world_view_proj(
        &config.model_matrix(),
        &config.view_matrix(),
        &SurfaceTransform::Identity.matrix(),
        &projection.matrix(),
    );

    let clip = wvp * Vector4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(clip.w > 0.0);
    assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0);
    assert!((0.0..=1.0).contains(&ndc.z), "depth {} outside wgpu range", ndc.z);
}

#[test]
fn should_map_near_and_far_planes_to_wgpu_depth_range() {
    let projection = Projection::new(1, 1, Rad(std::f32::consts::FRAC_PI_2), 0.1, 100.0);
    let m = projection.matrix();
    let near = m * Vector4::new(0.0, 0.0, -0.1, 1.0);
    let far = m * Vector4::new(0.0, 0.0, -100.0, 1.0);
    assert!((near.z / near.w).abs() < 1e-4);
    assert!((far.z / far.w - 1.0).abs() < 1e-4);
}

#[test]
fn should_remap_depth_only() {
    let v = OPENGL_TO_WGPU_MATRIX * Vector4::new(2.0, -3.0, -1.0, 1.0);
    assert_eq!(v, Vector4::new(2.0, -3.0, 0.0, 1.0));
}

#[test]
fn should_invert_aspect_for_quarter_turn_surfaces() {
    let projection = Projection::new(1600, 900, Rad(1.0), 0.1, 100.0);
    assert_eq!(projection.adjusted_matrix(SurfaceTransform::Identity), projection.matrix());
    assert_eq!(projection.adjusted_matrix(SurfaceTransform::Rotate180), projection.matrix());

    let rotated = projection.adjusted_matrix(SurfaceTransform::Rotate90);
    let swapped = Projection::new(900, 1600, Rad(1.0), 0.1, 100.0).matrix();
    assert_matrix_close(rotated, swapped);
    assert_matrix_close(projection.adjusted_matrix(SurfaceTransform::Rotate270), swapped);
}

#[test]
fn should_rotate_clip_space_about_z() {
    let right = Vector4::new(1.0, 0.0, 0.5, 1.0);
    assert_eq!(SurfaceTransform::Identity.matrix() * right, right);
    assert_vec_close(
        SurfaceTransform::Rotate90.matrix() * right,
        Vector4::new(0.0, 1.0, 0.5, 1.0),
    );
    assert_vec_close(
        SurfaceTransform::Rotate180.matrix() * right,
        Vector4::new(-1.0, 0.0, 0.5, 1.0),
    );
    assert_vec_close(
        SurfaceTransform::Rotate270.matrix() * right,
        Vector4::new(0.0, -1.0, 0.5, 1.0),
    );
    assert!(SurfaceTransform::Rotate90.swaps_axes());
    assert!(!SurfaceTransform::Rotate180.swaps_axes());
}

#[test]
fn should_clamp_degenerate_sizes() {
    let mut projection = Projection::new(0, 0, Rad(1.0), 0.1, 100.0);
    assert_eq!(projection.aspect(), 1.0);
    projection.resize(300, 0);
    assert_eq!(projection.aspect(), 300.0);
}
