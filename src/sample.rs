//! The water sample: a textured grid plane animated by a travelling wave.

use instant::Duration;
use wgpu::util::DeviceExt;

use crate::{
    camera::{Projection, SurfaceTransform},
    config::WaterConfig,
    context::Context,
    data_structures::{
        colour::colour_to_srgb,
        frame::FrameState,
        grid::GridMesh,
        texture::{Texture, create_linear_clamp_sampler},
        uniform::WaterUniform,
    },
    flow::{InitContext, Sample, SampleConstructor},
    pipelines::water::WaterPipeline,
    render::{Backend, FrameTarget, GpuFrame, WaterResources, draw_water},
    resources::{
        mesh::PlaneMesh,
        texture::{load_texture, mk_texture_bind_group},
    },
};

/// CPU side of the sample: configuration, projection and per-frame state.
///
/// Kept apart from the GPU handles so update logic runs without a device.
#[derive(Clone, Debug)]
pub struct WaterScene {
    config: WaterConfig,
    projection: Projection,
    surface_transform: SurfaceTransform,
    frame: FrameState,
    index_count: u32,
}

impl WaterScene {
    pub fn new(
        config: WaterConfig,
        size: (u32, u32),
        surface_transform: SurfaceTransform,
        index_count: u32,
    ) -> Self {
        let projection = Projection::new(size.0, size.1, config.fovy, config.znear, config.zfar);
        Self {
            config,
            projection,
            surface_transform,
            frame: FrameState::new(),
            index_count,
        }
    }

    pub fn config(&self) -> &WaterConfig {
        &self.config
    }

    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// Advance the animation clock by `elapsed` seconds and recompute the transform.
    pub fn update(&mut self, elapsed: f32) {
        let model = self.config.model_matrix();
        let view = self.config.view_matrix();
        let pretransform = self.surface_transform.matrix();
        let projection = self.projection.adjusted_matrix(self.surface_transform);
        self.frame
            .update(elapsed, &model, &view, &pretransform, &projection);
    }

    /// Issue this frame's constant write and draw through `backend`.
    pub fn render<B: Backend + ?Sized>(&self, backend: &mut B) {
        draw_water(backend, &self.frame, &self.config.wave, self.index_count);
    }
}

/// The water sample as hosted by [`crate::flow::run`].
#[derive(Debug)]
pub struct WaterSample {
    scene: WaterScene,
    resources: WaterResources,
    clear_colour: wgpu::Color,
}

impl WaterSample {
    /// Build the pipeline, plane buffers and texture for `config`.
    pub async fn new(config: WaterConfig, ctx: InitContext) -> anyhow::Result<Self> {
        let params = config.grid_params()?;
        let grid = GridMesh::generate(&params);
        log::info!(
            "Generated {}x{} plane: {} vertices, {} indices",
            params.vertices_x(),
            params.vertices_z(),
            grid.vertices.len(),
            grid.indices.len()
        );

        let pipeline =
            WaterPipeline::new(&ctx.device, ctx.color_format, ctx.convert_output_to_gamma);
        let mesh = PlaneMesh::upload(&ctx.device, &grid, "Plane");

        let constants_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Water Constants Buffer"),
                contents: bytemuck::bytes_of(&WaterUniform::new(
                    FrameState::new().world_view_proj(),
                    0.0,
                    &config.wave,
                )),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let constants_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &pipeline.constants_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: constants_buffer.as_entire_binding(),
            }],
            label: Some("water_constants_bind_group"),
        });

        let texture = load_texture(&config.texture_file, true, &ctx.device, &ctx.queue).await?;
        let texture_bind_group = bind_texture(&ctx.device, &pipeline, &texture);

        let clear_colour = if ctx.convert_output_to_gamma {
            colour_to_srgb(config.clear_colour)
        } else {
            config.clear_colour
        };

        let scene = WaterScene::new(config, ctx.size, ctx.surface_transform, mesh.num_indices);

        Ok(Self {
            scene,
            resources: WaterResources {
                pipeline,
                mesh,
                constants_buffer,
                constants_bind_group,
                texture_bind_group,
            },
            clear_colour,
        })
    }

    pub fn scene(&self) -> &WaterScene {
        &self.scene
    }

    pub fn resources(&self) -> &WaterResources {
        &self.resources
    }

    pub fn clear_colour(&self) -> wgpu::Color {
        self.clear_colour
    }

    pub fn update(&mut self, elapsed: f32) {
        self.scene.update(elapsed);
    }

    /// Record the frame into `encoder`, clearing `color` and `depth` first.
    pub fn render_to(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
    ) {
        let target = FrameTarget {
            color,
            depth,
            clear_colour: self.clear_colour,
        };
        let mut frame = GpuFrame::new(queue, encoder, &self.resources, target);
        self.scene.render(&mut frame);
    }
}

fn bind_texture(
    device: &wgpu::Device,
    pipeline: &WaterPipeline,
    texture: &Texture,
) -> wgpu::BindGroup {
    match &texture.sampler {
        Some(sampler) => mk_texture_bind_group(device, &pipeline.texture_layout, texture, sampler),
        None => {
            let sampler = create_linear_clamp_sampler(device);
            mk_texture_bind_group(device, &pipeline.texture_layout, texture, &sampler)
        }
    }
}

impl Sample for WaterSample {
    fn name(&self) -> &str {
        &self.scene.config.name
    }

    fn on_resize(&mut self, ctx: &Context) {
        let (width, height) = ctx.size();
        self.scene.resize(width, height);
    }

    fn on_update(&mut self, _ctx: &Context, dt: Duration) {
        self.update(dt.as_secs_f32());
    }

    fn on_render(
        &self,
        ctx: &Context,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        self.render_to(&ctx.queue, encoder, view, &ctx.depth_texture.view);
    }
}

/// Constructor for [`crate::flow::run`] that builds a [`WaterSample`] from `config`.
pub fn water_sample(config: WaterConfig) -> SampleConstructor {
    Box::new(move |ctx: InitContext| {
        Box::pin(async move {
            let sample: Box<dyn Sample> = Box::new(WaterSample::new(config, ctx).await?);
            anyhow::Ok(sample)
        })
    })
}
