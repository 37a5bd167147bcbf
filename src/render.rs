//! Per-frame render orchestration.
//!
//! The water sample talks to the GPU through the [`Backend`] trait: one
//! constant buffer write followed by one indexed draw per frame.
//! [`GpuFrame`] implements it on top of wgpu by recording into a command
//! encoder owned by the host. Any other implementation (a different engine, or
//! a recorder in tests) can drive [`draw_water`] unchanged.

use crate::{
    data_structures::{frame::FrameState, uniform::WaterUniform, uniform::WaveParams},
    pipelines::water::WaterPipeline,
    resources::mesh::PlaneMesh,
};

/// Operations the water sample issues each frame.
pub trait Backend {
    /// Write the per-frame constants into the GPU-visible buffer.
    fn write_constants(&mut self, constants: &WaterUniform);

    /// Draw `index_count` indices of the bound plane mesh.
    fn draw_indexed(&mut self, index_count: u32);
}

/// Write this frame's constants, then issue the single indexed draw.
pub fn draw_water<B: Backend + ?Sized>(
    backend: &mut B,
    frame: &FrameState,
    wave: &WaveParams,
    index_count: u32,
) {
    let constants = WaterUniform::new(frame.world_view_proj(), frame.time(), wave);
    backend.write_constants(&constants);
    backend.draw_indexed(index_count);
}

/// GPU handles owned by the water sample, released on drop.
#[derive(Debug)]
pub struct WaterResources {
    pub pipeline: WaterPipeline,
    pub mesh: PlaneMesh,
    pub constants_buffer: wgpu::Buffer,
    pub constants_bind_group: wgpu::BindGroup,
    pub texture_bind_group: wgpu::BindGroup,
}

/// Render target of one frame: a colour view and its matching depth view.
pub struct FrameTarget<'a> {
    pub color: &'a wgpu::TextureView,
    pub depth: &'a wgpu::TextureView,
    pub clear_colour: wgpu::Color,
}

/// [`Backend`] recording into a host-owned command encoder.
///
/// The host submits the encoder once the sample has rendered, so the
/// constant buffer write issued through the queue lands before the draw.
pub struct GpuFrame<'a> {
    queue: &'a wgpu::Queue,
    encoder: &'a mut wgpu::CommandEncoder,
    resources: &'a WaterResources,
    target: FrameTarget<'a>,
}

impl<'a> GpuFrame<'a> {
    pub fn new(
        queue: &'a wgpu::Queue,
        encoder: &'a mut wgpu::CommandEncoder,
        resources: &'a WaterResources,
        target: FrameTarget<'a>,
    ) -> Self {
        Self {
            queue,
            encoder,
            resources,
            target,
        }
    }
}

impl Backend for GpuFrame<'_> {
    fn write_constants(&mut self, constants: &WaterUniform) {
        self.queue.write_buffer(
            &self.resources.constants_buffer,
            0,
            bytemuck::bytes_of(constants),
        );
    }

    fn draw_indexed(&mut self, index_count: u32) {
        let resources = self.resources;
        let mut render_pass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Water Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.target.color,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.target.clear_colour),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.target.depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_pipeline(&resources.pipeline.pipeline);
        render_pass.set_bind_group(0, &resources.constants_bind_group, &[]);
        render_pass.set_bind_group(1, &resources.texture_bind_group, &[]);
        render_pass.set_vertex_buffer(0, resources.mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            resources.mesh.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..index_count, 0, 0..1);
    }
}
