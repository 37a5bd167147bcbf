use crate::data_structures::{grid::Vertex, texture::Texture};

const WATER_SHADER: &str = include_str!("water.wgsl");

/// Name of the boolean shader constant that switches manual gamma encoding on.
pub const CONVERT_PS_OUTPUT_TO_GAMMA: &str = "CONVERT_PS_OUTPUT_TO_GAMMA";

/// The water render pipeline together with the layouts its bind groups use.
///
/// Group 0 holds the per-frame [`WaterUniform`](crate::data_structures::uniform::WaterUniform),
/// group 1 the water texture and its sampler.
#[derive(Debug)]
pub struct WaterPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub constants_layout: wgpu::BindGroupLayout,
    pub texture_layout: wgpu::BindGroupLayout,
}

impl WaterPipeline {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        convert_output_to_gamma: bool,
    ) -> Self {
        let constants_layout = mk_constants_layout(device);
        let texture_layout = mk_texture_layout(device);
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Water Pipeline Layout"),
                bind_group_layouts: &[&constants_layout, &texture_layout],
                push_constant_ranges: &[],
            });

        let shader = wgpu::ShaderModuleDescriptor {
            label: Some("Water Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source(convert_output_to_gamma).into()),
        };

        let pipeline = mk_render_pipeline(
            device,
            &render_pipeline_layout,
            color_format,
            Some(wgpu::BlendState::REPLACE),
            Some(Texture::DEPTH_FORMAT),
            &[Vertex::desc()],
            shader,
        );

        Self {
            pipeline,
            constants_layout,
            texture_layout,
        }
    }
}

/// WGSL source of the water shader with its macros defined.
pub fn shader_source(convert_output_to_gamma: bool) -> String {
    format!(
        "const {CONVERT_PS_OUTPUT_TO_GAMMA}: bool = {convert_output_to_gamma};\n{WATER_SHADER}"
    )
}

pub fn mk_constants_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("water_constants_bind_group_layout"),
    })
}

pub fn mk_texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("water_texture_bind_group_layout"),
    })
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Water Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            // Grid cells are counter-clockwise seen from +Y
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
