#![cfg(feature = "integration-tests")]

use water_plane::{
    camera::SurfaceTransform,
    config::WaterConfig,
    data_structures::texture::Texture,
    flow::InitContext,
    sample::WaterSample,
};

const SIZE: u32 = 256;

async fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("no suitable GPU adapter");
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("Headless Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .expect("failed to create device")
}

/// Render one frame into an offscreen target of `format` and read it back.
async fn render_frame(
    format: wgpu::TextureFormat,
    convert_output_to_gamma: bool,
) -> image::RgbaImage {
    let (device, queue) = headless_device().await;
    let ctx = InitContext {
        device: device.clone(),
        queue: queue.clone(),
        color_format: format,
        size: (SIZE, SIZE),
        surface_transform: SurfaceTransform::Identity,
        convert_output_to_gamma,
    };
    let mut sample = WaterSample::new(WaterConfig::default(), ctx)
        .await
        .expect("sample should initialize");
    sample.update(0.5);

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Target"),
        size: wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = Texture::create_depth_texture(&device, [SIZE, SIZE], "Offscreen Depth");

    let u32_size = std::mem::size_of::<u32>() as u32;
    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Buffer"),
        size: (u32_size * SIZE * SIZE) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Offscreen Encoder"),
    });
    sample.render_to(&queue, &mut encoder, &target_view, &depth.view);
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &target,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(u32_size * SIZE),
                rows_per_image: Some(SIZE),
            },
        },
        wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = output_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).unwrap();
    });
    device.poll(wgpu::PollType::Wait).unwrap();
    rx.receive().await.unwrap().unwrap();

    let data = buffer_slice.get_mapped_range().to_vec();
    image::RgbaImage::from_raw(SIZE, SIZE, data).expect("readback has the target's size")
}

fn assert_clear_grey(pixel: &image::Rgba<u8>) {
    // 0.35 linear is 160 once sRGB encoded
    for channel in &pixel.0[..3] {
        assert!(channel.abs_diff(160) <= 1, "unexpected clear pixel {pixel:?}");
    }
    assert_eq!(pixel.0[3], 255);
}

#[tokio::test]
async fn should_draw_plane_over_clear_colour_on_srgb_target() {
    let img = render_frame(wgpu::TextureFormat::Rgba8UnormSrgb, false).await;

    let corner = img.get_pixel(0, 0);
    assert_clear_grey(corner);
    let centre = img.get_pixel(SIZE / 2, SIZE / 2);
    assert_ne!(centre, corner, "plane should cover the image centre");
}

#[tokio::test]
async fn should_gamma_encode_manually_on_linear_target() {
    let img = render_frame(wgpu::TextureFormat::Rgba8Unorm, true).await;

    assert_clear_grey(img.get_pixel(0, 0));
    assert_clear_grey(img.get_pixel(SIZE - 1, 0));
    assert_ne!(img.get_pixel(SIZE / 2, SIZE / 2), img.get_pixel(0, 0));
}
