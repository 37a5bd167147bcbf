use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::data_structures::texture;

/// Directory assets are read from, relative to the working directory.
pub const ASSET_DIR: &str = "assets";

pub fn asset_path(file_name: &str) -> PathBuf {
    Path::new("./").join(ASSET_DIR).join(file_name)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(file_name);
    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("failed to read asset {}", path.display()))?;
    Ok(data)
}

/// Load an image asset into an sRGB (colour) or linear texture.
pub async fn load_texture(
    file_name: &str,
    srgb: bool,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(file_name).await?;
    let format = Path::new(file_name).extension().and_then(|ext| ext.to_str());
    let texture = texture::Texture::from_bytes(device, queue, &data, file_name, format, srgb)?;
    log::info!(
        "Loaded texture {} ({}x{})",
        file_name,
        texture.texture.width(),
        texture.texture.height()
    );
    Ok(texture)
}

/// Bind a sampled texture to the water pipeline's texture layout.
pub fn mk_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &texture::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some("water_texture_bind_group"),
    })
}
