use water_plane::{
    config::WaterConfig,
    resources::texture::{asset_path, load_binary},
};

#[tokio::test]
async fn should_load_bundled_water_texture() {
    let config = WaterConfig::default();
    let bytes = load_binary(&config.texture_file).await.unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert!(img.width() > 0 && img.height() > 0);
}

#[tokio::test]
async fn should_name_missing_asset_in_error() {
    let err = load_binary("does-not-exist.png").await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("does-not-exist.png"), "{message}");
}

#[test]
fn should_resolve_assets_below_asset_dir() {
    assert!(asset_path("water.png").ends_with("assets/water.png"));
}
