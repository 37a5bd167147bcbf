use water_plane::{config::WaterConfig, flow, sample::water_sample};

fn main() -> anyhow::Result<()> {
    flow::run(water_sample(WaterConfig::default()))
}
