use vignette::{DriverConfig, scenes::tube};

fn main() -> anyhow::Result<()> {
    let demo = tube::build();
    vignette::run(
        demo.scene,
        None,
        DriverConfig::titled("tube").with_orbit_controls(),
    )
}
