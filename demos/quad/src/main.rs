use vignette::{DriverConfig, scenes::custom_geometry};

fn main() -> anyhow::Result<()> {
    let demo = custom_geometry::build();
    vignette::run(
        demo.scene,
        None,
        DriverConfig::titled("custom geometry").with_orbit_controls(),
    )
}
