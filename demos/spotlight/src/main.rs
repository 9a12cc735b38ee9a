use vignette::{DriverConfig, scenes::spotlight};

fn main() -> anyhow::Result<()> {
    let demo = spotlight::build();
    vignette::run(
        demo.scene,
        Some(Box::new(demo.animator)),
        DriverConfig::titled("spotlight").with_orbit_controls(),
    )
}
