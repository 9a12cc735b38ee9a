use vignette::{DriverConfig, scenes::shadows};

fn main() -> anyhow::Result<()> {
    let demo = shadows::build();
    vignette::run(
        demo.scene,
        Some(Box::new(demo.animator)),
        DriverConfig::titled("shadows").with_orbit_controls(),
    )
}
