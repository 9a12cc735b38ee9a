use vignette::{DriverConfig, scenes::spinning_cube};

fn main() -> anyhow::Result<()> {
    let demo = spinning_cube::build();
    vignette::run(
        demo.scene,
        Some(Box::new(demo.animator)),
        DriverConfig::titled("spinning cube"),
    )
}
