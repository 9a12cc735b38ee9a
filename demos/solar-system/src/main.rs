use vignette::{DriverConfig, scenes::solar_system};

fn main() -> anyhow::Result<()> {
    let demo = solar_system::build();
    vignette::run(
        demo.scene,
        Some(Box::new(demo.animator)),
        DriverConfig::titled("solar system"),
    )
}
