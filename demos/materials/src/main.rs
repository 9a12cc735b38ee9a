use vignette::{DriverConfig, scenes::materials};

fn main() -> anyhow::Result<()> {
    let scene = materials::build();
    vignette::run(
        scene,
        None,
        DriverConfig::titled("materials").with_orbit_controls(),
    )
}
