use std::path::Path;

pub fn run(config: Option<&Path>, ticks: u64, seed: Option<u64>, pretty: bool) -> Result<(), String> {
    let mut scene = super::build_scene(config, seed, None)?;
    scene.run(ticks);

    let snapshot = scene.snapshot();
    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    }
    .map_err(|e| format!("JSON serialization error: {e}"))?;

    println!("{json}");
    Ok(())
}
