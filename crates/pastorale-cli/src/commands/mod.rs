pub mod config;
pub mod run;
pub mod snapshot;

use std::path::Path;

use pastorale_sim::{Scene, SceneConfig};

/// Load the configuration (defaults when no file is given), apply command-line
/// overrides and build the scene.
fn build_scene(path: Option<&Path>, seed: Option<u64>, speed: Option<f32>) -> Result<Scene, String> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            SceneConfig::from_toml_str(&text).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => SceneConfig::default(),
    };

    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(speed) = speed {
        config = config.with_time_speed(speed);
    }

    tracing::debug!(seed = config.seed, speed = config.clock.time_speed, "building scene");
    Scene::new(config).map_err(|e| e.to_string())
}
