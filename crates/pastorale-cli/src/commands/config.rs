use std::path::Path;

use pastorale_sim::SceneConfig;

pub fn run(output: Option<&Path>) -> Result<(), String> {
    let text = SceneConfig::default()
        .to_toml_string()
        .map_err(|e| e.to_string())?;

    if let Some(path) = output {
        std::fs::write(path, &text)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Wrote default configuration to {}", path.display());
    } else {
        print!("{text}");
    }
    Ok(())
}
