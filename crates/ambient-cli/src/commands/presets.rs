//! Presets command

use ambient_effect::{EffectConfig, Preset};
use anyhow::Result;

pub fn run(json: bool) -> Result<()> {
    if json {
        let presets: Vec<_> = Preset::ALL
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name(),
                    "overrides": p.overrides(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    for preset in Preset::ALL {
        let config = EffectConfig::default().merged(&preset.overrides());
        let colors: Vec<String> = config.colors.iter().map(|c| c.to_hex_string()).collect();
        println!(
            "{:<13} {:<10} intensity {:.1}  {} particles  [{}]",
            preset.name(),
            config.pattern,
            config.intensity,
            config.render.particle_count,
            colors.join(", ")
        );
    }

    Ok(())
}
