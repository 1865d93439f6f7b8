//! Classify command

use ambient_core::Platform;
use ambient_device::{classify, performance_metrics, resolve, DeviceMetrics};
use anyhow::{Context, Result};

pub fn run(platform: &str, width: f32, height: f32, density: f32, json: bool) -> Result<()> {
    let platform: Platform = platform.parse().context("Failed to parse platform")?;
    let metrics = DeviceMetrics::new(platform, width, height, density);
    let grade = classify(&metrics);
    let render = resolve(grade);
    let tolerances = performance_metrics(grade);

    if json {
        let output = serde_json::json!({
            "device": metrics,
            "grade": grade,
            "render": render,
            "performance": tolerances,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}x{} @{}x ({:.0} px)",
        metrics.platform, metrics.width, metrics.height, metrics.pixel_density, metrics.total_pixels
    );
    println!("Grade: {}", grade);
    println!(
        "Render: {} quality, {} fps, {} particles",
        render.quality, render.fps, render.particle_count
    );
    println!(
        "  blur: {}, shadows: {}, complex effects: {}",
        render.enable_blur, render.enable_shadows, render.complex_effects
    );
    println!(
        "Tolerances: {} dropped frames, {} MB, complexity {:.1}",
        tolerances.frame_drop_threshold,
        tolerances.memory_usage_threshold_mb,
        tolerances.rendering_complexity
    );

    Ok(())
}
