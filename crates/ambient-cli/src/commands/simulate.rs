//! Simulate command

use ambient_effect::{AmbientEffect, AmbientSettings};
use ambient_runtime::{Clock, VirtualClock};
use anyhow::{Context, Result};
use std::path::Path;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub frames: u32,
    pub frame_ms: f64,
    pub slow_every: Option<u32>,
    pub slow_ms: f64,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let settings = match &args.config {
        Some(path) => AmbientSettings::load(Path::new(path))
            .with_context(|| format!("Failed to load settings from {}", path))?,
        None => AmbientSettings::default(),
    };
    if args.frame_ms <= 0.0 {
        anyhow::bail!("--frame-ms must be positive");
    }

    let clock = VirtualClock::new();
    let mut effect = match args.seed {
        Some(seed) => AmbientEffect::with_seed(&settings, clock.shared(), seed),
        None => AmbientEffect::new(&settings, clock.shared()),
    };

    let mut events = Vec::new();
    let mut rendered = 0u32;
    let mut last_draw_len = 0usize;

    effect.press();
    for i in 0..args.frames {
        let slow = args
            .slow_every
            .is_some_and(|k| k > 0 && i > 0 && i % k == 0);
        if i > 0 {
            clock.advance(if slow { args.slow_ms } else { args.frame_ms });
        }
        if let Some(list) = effect.tick() {
            rendered += 1;
            last_draw_len = list.len();
        }
        for event in effect.drain_events() {
            events.push((clock.now_ms(), event));
        }
    }

    let status = effect.performance_status();
    let config = effect.config();

    if args.json {
        let log: Vec<_> = events
            .iter()
            .map(|(t, e)| serde_json::json!({ "time_ms": t, "event": format!("{:?}", e) }))
            .collect();
        let output = serde_json::json!({
            "capability": effect.capability(),
            "elapsed_ms": clock.now_ms(),
            "frames_rendered": rendered,
            "status": status,
            "config": config,
            "events": log,
            "draw_items": last_draw_len,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Device: {} (graded {})",
        effect.metrics().platform,
        effect.capability()
    );
    println!(
        "Ran {} callbacks over {:.0} ms, {} frames rendered",
        args.frames,
        clock.now_ms(),
        rendered
    );
    println!(
        "Status: {} ({} dropped frames)",
        if status.is_good { "good" } else { "degraded" },
        status.frame_drop_count
    );
    println!(
        "Config: {} quality, {} fps, {} particles, intensity {:.2}",
        config.render.quality, config.render.fps, config.render.particle_count, config.intensity
    );
    println!("Last draw list: {} items", last_draw_len);
    if !events.is_empty() {
        println!("Events:");
        for (t, event) in &events {
            println!("  {:>8.0} ms  {:?}", t, event);
        }
    }

    Ok(())
}
