use roi_inspect::artifacts::ArtifactsDir;
use roi_inspect::config::hotspots::load_config;
use roi_inspect::hotspots::HotspotFuser;
use roi_inspect::image::io::{load_image, save_grayscale_f32};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let fuser = HotspotFuser::new(config.hotspots.clone())?;
    let namer = ArtifactsDir::new(&config.artifacts_dir);
    let image = load_image(&config.input)?;
    let report = fuser.analyze(&image)?;
    let artifacts = fuser.save(&config.input, &report, &namer)?;

    if let Some(dir) = &config.debug_dir {
        let maps = [
            ("edge", report.signals.edge.as_ref()),
            ("variance", report.signals.variance.as_ref()),
            ("high_frequency", report.signals.high_frequency.as_ref()),
            ("fused", Some(&report.heatmap)),
        ];
        for (name, map) in maps {
            if let Some(map) = map {
                save_grayscale_f32(map, &dir.join(format!("{name}.png")))?;
            }
        }
    }

    println!(
        "heat={} (written={}) overlay={} (written={})",
        artifacts.heat_path.display(),
        artifacts.heat_written,
        artifacts.overlay_path.display(),
        artifacts.overlay_written
    );
    println!(
        "peak=({}, {}) value={:.3} total_ms={:.2} staged_ms={:.2}",
        artifacts.peak.x,
        artifacts.peak.y,
        artifacts.peak.value,
        report.timing.total_ms,
        report.timing.staged_ms()
    );
    for stage in &report.timing.stages {
        println!("  {:<10} {:.2} ms", stage.label, stage.elapsed_ms);
    }
    Ok(())
}

fn usage() -> String {
    "Usage: hotspots <config.json>".to_string()
}
