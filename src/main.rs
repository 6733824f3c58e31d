use log::info;
use roi_inspect::config::pipeline::{load_config, PipelineConfig};
use roi_inspect::image::io::write_json_file;
use roi_inspect::pipeline::Pipeline;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // Without a config file the defaults plus environment overrides are used.
    let config = match env::args().nth(1) {
        Some(path) if path == "-h" || path == "--help" => return Err(usage()),
        Some(path) => load_config(Path::new(&path))?,
        None => PipelineConfig::default().with_env_overrides(),
    };
    let pipeline = Pipeline::new(config)?;
    let summary = pipeline.run()?;

    let summary_path = pipeline.config().artifacts_dir.join("batch_summary.json");
    write_json_file(&summary_path, &summary)?;
    info!("summary written to {}", summary_path.display());

    for outcome in &summary.outcomes {
        for err in outcome.errors() {
            eprintln!("{}: {err}", outcome.image.display());
        }
    }
    println!(
        "processed={} failed={} skipped={} elapsed_ms={:.1}",
        summary.outcomes.len(),
        summary.failed(),
        summary.skipped.len(),
        summary.elapsed_ms
    );
    Ok(())
}

fn usage() -> String {
    "Usage: roi-inspect [config.json]\n\
     Environment: IMAGES_PATH and ARTIFACTS_DIR override the configured directories."
        .to_string()
}
