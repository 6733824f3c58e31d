use roi_inspect::config::dedup::{load_config, DedupInput};
use roi_inspect::image::io::{read_json_file, write_json_file};
use roi_inspect::proposals::{parse_analysis_response, ProposalDeduplicator};
use roi_inspect::types::RoiPayload;
use std::env;
use std::fs;
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
    config.dedup.validate()?;

    let mut payload: RoiPayload = match config.input_kind {
        DedupInput::Analysis => {
            let json = fs::read_to_string(&config.input)
                .map_err(|e| format!("Failed to read {}: {e}", config.input.display()))?;
            let image_path = config
                .image_path
                .clone()
                .unwrap_or_else(|| config.input.display().to_string());
            parse_analysis_response(&json, &image_path)?
        }
        DedupInput::Payload => read_json_file(&config.input)?,
    };

    let before = payload.proposals.len();
    let dedup = ProposalDeduplicator::new(config.dedup.clone());
    let selected = dedup.dedup(&payload.proposals)?;
    let max_iou = selected.max_pairwise_iou();
    payload.proposals = selected.into_vec();
    write_json_file(&config.output, &payload)?;

    println!(
        "proposals_in={} proposals_out={} max_pairwise_iou={:.3} output={}",
        before,
        payload.proposals.len(),
        max_iou,
        config.output.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: roi_dedup <config.json>".to_string()
}
