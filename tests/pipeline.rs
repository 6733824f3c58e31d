mod common;

use common::synthetic_image::{bright_square_u8, write_gray_png};
use roi_inspect::config::pipeline::PipelineConfig;
use roi_inspect::hotspots::{HotspotOptions, OutputToggles};
use roi_inspect::image::io::read_json_file;
use roi_inspect::pipeline::Pipeline;
use roi_inspect::types::RoiPayload;
use std::fs;

const RESPONSE: &str = r#"{"denseCaptionsResult": {"values": [
    {"text": "a scratch", "confidence": 0.7, "boundingBox": {"x": 10, "y": 10, "w": 20, "h": 20}},
    {"text": "a scratch on metal", "confidence": 0.6, "boundingBox": {"x": 11, "y": 10, "w": 20, "h": 20}}
]}}"#;

#[test]
fn batch_processes_images_and_isolates_failures() {
    let _ = env_logger::builder().is_test(true).try_init();
    let root = tempfile::tempdir().unwrap();
    let images = root.path().join("images");
    let responses = root.path().join("responses");
    let artifacts = root.path().join("artifacts");
    fs::create_dir_all(&images).unwrap();
    fs::create_dir_all(&responses).unwrap();

    let square = bright_square_u8(48, 16, 12, 40, 220);
    write_gray_png(&images.join("alpha.png"), 48, &square);
    write_gray_png(&images.join("beta.png"), 48, &square);
    fs::write(images.join("corrupt.png"), b"not an image").unwrap();
    fs::write(images.join("readme.txt"), b"ignored").unwrap();
    fs::write(responses.join("alpha.analysis.json"), RESPONSE).unwrap();

    let config = PipelineConfig {
        images_dir: images.clone(),
        artifacts_dir: artifacts.clone(),
        analysis_dir: Some(responses),
        hotspots: HotspotOptions::default().with_outputs(OutputToggles {
            save_heat: true,
            save_overlay: false,
        }),
        ..PipelineConfig::default()
    };
    let summary = Pipeline::new(config).unwrap().run().unwrap();

    let names: Vec<_> = summary
        .outcomes
        .iter()
        .map(|o| o.image.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["alpha.png", "beta.png", "corrupt.png"]);
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);
    let corrupt = &summary.outcomes[2];
    assert!(corrupt.payload_error.is_none());
    assert!(corrupt.hotspot_error.as_deref().unwrap().contains("decode"));

    // alpha has a stored response, beta does not.
    assert_eq!(summary.outcomes[0].proposal_count, Some(1));
    assert!(summary.outcomes[1].proposal_count.is_none());
    let payload: RoiPayload = read_json_file(&artifacts.join("alpha_01_ROI.json")).unwrap();
    assert_eq!(payload.proposals.len(), 1);
    assert_eq!(payload.proposals[0].text, "a scratch");

    for stem in ["alpha", "beta"] {
        assert!(artifacts.join(format!("{stem}_03A_hotspots_heat.png")).is_file());
        assert!(!artifacts.join(format!("{stem}_03B_hotspots_overlay.png")).exists());
    }
}

#[test]
fn colliding_stems_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    let images = root.path().join("images");
    fs::create_dir_all(&images).unwrap();
    let square = bright_square_u8(24, 8, 8, 0, 255);
    write_gray_png(&images.join("part.png"), 24, &square);
    image::GrayImage::from_raw(24, 24, square)
        .unwrap()
        .save(images.join("part.bmp"))
        .unwrap();

    let config = PipelineConfig {
        images_dir: images,
        artifacts_dir: root.path().join("artifacts"),
        ..PipelineConfig::default()
    };
    let summary = Pipeline::new(config).unwrap().run().unwrap();
    assert_eq!(summary.outcomes.len(), 1);
    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.outcomes[0].image.ends_with("part.bmp"));
    assert!(summary.skipped[0].ends_with("part.png"));
}

#[test]
fn malformed_response_keeps_hotspot_outputs() {
    let root = tempfile::tempdir().unwrap();
    let images = root.path().join("images");
    let responses = root.path().join("responses");
    let artifacts = root.path().join("artifacts");
    fs::create_dir_all(&images).unwrap();
    fs::create_dir_all(&responses).unwrap();

    let square = bright_square_u8(48, 16, 12, 40, 220);
    write_gray_png(&images.join("alpha.png"), 48, &square);
    fs::write(
        responses.join("alpha.analysis.json"),
        r#"{"objectsResult": {"values": [{"name": "x", "confidence": 0.5}]}}"#,
    )
    .unwrap();

    let config = PipelineConfig {
        images_dir: images,
        artifacts_dir: artifacts.clone(),
        analysis_dir: Some(responses),
        ..PipelineConfig::default()
    };
    let summary = Pipeline::new(config).unwrap().run().unwrap();
    assert_eq!(summary.outcomes.len(), 1);

    let outcome = &summary.outcomes[0];
    assert!(!outcome.is_ok());
    assert!(outcome.payload_error.as_deref().unwrap().contains("boundingBox"));
    assert!(outcome.payload_path.is_none());
    assert!(outcome.hotspot_error.is_none());
    assert!(outcome.hotspots.is_some());
    assert!(artifacts.join("alpha_03A_hotspots_heat.png").is_file());
    assert!(artifacts.join("alpha_03B_hotspots_overlay.png").is_file());
    assert!(!artifacts.join("alpha_01_ROI.json").exists());
    assert_eq!(outcome.errors().count(), 1);
}
