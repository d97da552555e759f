//! Tests for replaying landmark streams through the application


use pose_metrics::{
    app::{AppConfig, InputSource, MetricsApp, OutputFormat, RunSummary},
    config::Config,
    side::Laterality,
};
use std::io::Cursor;
use test_helpers::squat_frame;

fn app(format: OutputFormat, laterality: Option<Laterality>) -> MetricsApp {
    MetricsApp::new(AppConfig {
        input: InputSource::Stdin,
        format,
        config: Config::default(),
        laterality,
    })
    .expect("Default configuration should be valid")
}

fn stream(lines: &[String]) -> Cursor<Vec<u8>> {
    Cursor::new(lines.join("\n").into_bytes())
}

#[test]
fn test_text_replay() {
    let frame = serde_json::to_string(&squat_frame()).unwrap();
    let input = stream(&[frame.clone(), "null".to_string(), String::new(), frame]);
    let mut output = Vec::new();

    let summary = app(OutputFormat::Text, None).process_stream(input, &mut output).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            frames: 3,
            detected: 2,
            dropped: 0
        }
    );

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("frame 1\n"));
    assert!(text.contains("Left Knee Angle: "));
    assert!(text.contains("(Ideal: 90°)"));
    assert!(text.contains("frame 2\nNo person detected.\n"));
    assert!(!text.contains("Right Knee Angle"));
}

#[test]
fn test_json_replay_with_side_override() {
    let frame = serde_json::to_string(&squat_frame()).unwrap();
    let result = format!("{{\"landmarks\":[{frame}]}}");
    let input = stream(&[result, "[]".to_string()]);
    let mut output = Vec::new();

    let mut app = app(OutputFormat::Json, Some(Laterality::Both));
    let summary = app.process_stream(input, &mut output).unwrap();
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.detected, 1);
    assert!(app.pipeline().state().is_empty());

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["detected"], true);
    assert!(lines[0]["metrics"]["Right_Knee_Angle"]["value"].is_number());
    assert!(lines[0]["metrics"]["Left_Knee_Angle"]["value"].is_number());
    assert_eq!(lines[1]["detected"], false);
    assert_eq!(lines[1]["metrics"]["Trunk_Angle"]["value"], "N/A");
}

#[test]
fn test_malformed_lines_are_dropped() {
    let frame = serde_json::to_string(&squat_frame()).unwrap();
    let input = stream(&[frame.clone(), "{\"oops\": ".to_string(), "42".to_string(), frame]);
    let mut output = Vec::new();

    let mut app = app(OutputFormat::Json, None);
    let summary = app.process_stream(input, &mut output).unwrap();
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.dropped, 2);
    // A dropped line does not break smoothing continuity
    assert!(!app.pipeline().state().is_empty());
    assert_eq!(app.pipeline().frame_count(), 2);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = Config::default();
    config.smoothing.landmark_alpha = 2.0;
    let result = MetricsApp::new(AppConfig {
        input: InputSource::Stdin,
        format: OutputFormat::Text,
        config,
        laterality: None,
    });
    assert!(result.is_err());
}

#[test]
fn test_missing_input_file() {
    let mut app = MetricsApp::new(AppConfig {
        input: InputSource::File("/nonexistent/frames.jsonl".into()),
        format: OutputFormat::Text,
        config: Config::default(),
        laterality: None,
    })
    .unwrap();
    assert!(app.run().is_err());
}
