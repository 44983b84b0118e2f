//! End-to-end export of synthetic `.vox` files.

use std::path::PathBuf;

use vox_export::{convert_to_json, ExportConfig, ExportError};
use vox_format::VoxError;

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], content: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(content.len() as i32).to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(content);
}

/// SIZE(2,2,2), one voxel, red first palette entry, one MATL chunk.
fn sample_file() -> Vec<u8> {
    let mut children = Vec::new();
    let size: Vec<u8> = [2i32, 2, 2].iter().flat_map(|v| v.to_le_bytes()).collect();
    push_chunk(&mut children, b"SIZE", &size);
    let mut xyzi = 1i32.to_le_bytes().to_vec();
    xyzi.extend_from_slice(&[0, 0, 0, 1]);
    push_chunk(&mut children, b"XYZI", &xyzi);
    let mut rgba = vec![0u8; 1024];
    rgba[..4].copy_from_slice(&[255, 0, 0, 255]);
    push_chunk(&mut children, b"RGBA", &rgba);
    push_chunk(&mut children, b"MATL", &[0; 8]);

    let mut bytes = b"VOX ".to_vec();
    bytes.extend_from_slice(&150i32.to_le_bytes());
    bytes.extend_from_slice(b"MAIN");
    bytes.extend_from_slice(&0i32.to_le_bytes());
    bytes.extend_from_slice(&(children.len() as i32).to_le_bytes());
    bytes.extend_from_slice(&children);
    bytes
}

fn temp_path(name: &str) -> PathBuf {
    let unique_id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("vox_export_{unique_id}_{name}"))
}

fn read_json(path: &PathBuf) -> serde_json::Value {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_convert_to_json() {
    let input = temp_path("sample.vox");
    let output = temp_path("sample.json");
    std::fs::write(&input, sample_file()).unwrap();

    convert_to_json(&input, &output, &ExportConfig::default()).unwrap();
    let value = read_json(&output);

    assert_eq!(value["models"][0]["dimensions"]["depth"], 2);
    assert_eq!(value["models"][0]["voxels"].as_array().unwrap().len(), 1);
    assert_eq!(value["palette"].as_array().unwrap().len(), 256);
    assert_eq!(value["palette"][0], serde_json::json!([255, 0, 0, 255]));
    assert!(value.get("skipped").is_none());

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("\n    \"header\""), "default indent is four spaces");

    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&output).ok();
}

#[test]
fn test_convert_with_config_file() {
    let input = temp_path("configured.vox");
    let output = temp_path("configured.json");
    let config_path = temp_path("export.toml");
    std::fs::write(&input, sample_file()).unwrap();
    std::fs::write(
        &config_path,
        "pretty = false\ninclude_palette = false\ninclude_skipped = true\n",
    )
    .unwrap();

    let config = ExportConfig::load(&config_path).unwrap();
    convert_to_json(&input, &output, &config).unwrap();
    let value = read_json(&output);

    assert!(value.get("palette").is_none());
    assert_eq!(value["skipped"][0]["tag"], "MATL");
    assert_eq!(value["skipped"][0]["content_length"], 8);
    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text.trim_end().lines().count(), 1);

    for path in [&input, &output, &config_path] {
        std::fs::remove_file(path).ok();
    }
}

#[test]
fn test_failed_decode_leaves_no_output() {
    let input = temp_path("broken.vox");
    let output = temp_path("broken.json");
    let mut bytes = sample_file();
    bytes.truncate(30);
    std::fs::write(&input, &bytes).unwrap();

    let err = convert_to_json(&input, &output, &ExportConfig::default()).unwrap_err();
    assert!(matches!(err, ExportError::Decode(VoxError::TruncatedInput { .. })), "{err}");
    assert!(!output.exists());

    std::fs::remove_file(&input).ok();
}

#[test]
fn test_missing_config_is_io_error() {
    let err = ExportConfig::load(temp_path("absent.toml")).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
}
