use lane_masks::calibration::DEFAULT_CALIBRATION_PATH;
use lane_masks::{Calibration, Error};
use std::fs;
use std::path::{Path, PathBuf};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("lane_masks_calibration_tests");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_flat_distortion_vector() {
    let path = write_temp(
        "flat.json",
        r#"{
            "mtx": [[1156.94, 0.0, 665.95], [0.0, 1152.13, 388.79], [0.0, 0.0, 1.0]],
            "dist": [-0.2376, -0.0854, -0.00079, -0.00012, 0.1057]
        }"#,
    );
    let calib = Calibration::load(&path).unwrap();
    assert_eq!(calib.camera_matrix[(0, 0)], 1156.94);
    assert_eq!(calib.camera_matrix[(0, 2)], 665.95);
    assert_eq!(calib.camera_matrix[(1, 2)], 388.79);
    assert_eq!(calib.camera_matrix[(2, 2)], 1.0);
    assert_eq!(calib.dist_coeffs[0], -0.2376);
    assert_eq!(calib.dist_coeffs[4], 0.1057);
}

#[test]
fn loads_nested_distortion_row() {
    let path = write_temp(
        "nested.json",
        r#"{ "mtx": [[2, 0, 1], [0, 3, 1], [0, 0, 1]], "dist": [[0.1, 0.2, 0.3, 0.4, 0.5]] }"#,
    );
    let calib = Calibration::load(&path).unwrap();
    assert_eq!(calib.dist_coeffs.as_slice(), &[0.1, 0.2, 0.3, 0.4, 0.5]);
    assert_eq!(calib.camera_matrix[(1, 1)], 3.0);
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("lane_masks_no_such_calibration.json");
    let _ = fs::remove_file(&path);
    assert!(matches!(Calibration::load(&path), Err(Error::Io { .. })));
}

#[test]
fn invalid_json_is_parse_error() {
    let path = write_temp("broken.json", r#"{ "mtx": [[1, 0, 0]"#);
    assert!(matches!(Calibration::load(&path), Err(Error::Json { .. })));
}

#[test]
fn missing_array_is_parse_error() {
    let path = write_temp("no_dist.json", r#"{ "mtx": [[1, 0, 0], [0, 1, 0], [0, 0, 1]] }"#);
    assert!(matches!(Calibration::load(&path), Err(Error::Json { .. })));
}

#[test]
fn wrong_shapes_are_format_errors() {
    let cases = [
        (
            "short_mtx.json",
            r#"{ "mtx": [[1, 0, 0], [0, 1, 0]], "dist": [0, 0, 0, 0, 0] }"#,
        ),
        (
            "ragged_mtx.json",
            r#"{ "mtx": [[1, 0], [0, 1, 0], [0, 0, 1]], "dist": [0, 0, 0, 0, 0] }"#,
        ),
        (
            "short_dist.json",
            r#"{ "mtx": [[1, 0, 0], [0, 1, 0], [0, 0, 1]], "dist": [0, 0, 0, 0] }"#,
        ),
        (
            "two_dist_rows.json",
            r#"{ "mtx": [[1, 0, 0], [0, 1, 0], [0, 0, 1]], "dist": [[0, 0, 0, 0, 0], [0, 0, 0, 0, 0]] }"#,
        ),
    ];
    for (name, json) in cases {
        let path = write_temp(name, json);
        assert!(
            matches!(Calibration::load(&path), Err(Error::Format { .. })),
            "{name} should be rejected as malformed"
        );
    }
}

#[test]
fn default_path_is_read_relative_to_the_working_directory() {
    let default = Path::new(DEFAULT_CALIBRATION_PATH);
    match Calibration::load_default() {
        Err(Error::Io { path, .. }) => {
            assert!(!default.exists());
            assert_eq!(path, default);
        }
        Ok(calib) => assert_eq!(calib, Calibration::load(default).unwrap()),
        Err(other) => panic!("unexpected error for {}: {other}", default.display()),
    }
}
