mod common;

use common::synthetic_image::road_like_rgb;
use lane_masks::image::io::{load_rgb_image, save_grayscale_u8, save_mask_png};
use lane_masks::prelude::*;
use lane_masks::Error;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join("lane_masks_io_tests").join(name)
}

#[test]
fn png_round_trip_feeds_thresholds() {
    let img = road_like_rgb(24, 10);
    let raw: Vec<u8> = img.pixels().iter().flatten().copied().collect();
    let encoded = image::RgbImage::from_raw(24, 10, raw).unwrap();
    let path = temp_path("road.png");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    encoded.save(&path).unwrap();

    let loaded = load_rgb_image(&path).unwrap();
    assert_eq!(loaded, img);
    let mask = color_thresh(&loaded.as_view(), (120, 255));
    assert_eq!(mask, color_thresh(&img.as_view(), (120, 255)));
}

#[test]
fn mask_png_uses_full_scale() {
    let img = RgbImageU8::from_fn(6, 2, |x, _| if x < 3 { [0; 3] } else { [255; 3] });
    let mask = abs_sobel_thresh(&img.as_view(), Orientation::X, 3, (20, 255)).unwrap();
    let path = temp_path("nested/dir/mask.png");
    save_mask_png(&mask, &path).unwrap();

    let back = image::open(&path).unwrap().into_luma8();
    assert_eq!(back.dimensions(), (6, 2));
    for y in 0..2 {
        for x in 0..6 {
            let expected = if mask.is_set(x, y) { 255 } else { 0 };
            assert_eq!(back.get_pixel(x as u32, y as u32)[0], expected);
        }
    }
}

#[test]
fn saturation_plane_can_be_written() {
    let img = road_like_rgb(12, 4);
    let hls = lane_masks::color::rgb_to_hls(&img.as_view());
    let path = temp_path("saturation.png");
    save_grayscale_u8(&hls.s, &path).unwrap();
    let back = image::open(&path).unwrap().into_luma8();
    assert_eq!(back.into_raw(), hls.s.data());
}

#[test]
fn missing_image_reports_path() {
    let path = temp_path("does_not_exist.png");
    match load_rgb_image(&path) {
        Err(Error::ImageLoad { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ImageLoad error, got {other:?}"),
    }
}
