use lane_masks::RgbImageU8;

/// Left half black, right half white, split at `split_x`.
pub fn vertical_step_rgb(width: usize, height: usize, split_x: usize) -> RgbImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbImageU8::from_fn(width, height, |x, _| {
        if x < split_x {
            [0, 0, 0]
        } else {
            [255, 255, 255]
        }
    })
}

/// Dark asphalt with a bright yellow stripe and a soft diagonal ramp, so every
/// mask has something to respond to.
pub fn road_like_rgb(width: usize, height: usize) -> RgbImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let stripe = width / 3..width / 3 + (width / 8).max(1);
    RgbImageU8::from_fn(width, height, |x, y| {
        if stripe.contains(&x) {
            [230, 200, 40]
        } else {
            let v = (40 + (x + 2 * y) % 60) as u8;
            [v, v, v.saturating_add(5)]
        }
    })
}

/// Deterministic pseudo-random texture (xorshift).
pub fn noise_rgb(width: usize, height: usize, seed: u32) -> RgbImageU8 {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    let data = (0..width * height)
        .map(|_| {
            let v = next();
            [v as u8, (v >> 8) as u8, (v >> 16) as u8]
        })
        .collect();
    RgbImageU8::new(width, height, data).expect("pixel count matches dimensions")
}
