mod common;

use common::gradient_rgba;
use imagelab::ops::adjustments::{adjust_contrast, grayscale, invert};
use imagelab::ops::effects::{pixelate, sketch};
use imagelab::ops::filters::gaussian_blur;
use imagelab::ops::transform::{FlipAxis, RotateDirection, flip, rotate90};
use imagelab::{EditError, PixelBuffer, PixelLayout};

#[test]
fn four_clockwise_rotations_reproduce_the_buffer() {
    let start = gradient_rgba(5, 3);
    let mut buf = start.clone();
    for _ in 0..4 {
        buf = rotate90(&buf, RotateDirection::Clockwise).unwrap();
    }
    assert_eq!(buf, start, "four 90° rotations must be the exact identity");
}

#[test]
fn clockwise_then_counter_clockwise_is_identity() {
    let start = gradient_rgba(4, 7);
    let there = rotate90(&start, RotateDirection::Clockwise).unwrap();
    assert_eq!((there.width(), there.height()), (7, 4), "dimensions swap");
    let back = rotate90(&there, RotateDirection::CounterClockwise).unwrap();
    assert_eq!(back, start);
}

#[test]
fn double_flip_is_identity_on_both_axes() {
    let start = gradient_rgba(6, 4);
    for axis in [FlipAxis::Horizontal, FlipAxis::Vertical] {
        let once = flip(&start, axis).unwrap();
        assert_ne!(once, start, "{:?} flip must move pixels", axis);
        let twice = flip(&once, axis).unwrap();
        assert_eq!(twice, start, "{:?} flip twice must be the identity", axis);
    }
}

#[test]
fn flip_mirrors_the_expected_axis() {
    let start = gradient_rgba(4, 3);
    let h = flip(&start, FlipAxis::Horizontal).unwrap();
    assert_eq!(h.pixel(0, 1), start.pixel(3, 1));
    let v = flip(&start, FlipAxis::Vertical).unwrap();
    assert_eq!(v.pixel(2, 0), start.pixel(2, 2));
}

#[test]
fn invert_twice_is_identity_and_alpha_survives() {
    let start = gradient_rgba(5, 5);
    let once = invert(&start).unwrap();
    for y in 0..5 {
        for x in 0..5 {
            assert_eq!(once.pixel(x, y)[3], start.pixel(x, y)[3], "alpha must not invert");
        }
    }
    assert_eq!(invert(&once).unwrap(), start);
}

#[test]
fn grayscale_applies_rec601_and_shrinks_to_one_channel() {
    let red = PixelBuffer::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let gray = grayscale(&red).unwrap();
    assert_eq!(gray.layout(), PixelLayout::Gray8);
    // 0.299 * 255 rounds to 76.
    assert_eq!(gray.pixel(1, 1), &[76]);
}

#[test]
fn contrast_zero_is_the_identity() {
    let start = gradient_rgba(6, 6);
    let out = adjust_contrast(&start, 0).unwrap();
    for (a, b) in out.data().iter().zip(start.data()) {
        assert!(
            (*a as i16 - *b as i16).abs() <= 1,
            "contrast(0) drifted: {} vs {}",
            a,
            b
        );
    }
}

#[test]
fn contrast_spreads_values_away_from_the_midpoint() {
    let buf = PixelBuffer::from_pixel(1, 1, image::Rgba([100, 128, 200, 255]));
    let out = adjust_contrast(&buf, 128).unwrap();
    let px = out.pixel(0, 0);
    assert!(px[0] < 100, "below-midpoint channel must darken, got {}", px[0]);
    assert_eq!(px[1], 128, "midpoint is a fixed point");
    assert!(px[2] > 200, "above-midpoint channel must brighten, got {}", px[2]);
    assert_eq!(px[3], 255);
}

#[test]
fn blur_even_strength_matches_next_odd() {
    let start = gradient_rgba(16, 9);
    let even = gaussian_blur(&start, 4).unwrap();
    let odd = gaussian_blur(&start, 5).unwrap();
    assert_eq!(even, odd, "kernel size is forced odd, 4 must behave as 5");
}

#[test]
fn blur_keeps_a_constant_image_constant() {
    let start = PixelBuffer::from_pixel(12, 12, image::Rgba([90, 140, 30, 255]));
    let out = gaussian_blur(&start, 9).unwrap();
    for (a, b) in out.data().iter().zip(start.data()) {
        assert!(
            (*a as i16 - *b as i16).abs() <= 1,
            "blur moved a flat image: {} vs {}",
            a,
            b
        );
    }
}

#[test]
fn blur_promotes_grayscale_input_to_rgba() {
    let gray = PixelBuffer::new(8, 8, PixelLayout::Gray8);
    let out = gaussian_blur(&gray, 3).unwrap();
    assert_eq!(out.layout(), PixelLayout::Rgba8);
    assert_eq!((out.width(), out.height()), (8, 8));
}

#[test]
fn pixelate_one_is_the_identity() {
    let start = gradient_rgba(9, 9);
    assert_eq!(pixelate(&start, 1).unwrap(), start);
}

#[test]
fn pixelate_reduces_the_color_count_to_the_block_grid() {
    let start = gradient_rgba(8, 8);
    let out = pixelate(&start, 4).unwrap();
    assert_eq!((out.width(), out.height()), (8, 8), "dimensions are restored");
    let mut distinct = std::collections::HashSet::new();
    for y in 0..8 {
        for x in 0..8 {
            distinct.insert(out.pixel(x, y).to_vec());
        }
    }
    assert!(
        distinct.len() <= 4,
        "8×8 at block size 4 is a 2×2 grid, found {} colors",
        distinct.len()
    );
}

#[test]
fn sketch_of_white_stays_white() {
    let white = PixelBuffer::from_pixel(8, 8, image::Rgba([255, 255, 255, 255]));
    let out = sketch(&white).unwrap();
    assert_eq!(out.layout(), PixelLayout::Rgba8);
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(out.pixel(x, y), &[255, 255, 255, 255]);
        }
    }
}

#[test]
fn sketch_accepts_grayscale_input() {
    let gray = PixelBuffer::new(6, 6, PixelLayout::Gray8);
    let out = sketch(&gray).unwrap();
    assert_eq!(out.layout(), PixelLayout::Rgba8);
}

#[test]
fn every_op_reports_the_empty_buffer() {
    let empty = PixelBuffer::empty();
    assert!(matches!(rotate90(&empty, RotateDirection::Clockwise), Err(EditError::EmptyBuffer)));
    assert!(matches!(flip(&empty, FlipAxis::Vertical), Err(EditError::EmptyBuffer)));
    assert!(matches!(grayscale(&empty), Err(EditError::EmptyBuffer)));
    assert!(matches!(invert(&empty), Err(EditError::EmptyBuffer)));
    assert!(matches!(adjust_contrast(&empty, 10), Err(EditError::EmptyBuffer)));
    assert!(matches!(gaussian_blur(&empty, 3), Err(EditError::EmptyBuffer)));
    assert!(matches!(pixelate(&empty, 2), Err(EditError::EmptyBuffer)));
    assert!(matches!(sketch(&empty), Err(EditError::EmptyBuffer)));
}
