//! Integration tests for the LSB codec.
//!
//! These exercise the public API end to end: framing, capacity limits,
//! progress reporting and persistence through PNG files.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use rand::{rngs::StdRng, Rng, SeedableRng};

use lsb_stego::image_io;
use lsb_stego::processing::{
    capacity_bits, decode, decode_with, embed_bits, encode, encode_with, extract_bits, BitStream,
    CapacityError, Framing, NoProgress,
};

/// Cover image filled with seeded noise so LSBs start out random.
fn noisy_image(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbaImage::from_fn(width, height, |_, _| {
        Rgba([rng.gen(), rng.gen(), rng.gen(), rng.gen()])
    })
}

#[test]
fn test_roundtrip_various_payloads() {
    let long = "lorem ipsum ".repeat(40);
    let payloads = [
        "",
        "A",
        "Hello, world!",
        "username:alice,views:5",
        "naïve café – 日本語 – 🦀🦀",
        long.as_str(),
    ];

    for (i, payload) in payloads.iter().enumerate() {
        let mut image = noisy_image(64, 48, i as u64);
        encode(&mut image, payload, &mut NoProgress).unwrap();
        assert_eq!(decode(&image, &mut NoProgress).unwrap(), *payload);
    }
}

#[test]
fn test_2x2_too_small_4x4_fits() {
    let mut small = RgbImage::new(2, 2);
    assert_eq!(capacity_bits(&small), 12);
    assert!(matches!(
        encode(&mut small, "A", &mut NoProgress),
        Err(CapacityError::PayloadTooLarge { .. })
    ));

    let mut big = RgbImage::new(4, 4);
    assert_eq!(capacity_bits(&big), 48);
    encode(&mut big, "A", &mut NoProgress).unwrap();
    assert_eq!(decode(&big, &mut NoProgress).unwrap(), "A");
}

#[test]
fn test_capacity_boundary() {
    // 16 pixels = 48 bits = 5 payload bytes + terminator
    let mut image = noisy_image(4, 4, 7);
    encode(&mut image, "exact", &mut NoProgress).unwrap();
    assert_eq!(decode(&image, &mut NoProgress).unwrap(), "exact");

    let mut image = noisy_image(4, 4, 7);
    let before = image.clone();
    let err = encode(&mut image, "exact!", &mut NoProgress).unwrap_err();
    assert_eq!(
        err,
        CapacityError::PayloadTooLarge {
            required_bits: 56,
            capacity_bits: 48,
        }
    );
    assert_eq!(image, before);
}

#[test]
fn test_empty_payload_needs_room_for_terminator() {
    // 3x1 holds 9 bits; the empty payload needs 8
    let mut image = RgbImage::new(3, 1);
    encode(&mut image, "", &mut NoProgress).unwrap();

    // 2x1 holds 6 bits, not even room for the terminator
    let mut image = RgbImage::new(2, 1);
    assert!(encode(&mut image, "", &mut NoProgress).is_err());
}

#[test]
fn test_capacity_boundary_single_bit_over() {
    // 3x3 holds 27 bits
    let exact: BitStream = (0..27).map(|i| (i % 2) as u8).collect();
    let mut image = noisy_image(3, 3, 21);
    embed_bits(&mut image, &exact, &mut NoProgress).unwrap();

    let over: BitStream = (0..28).map(|i| (i % 2) as u8).collect();
    let mut image = noisy_image(3, 3, 21);
    let before = image.clone();
    let mut events = Vec::new();

    let err = embed_bits(&mut image, &over, &mut |p: u8| events.push(p)).unwrap_err();

    assert_eq!(
        err,
        CapacityError::PayloadTooLarge {
            required_bits: 28,
            capacity_bits: 27,
        }
    );
    assert_eq!(image, before);
    assert!(events.is_empty());
}

#[test]
fn test_channels_past_payload_are_unchanged() {
    let original = noisy_image(32, 32, 99);
    let mut image = original.clone();
    let payload = "only the first few pixels change";
    encode(&mut image, payload, &mut NoProgress).unwrap();

    let used_bits = (payload.len() + 1) * 8;
    let channels = original
        .pixels()
        .zip(image.pixels())
        .flat_map(|(a, b)| (0..4).map(move |c| (c, a[c], b[c])));

    let mut carrier_index = 0;
    for (channel, before, after) in channels {
        if channel == 3 {
            assert_eq!(before, after, "alpha must never change");
            continue;
        }
        if carrier_index >= used_bits {
            assert_eq!(before, after, "carrier {} past payload changed", carrier_index);
        } else {
            assert_eq!(before & !1, after & !1);
        }
        carrier_index += 1;
    }
}

#[test]
fn test_empty_payload_writes_zero_byte() {
    let mut image = noisy_image(10, 10, 3);
    encode(&mut image, "", &mut NoProgress).unwrap();

    let bits = extract_bits(&image, &mut NoProgress);
    assert_eq!(bits.complete_bytes()[0], 0);
    assert_eq!(decode(&image, &mut NoProgress).unwrap(), "");
}

#[test]
fn test_progress_is_monotonic_and_ends_with_100() {
    for (width, height) in [(3, 2), (7, 3), (500, 1), (33, 31), (100, 100)] {
        let mut image = RgbImage::from_pixel(width, height, Rgb([128, 64, 32]));

        let mut encode_events = Vec::new();
        encode(&mut image, "x", &mut |p: u8| encode_events.push(p)).unwrap();

        let mut decode_events = Vec::new();
        decode(&image, &mut |p: u8| decode_events.push(p)).unwrap();

        for events in [&encode_events, &decode_events] {
            assert!(events.windows(2).all(|w| w[0] <= w[1]), "{:?}", events);
            assert_eq!(events.last(), Some(&100));
            assert!(events.iter().all(|&p| p <= 100));
        }
        // One event per 500 pixels plus the final 100
        let expected = (width * height / 500) as usize + 1;
        assert_eq!(encode_events.len(), expected);
        assert_eq!(decode_events.len(), expected);
    }
}

#[test]
fn test_length_prefixed_roundtrip_with_nul() {
    let payload = "before\0after";
    let mut image = noisy_image(20, 20, 5);
    encode_with(&mut image, payload, Framing::LengthPrefixed, &mut NoProgress).unwrap();

    assert_eq!(
        decode_with(&image, Framing::LengthPrefixed, &mut NoProgress).unwrap(),
        payload
    );
    // The terminated reading sees the header's leading zero byte first
    assert_eq!(decode(&image, &mut NoProgress).unwrap(), "");
}

#[test]
fn test_roundtrip_through_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encoded.png");

    let mut image = noisy_image(50, 40, 11);
    encode(&mut image, "saved to disk", &mut NoProgress).unwrap();
    image_io::save(&image, &path).unwrap();

    let loaded = image_io::load(&path).unwrap();
    assert_eq!(loaded, image);
    assert_eq!(decode(&loaded, &mut NoProgress).unwrap(), "saved to disk");
}

#[test]
fn test_rgb_png_loads_as_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgb.png");

    let mut rgb = RgbImage::from_pixel(8, 8, Rgb([200, 100, 50]));
    encode(&mut rgb, "rgb", &mut NoProgress).unwrap();
    rgb.save(&path).unwrap();

    let loaded = image_io::load(&path).unwrap();
    assert_eq!(decode(&loaded, &mut NoProgress).unwrap(), "rgb");
}
