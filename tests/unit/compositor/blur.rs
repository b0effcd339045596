use super::*;

#[test]
fn kernel_is_normalised_and_symmetric() {
    let k = kernel(2.0);
    assert_eq!(k.len(), 13);
    assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    assert_eq!(k[0], k[12]);
    assert!(k[6] > k[5]);
}

#[test]
fn blur_constant_frame_is_identity() {
    let img = RgbaImage::from_pixel(6, 5, Rgba([10, 20, 30, 255]));
    let out = gaussian_blur(&img, 2.0).unwrap();
    assert_eq!(out, img);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let mut img = RgbaImage::from_pixel(9, 9, Rgba([0, 0, 0, 0]));
    img.put_pixel(4, 4, Rgba([255, 255, 255, 255]));

    let out = gaussian_blur(&img, 1.2).unwrap();

    let nonzero = out.pixels().filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    assert_eq!(out.get_pixel(3, 4)[3], out.get_pixel(5, 4)[3]);
    assert_eq!(out.get_pixel(4, 3)[3], out.get_pixel(4, 5)[3]);

    let sum_a: u32 = out.pixels().map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 20);
}

#[test]
fn blur_keeps_transparent_surroundings_colourless() {
    let mut img = RgbaImage::from_pixel(7, 1, Rgba([255, 255, 255, 0]));
    img.put_pixel(3, 0, Rgba([200, 0, 0, 255]));

    let out = gaussian_blur(&img, 1.0).unwrap();

    let edge = out.get_pixel(2, 0);
    assert!(edge[3] > 0);
    assert!(edge[1] < 10 && edge[2] < 10);
}

#[test]
fn blur_rejects_non_positive_sigma() {
    let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
    assert!(matches!(gaussian_blur(&img, 0.0), Err(StampError::Validation(_))));
    assert!(matches!(gaussian_blur(&img, f32::NAN), Err(StampError::Validation(_))));
}
