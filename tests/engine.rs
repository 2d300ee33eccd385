mod common;

use common::gradient;
use photo_edit_engine::image_proc::DecodeLimits;
use photo_edit_engine::{EditError, EditParameters, ImageBuffer, ImageStore};

fn store_with(img: ImageBuffer) -> ImageStore {
    let mut store = ImageStore::new();
    store.load(img);
    store
}

fn single_pixel_result(pixel: [u8; 3], params: EditParameters) -> [u8; 3] {
    let mut store = store_with(ImageBuffer::filled(1, 1, pixel).unwrap());
    store.set_params(params).unwrap();
    store.edited().unwrap().get_pixel(0, 0)
}

#[test]
fn exposure_scenario() {
    let params = EditParameters {
        exposure: 2.0,
        ..Default::default()
    };
    assert_eq!(single_pixel_result([100, 100, 100], params), [200, 200, 200]);
}

#[test]
fn contrast_clamp_scenario() {
    let params = EditParameters {
        contrast: 20,
        ..Default::default()
    };
    assert_eq!(single_pixel_result([250, 250, 250], params), [255, 255, 255]);
}

#[test]
fn channel_shift_scenario() {
    let params = EditParameters {
        temperature: 10,
        ..Default::default()
    };
    assert_eq!(single_pixel_result([100, 100, 100], params), [110, 100, 90]);
}

#[test]
fn identity_parameters_reproduce_original() {
    let mut store = store_with(gradient(37, 23));
    store.set_exposure(3.0).unwrap();
    store.set_params(EditParameters::default()).unwrap();
    assert_eq!(store.edited(), store.original());
}

#[test]
fn every_pass_recomputes_from_source() {
    let mut store = store_with(gradient(16, 16));
    store.set_contrast(50).unwrap();
    let once = store.edited().cloned();
    // Re-applying the same value must not compound
    store.set_contrast(50).unwrap();
    assert_eq!(store.edited().cloned(), once);
}

#[test]
fn flips_are_involutions_through_the_store() {
    let img = gradient(31, 17);
    let mut store = store_with(img.clone());

    store.flip_horizontal().unwrap();
    assert_ne!(store.original(), Some(&img));
    store.flip_horizontal().unwrap();
    assert_eq!(store.original(), Some(&img));

    store.flip_vertical().unwrap();
    store.flip_vertical().unwrap();
    assert_eq!(store.original(), Some(&img));
    assert_eq!(store.edited(), Some(&img));
}

#[test]
fn flip_keeps_edits_applied() {
    let mut store = store_with(gradient(8, 4));
    store.set_tint(12).unwrap();
    store.flip_vertical().unwrap();

    let original = store.original().unwrap();
    let edited = store.edited().unwrap();
    let [r, g, b] = original.get_pixel(2, 1);
    let expected = [
        (r as i32 - 12).clamp(0, 255) as u8,
        (g as i32 + 12).clamp(0, 255) as u8,
        (b as i32 - 12).clamp(0, 255) as u8,
    ];
    assert_eq!(edited.get_pixel(2, 1), expected);
}

#[test]
fn grayscale_toggle_pairs_restore_color() {
    let img = gradient(12, 9);
    let mut store = store_with(img.clone());
    store.set_temperature(-15).unwrap();
    let color_result = store.edited().cloned();

    store.toggle_grayscale().unwrap();
    assert!(store.params().grayscale);
    let cache = store.grayscale_cache().cloned();
    assert!(cache.is_some());

    store.toggle_grayscale().unwrap();
    assert!(!store.params().grayscale);
    assert_eq!(store.edited().cloned(), color_result);

    store.toggle_grayscale().unwrap();
    assert_eq!(store.grayscale_cache().cloned(), cache);
}

#[test]
fn grayscale_dimensions_track_original() {
    let mut store = store_with(gradient(10, 6));
    store.toggle_grayscale().unwrap();
    store.flip_horizontal().unwrap();
    assert_eq!(
        store.grayscale_cache().unwrap().dimensions(),
        store.original().unwrap().dimensions()
    );
    assert_eq!(
        store.edited().unwrap().dimensions(),
        store.original().unwrap().dimensions()
    );
}

#[test]
fn load_failure_leaves_state_untouched() {
    let mut store = store_with(gradient(5, 5));
    store.set_exposure(1.5).unwrap();
    let original = store.original().cloned();
    let edited = store.edited().cloned();
    let revision = store.revision();

    let err = store
        .load_bytes(&[0u8; 64], &DecodeLimits::default())
        .unwrap_err();
    assert!(matches!(err, EditError::Decode(_)));
    assert_eq!(store.original().cloned(), original);
    assert_eq!(store.edited().cloned(), edited);
    assert_eq!(store.revision(), revision);
}

#[test]
fn load_accepts_encoded_png() {
    let img = gradient(6, 4);
    let mut store = ImageStore::new();
    store
        .load_bytes(&common::png_bytes(&img), &DecodeLimits::default())
        .unwrap();
    assert_eq!(store.original(), Some(&img));
    assert_eq!((store.width(), store.height()), (Some(6), Some(4)));
}
