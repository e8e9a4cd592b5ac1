use approx::assert_relative_eq;

use panorama_core::config::ZoomConfig;
use panorama_core::viewport::Viewport;

fn viewport() -> Viewport {
    Viewport::new(&ZoomConfig::default(), [800.0, 600.0])
}

#[test]
fn test_scale_is_always_within_bounds() {
    let mut vp = viewport();
    for candidate in [-5.0, 0.0, 0.5, 1.0, 3.3, 10.0, 11.0, 1e9, f32::INFINITY] {
        vp.set_scale(candidate);
        let s = vp.scale();
        assert!((1.0..=10.0).contains(&s), "scale {s} escaped for input {candidate}");
    }
}

#[test]
fn test_nan_scale_keeps_previous() {
    let mut vp = viewport();
    vp.set_scale(3.0);
    vp.set_scale(f32::NAN);
    assert_relative_eq!(vp.scale(), 3.0);
}

#[test]
fn test_translation_forced_to_zero_at_min_scale() {
    let mut vp = viewport();
    vp.set_scale(4.0);
    vp.set_translation(120.0, -80.0);
    assert_relative_eq!(vp.state().translate_x, 120.0);

    vp.set_scale(0.3);
    let state = vp.state();
    assert_relative_eq!(state.scale, 1.0);
    assert_eq!(state.translate_x, 0.0);
    assert_eq!(state.translate_y, 0.0);

    vp.set_translation(50.0, 50.0);
    assert_eq!(vp.state().translate_x, 0.0);
    assert_eq!(vp.state().translate_y, 0.0);
}

#[test]
fn test_max_offset_is_half_the_excess() {
    let mut vp = viewport();
    vp.set_scale(2.0);
    let (max_x, max_y) = vp.max_offset();
    assert_relative_eq!(max_x, 400.0);
    assert_relative_eq!(max_y, 300.0);

    vp.set_translation(1000.0, -1000.0);
    assert_relative_eq!(vp.state().translate_x, 400.0);
    assert_relative_eq!(vp.state().translate_y, -300.0);
}

#[test]
fn test_small_content_cannot_be_panned_on_that_axis() {
    let mut vp = Viewport::with_content_size(&ZoomConfig::default(), [800.0, 600.0], [800.0, 100.0]);
    vp.set_scale(3.0);
    vp.set_translation(100.0, 100.0);
    // 100 * 3 = 300 < 600: no vertical room
    assert_eq!(vp.state().translate_y, 0.0);
    assert_relative_eq!(vp.state().translate_x, 100.0);
}

#[test]
fn test_zooming_out_pulls_translation_back_in() {
    let mut vp = viewport();
    vp.set_scale(4.0);
    vp.set_translation(1200.0, 900.0);
    assert_relative_eq!(vp.state().translate_x, 1200.0);

    vp.set_scale(2.0);
    assert_relative_eq!(vp.state().translate_x, 400.0);
    assert_relative_eq!(vp.state().translate_y, 300.0);
}

#[test]
fn test_apply_delta_multiplies_and_shifts() {
    let mut vp = viewport();
    vp.apply_delta(2.0, 30.0, -10.0);
    let state = vp.state();
    assert_relative_eq!(state.scale, 2.0);
    assert_relative_eq!(state.translate_x, 30.0);
    assert_relative_eq!(state.translate_y, -10.0);

    vp.apply_delta(100.0, 0.0, 0.0);
    assert_relative_eq!(vp.scale(), 10.0);
}

#[test]
fn test_reset_transform() {
    let mut vp = viewport();
    vp.set_scale(6.0);
    vp.set_translation(-200.0, 150.0);
    vp.reset_transform();
    let state = vp.state();
    assert_relative_eq!(state.scale, 1.0);
    assert_eq!((state.translate_x, state.translate_y), (0.0, 0.0));
}

#[test]
fn test_resize_reclamps() {
    let mut vp = viewport();
    vp.set_scale(2.0);
    vp.set_translation(400.0, 300.0);
    vp.resize([400.0, 300.0], [400.0, 300.0]);
    assert_relative_eq!(vp.state().translate_x, 200.0);
    assert_relative_eq!(vp.state().translate_y, 150.0);
}
