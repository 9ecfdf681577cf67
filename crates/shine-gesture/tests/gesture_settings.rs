use shine_gesture::{GestureRecognizer, GestureSettings, SettingsError};
use shine_test::test;
use std::env;

const CONFIG_ROOT: &str = "./tests/gesture_configs";

#[test]
fn test_load_with_env() {
    env::set_var("GESTURE__Y_TILT_NEG_THRESHOLD", "-0.75");

    let settings = GestureSettings::load(format!("{CONFIG_ROOT}/touch.json")).unwrap();
    log::debug!("{settings:#?}");

    assert_eq!(settings.min_horizontal_swipe_length, 25.0);
    assert_eq!(settings.min_vertical_swipe_length, 15.0);
    assert_eq!(settings.min_tap_duration, 0.05);
    assert_eq!(settings.max_tap_duration, 0.5);
    assert_eq!(settings.x_tilt_pos_threshold, 0.4);
    assert_eq!(settings.y_tilt_neg_threshold, -0.75);
    assert_eq!(settings.acceleration_precision, Some(2));

    let recognizer = GestureRecognizer::new(settings.clone()).unwrap();
    assert_eq!(recognizer.settings(), &settings);
}

#[test]
fn test_load_invalid() {
    let err = GestureSettings::load(format!("{CONFIG_ROOT}/invalid.json")).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidTapWindow { .. }), "{err}");
}

#[test]
fn test_load_missing_file() {
    let err = GestureSettings::load(format!("{CONFIG_ROOT}/missing.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)), "{err}");
}

#[test]
fn test_json_round_trip_defaults() {
    let json = serde_json::to_string(&GestureSettings::default()).unwrap();
    assert_eq!(GestureSettings::from_json(&json).unwrap(), GestureSettings::default());
    assert_eq!(GestureSettings::from_json("{}").unwrap(), GestureSettings::default());
}
