use alien_invasion::error::ConfigError;
use alien_invasion::settings::*;

#[test]
fn defaults_are_valid() {
    let settings = Settings::default();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.ship_limit, 3);
    assert_eq!(settings.alien_points, 50);
    assert_eq!(settings.bullets_allowed, 3);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let settings = Settings::from_toml_str(
        "alien_points = 75\nbg_color = [0, 0, 0]\nfullscreen = false\n",
    )
    .unwrap();
    assert_eq!(settings.alien_points, 75);
    assert_eq!(settings.bg_color, Color(0, 0, 0));
    assert!(!settings.fullscreen);
    assert_eq!(
        settings,
        Settings {
            alien_points: 75,
            bg_color: Color(0, 0, 0),
            fullscreen: false,
            ..Settings::default()
        }
    );
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let err = Settings::from_toml_str("alien_points = \"lots\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn out_of_range_values_are_rejected() {
    let cases = [
        ("alien_speed = 0.0", "alien_speed"),
        ("ship_speed = -1.0", "ship_speed"),
        ("alien_width = 0", "alien_width"),
        ("speedup_scale = 0.5", "speedup_scale"),
        ("bullets_allowed = 0", "bullets_allowed"),
        ("frame_millis = 0", "frame_millis"),
    ];
    for (text, expected) in cases {
        match Settings::from_toml_str(text) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected, "{text}"),
            other => panic!("{text}: expected invalid setting, got {other:?}"),
        }
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let err = Settings::load(std::path::Path::new("/no/such/settings.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn load_reads_file_from_disk() {
    let path = std::env::temp_dir().join(format!("alien_invasion_settings_{}.toml", std::process::id()));
    std::fs::write(&path, "ship_limit = 5\n").unwrap();
    let loaded = Settings::load(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded.unwrap().ship_limit, 5);
}

// ── Dynamic settings ──────────────────────────────────────────────────────────

#[test]
fn dynamic_settings_start_from_base() {
    let settings = Settings::default();
    let dynamic = settings.initialize_dynamic_settings();
    assert_eq!(dynamic.ship_speed, settings.ship_speed);
    assert_eq!(dynamic.bullet_speed, settings.bullet_speed);
    assert_eq!(dynamic.alien_speed, settings.alien_speed);
    assert_eq!(dynamic.bullets_allowed, settings.bullets_allowed);
    assert_eq!(dynamic.fleet_direction, FleetDirection::Right);
}

#[test]
fn speed_increase_compounds_and_reinit_undoes_it() {
    let settings = Settings::default();
    let mut dynamic = settings.initialize_dynamic_settings();
    dynamic.increase_speed(settings.speedup_scale);
    dynamic.increase_speed(settings.speedup_scale);

    let expected = settings.ship_speed * settings.speedup_scale * settings.speedup_scale;
    assert!((dynamic.ship_speed - expected).abs() < 1e-6);
    assert_eq!(dynamic.bullets_allowed, settings.bullets_allowed);

    assert_eq!(
        settings.initialize_dynamic_settings(),
        Settings::default().initialize_dynamic_settings()
    );
}

#[test]
fn fleet_direction_flips() {
    assert_eq!(FleetDirection::Right.sign(), 1.0);
    assert_eq!(FleetDirection::Left.sign(), -1.0);
    assert_eq!(FleetDirection::Right.flip(), FleetDirection::Left);
    assert_eq!(FleetDirection::Left.flip().flip(), FleetDirection::Left);
}
