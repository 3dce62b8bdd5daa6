use clom_core::{OptionError, Registry, SettingValue, ValueKind};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn subject_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register_setting("name", "Mr X").unwrap();
    registry.register_setting("height", 6.0f32).unwrap();
    registry.register_flag("--smart").unwrap();
    registry
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn full_command_line_updates_every_option() {
    let mut registry = subject_registry();
    registry
        .process(args(&["prog", "name", "Mark", "height", "5.2", "--smart"]))
        .unwrap();

    assert_eq!(registry.get_setting_value::<String>("name").unwrap(), "Mark");
    assert_eq!(registry.get_setting_value::<f32>("height").unwrap(), 5.2);
    assert!(registry.is_flag_set("--smart").unwrap());
}

#[test]
fn bare_program_name_keeps_defaults() {
    let mut registry = subject_registry();
    registry.process(args(&["prog"])).unwrap();

    assert_eq!(registry.get_setting_value::<String>("name").unwrap(), "Mr X");
    assert_eq!(registry.get_setting_value::<f32>("height").unwrap(), 6.0);
    assert!(!registry.is_flag_set("--smart").unwrap());
}

#[test]
fn order_of_options_does_not_matter() {
    let mut registry = subject_registry();
    registry
        .process(["prog", "--smart", "height", "4.75", "name", "Ada"])
        .unwrap();

    assert_eq!(registry.get_setting_value::<String>("name").unwrap(), "Ada");
    assert_eq!(registry.get_setting_value::<f32>("height").unwrap(), 4.75);
    assert!(registry.is_flag_set("--smart").unwrap());
}

#[test]
fn trailing_setting_reports_missing_value_and_hint() {
    let mut registry = subject_registry();
    registry.set_user_hint("usage: prog [name NAME] [height FEET] [--smart]");

    let err = registry.process(["prog", "height"]).unwrap_err();
    assert!(err.is_usage_error());

    let mut out = Vec::new();
    registry.report(&err, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Missing value for setting: height\nusage: prog [name NAME] [height FEET] [--smart]\n"
    );
}

#[test]
fn unknown_token_aborts_before_later_tokens() {
    let mut registry = subject_registry();
    let err = registry.process(["prog", "foo", "name", "X"]).unwrap_err();

    assert_eq!(err, OptionError::UnknownOption("foo".into()));
    assert_eq!(registry.get_setting_value::<String>("name").unwrap(), "Mr X");
}

#[test]
fn bad_float_reports_setting_value_and_kind() {
    let mut registry = subject_registry();
    let err = registry.process(["prog", "height", "abc"]).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid value 'abc' for setting height (expected float)"
    );
}

#[test]
fn processing_twice_accumulates_state() {
    let mut registry = subject_registry();
    registry.process(["prog", "--smart"]).unwrap();
    registry.process(["prog", "name", "Grace"]).unwrap();

    assert!(registry.is_flag_set("--smart").unwrap());
    assert_eq!(
        registry.get_setting_value::<String>("name").unwrap(),
        "Grace"
    );
}

// ---------------------------------------------------------------------------
// Dynamic registration
// ---------------------------------------------------------------------------

#[test]
fn parsed_registration_behaves_like_typed_registration() {
    let mut registry = Registry::new();
    registry.register_setting_parsed("level", "i32", "2").unwrap();
    registry.register_setting_parsed("initial", "char", "q").unwrap();
    registry.register_setting_parsed("scale", "double", "1.5").unwrap();

    registry
        .process(["prog", "level", "9", "initial", "Rust"])
        .unwrap();

    assert_eq!(registry.get_setting_value::<i32>("level").unwrap(), 9);
    assert_eq!(registry.get_setting_value::<char>("initial").unwrap(), 'R');
    assert_eq!(registry.get_setting_value::<f64>("scale").unwrap(), 1.5);
    assert_eq!(
        registry.setting("scale").map(|s| s.kind()),
        Some(ValueKind::Double)
    );
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn registry_state_serializes_in_registration_order() {
    let mut registry = subject_registry();
    registry.process(["prog", "name", "Mark", "--smart"]).unwrap();

    let json = serde_json::to_value(&registry).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "settings": [
                {"name": "name", "value": {"kind": "string", "value": "Mark"}},
                {"name": "height", "value": {"kind": "float", "value": 6.0}},
            ],
            "flags": [
                {"name": "--smart", "is_set": true},
            ],
            "user_hint": "Invalid command line options!",
        })
    );

    let back: Registry = serde_json::from_value(json).unwrap();
    assert_eq!(back, registry);
    assert_eq!(
        back.setting("name").map(|s| s.value.clone()),
        Some(SettingValue::String("Mark".into()))
    );
}

#[test]
fn deserializing_duplicate_settings_fails() {
    let json = serde_json::json!({
        "settings": [
            {"name": "name", "value": {"kind": "string", "value": "a"}},
            {"name": "name", "value": {"kind": "int", "value": 1}},
        ],
        "flags": [],
        "user_hint": "hint",
    });

    let err = serde_json::from_value::<Registry>(json).unwrap_err();
    assert!(
        err.to_string().contains("The setting name is already registered"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserializing_setting_and_flag_with_one_name_fails() {
    let json = serde_json::json!({
        "settings": [
            {"name": "name", "value": {"kind": "string", "value": "a"}},
        ],
        "flags": [
            {"name": "name", "is_set": false},
        ],
        "user_hint": "hint",
    });

    let err = serde_json::from_value::<Registry>(json).unwrap_err();
    assert!(
        err.to_string()
            .contains("name is registered as both a setting and a flag"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserializing_duplicate_flags_fails() {
    let json = serde_json::json!({
        "settings": [],
        "flags": [
            {"name": "--smart", "is_set": true},
            {"name": "--smart", "is_set": false},
        ],
        "user_hint": "hint",
    });

    let err = serde_json::from_value::<Registry>(json).unwrap_err();
    assert!(
        err.to_string().contains("The flag --smart is already registered"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialized_registry_keeps_flag_state_and_hint() {
    let json = serde_json::json!({
        "settings": [],
        "flags": [
            {"name": "--smart", "is_set": true},
            {"name": "--json", "is_set": false},
        ],
        "user_hint": "usage: prog [--smart]",
    });

    let mut registry: Registry = serde_json::from_value(json).unwrap();
    assert!(registry.is_flag_set("--smart").unwrap());
    assert!(!registry.is_flag_set("--json").unwrap());
    assert_eq!(registry.user_hint(), "usage: prog [--smart]");

    registry.process(["prog", "--json"]).unwrap();
    assert!(registry.is_flag_set("--json").unwrap());
}
