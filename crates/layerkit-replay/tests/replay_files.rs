use layerkit_history::{Outcome, StoreOptions};
use layerkit_replay::{run, Script};
use layerkit_settings::Config;
use std::fs;
use tempfile::TempDir;

const SESSION: &str = r#"{
    "maxHistory": 1,
    "elements": [
        {"id": "t1", "type": "text", "x": 10, "y": 10, "width": 40, "fontSize": 12, "text": "hi"},
        {"id": "p1", "type": "pencil", "x": 50, "y": 0, "points": [0, 0, 3, 4]}
    ],
    "steps": [
        {"op": "init", "snapshot": {"layers": [{"id": "t1", "position": {"x": 10, "y": 10}}]}},
        {"op": "apply", "snapshot": {"layers": [{"id": "t1", "position": {"x": 11, "y": 10}}]}},
        {"op": "apply", "snapshot": {"layers": [{"id": "t1", "position": {"x": 12, "y": 10}}]}},
        {"op": "undo"},
        {"op": "undo"},
        {"op": "redo"},
        {"op": "bounds", "selected": ["t1", "p1"]}
    ]
}"#;

#[test]
fn test_replay_from_files() {
    let dir = TempDir::new().unwrap();
    let script_path = dir.path().join("session.json");
    let config_path = dir.path().join("config.toml");
    fs::write(&script_path, SESSION).unwrap();
    fs::write(&config_path, "[history]\nmax_history = 50\nnotify_on_noop = true\n").unwrap();

    let config = Config::load_from_file(&config_path).unwrap();
    let script = Script::load(&script_path).unwrap();
    let options = StoreOptions {
        max_history: config.history.max_history,
        notify_on_noop: config.history.notify_on_noop,
    };
    let report = run(script, options);

    // The script's maxHistory of 1 wins over the config
    let undo_depths: Vec<usize> = report.steps.iter().map(|s| s.undo_depth).collect();
    assert_eq!(undo_depths, vec![0, 1, 1, 0, 0, 1, 1]);
    assert_eq!(report.steps[4].outcome, Some(Outcome::NoOp));
    assert_eq!(report.steps[5].outcome, Some(Outcome::Redone));
    assert_eq!(report.steps[5].revision, Some(2));

    // Text is 10..50 x 10..22, the pencil contributes its placeholder box
    let bounds = report.steps[6].bounds.unwrap();
    assert_eq!(bounds.x, 10.0);
    assert_eq!(bounds.y, 0.0);
    assert_eq!(bounds.width, 140.0);
    assert_eq!(bounds.height, 100.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["finalSnapshot"]["revision"], 2);
    assert_eq!(json["steps"][6]["op"], "bounds");
}

#[test]
fn test_missing_script_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(Script::load(&dir.path().join("nope.json")).is_err());
}
