#![cfg(target_arch = "wasm32")]

use arena_rounds::ArenaMatch;
use js_sys::{Array, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn config_js(players: usize) -> JsValue {
    let roster: Vec<_> = (0..players)
        .map(|i| {
            json(&format!(
                r#"{{"color":{{"r":{},"g":0,"b":0}},"template":"tank{}"}}"#,
                i * 60,
                i + 1
            ))
        })
        .collect();
    let config = js_sys::Object::new();
    Reflect::set(&config, &"roster".into(), &roster.into_iter().collect::<Array>()).unwrap();
    config.into()
}

fn json(text: &str) -> JsValue {
    js_sys::JSON::parse(text).unwrap()
}

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &name.into()).unwrap()
}

#[wasm_bindgen_test]
fn start_emits_spawn_commands_for_each_player() {
    let mut arena = ArenaMatch::new();
    arena.start_match(config_js(3)).unwrap();

    let commands = Array::from(&arena.drain_commands().unwrap());
    let spawns = commands
        .iter()
        .filter(|cmd| field(cmd, "type").as_string().as_deref() == Some("spawn"))
        .count();

    assert_eq!(spawns, 3);
}

#[wasm_bindgen_test]
fn single_player_roster_is_rejected() {
    let mut arena = ArenaMatch::new();

    let err = arena.start_match(config_js(1)).unwrap_err();

    assert!(err.as_string().unwrap().contains("roster"));
}

#[wasm_bindgen_test]
fn elimination_reported_by_host_ends_the_round() {
    let mut arena = ArenaMatch::new();
    arena.start_match(config_js(2)).unwrap();
    arena.tick(3000.0).unwrap();

    arena.set_avatar_active(0, false);
    let events = Array::from(&arena.tick(16.0).unwrap());

    let ended = events.get(0);
    assert_eq!(field(&ended, "type").as_string().as_deref(), Some("round_ended"));
    assert_eq!(field(&ended, "winner").as_f64(), Some(2.0));

    let snapshot = arena.snapshot().unwrap();
    assert_eq!(field(&snapshot, "phase").as_string().as_deref(), Some("round_ending"));
}

#[wasm_bindgen_test]
fn failed_spawn_drops_out_of_the_snapshot() {
    let mut arena = ArenaMatch::new();
    arena.start_match(config_js(3)).unwrap();

    assert!(arena.fail_spawn(2));

    let snapshot = arena.snapshot().unwrap();
    let slots = Array::from(&field(&snapshot, "slots"));
    assert_eq!(field(&slots.get(2), "spawned").as_bool(), Some(false));
}
