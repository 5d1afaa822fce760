// Test serialization using json
#![cfg(feature = "serde")]

use glyph_text::raster::Config;
use glyph_text::{Rgba, Settings, Vec2};
use serde::{de::Deserialize, ser::Serialize};
use std::cmp::PartialEq;
use std::fmt::Debug;

fn test<X: Debug + PartialEq + Serialize + for<'a> Deserialize<'a>>(x: X, t: &str) {
    match serde_json::to_string(&x) {
        Ok(text) => assert_eq!(text, t),
        Err(err) => panic!("Ser of '{x:?}' failed: {err}"),
    }

    match serde_json::from_str::<X>(t) {
        Ok(v) => assert_eq!(v, x),
        Err(err) => panic!("Deser of '{t}' failed: {err}"),
    }
}

#[test]
fn vec2() {
    test(Vec2(1.0, 2.0), "[1.0,2.0]");
}

#[test]
fn color() {
    test(Rgba::rgba(1, 2, 3, 4), "{\"r\":1,\"g\":2,\"b\":3,\"a\":4}");
}

#[test]
fn settings() {
    test(
        Settings::default(),
        "{\"fill\":true,\"outline\":false,\"size\":32,\"outline_size\":1,\"kerning\":true,\
         \"color\":{\"r\":255,\"g\":255,\"b\":255,\"a\":255},\
         \"outline_color\":{\"r\":0,\"g\":0,\"b\":255,\"a\":255}}",
    );
}

#[test]
fn config() {
    test(Config::default(), "{\"hinting\":true,\"face_index\":0}");
}
