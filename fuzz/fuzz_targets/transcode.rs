#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate bson2json;

fuzz_target!(|buf: &[u8]| {
    let _ = bson2json::to_json(buf, false);
    let _ = bson2json::to_json(buf, true);
});
