#![no_main]
use dsn_parse::pct_enc::EStr;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Some(s) = EStr::new(data) else {
        return;
    };
    let _ = s.decode().to_string();
    let _ = s.decode_form().to_string();
    let _ = s.decode_form().to_string_lossy();
});
