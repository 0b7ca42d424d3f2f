#![no_main]
use dsn_parse::{
    pct_enc::EStr,
    query::{FormDecoder, QueryDecoder, QueryValues},
};
use libfuzzer_sys::fuzz_target;
use url::form_urlencoded;

fuzz_target!(|data: &str| {
    let values = FormDecoder.decode(data);
    if EStr::new(data).is_none() || data.contains(';') {
        assert!(values.is_empty());
        return;
    }

    let mut expected = QueryValues::new();
    for (k, v) in form_urlencoded::parse(data.as_bytes()) {
        expected.entry(k.into_owned()).or_default().push(v.into_owned());
    }
    assert_eq!(values, expected);
});
