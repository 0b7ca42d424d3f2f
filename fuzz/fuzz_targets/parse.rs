#![no_main]
use dsn_parse::Dsn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(d) = Dsn::parse(data) else {
        return;
    };

    let tail = d.path().len() + d.query().map_or(0, |q| q.len() + 1);
    let auth_start = if d.scheme().is_empty() {
        0
    } else {
        d.scheme().len() + 3
    };
    let auth = &data[auth_start..data.len() - tail];
    let at = auth.rfind('@');

    let mut buf = String::with_capacity(data.len());
    if !d.scheme().is_empty() {
        buf.push_str(d.scheme());
        buf.push_str("://");
    }
    if let Some(at) = at {
        buf.push_str(d.username());
        if auth[..at].contains(':') {
            buf.push(':');
            buf.push_str(d.password());
        }
        buf.push('@');
    }
    buf.push_str(d.protocol());
    if auth[at.map_or(0, |i| i + 1)..].contains('(') {
        buf.push('(');
        buf.push_str(d.address());
        buf.push(')');
    }
    buf.push_str(d.path());
    if let Some(q) = d.query() {
        buf.push('?');
        buf.push_str(q);
    }
    assert_eq!(data, buf);

    let r = Dsn::parse(buf.as_str()).unwrap();
    assert_eq!(r.scheme(), d.scheme());
    assert_eq!(r.username(), d.username());
    assert_eq!(r.password(), d.password());
    assert_eq!(r.protocol(), d.protocol());
    assert_eq!(r.address(), d.address());
    assert_eq!(r.path(), d.path());
    assert_eq!(r.params(), d.params());
});
