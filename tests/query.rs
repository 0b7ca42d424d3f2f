use dsn_parse::{
    pct_enc::{DecodedChunk, EStr},
    query::{collapse, FormDecoder, QueryDecoder, QueryValues},
};

// Repeated keys collect their values in order.
fn values(pairs: &[(&str, &str)]) -> QueryValues {
    let mut out = QueryValues::new();
    for &(k, v) in pairs {
        out.entry(k.to_owned()).or_default().push(v.to_owned());
    }
    out
}

#[test]
fn form_decode() {
    assert_eq!(
        FormDecoder.decode("level=debug&ttl=1s"),
        values(&[("level", "debug"), ("ttl", "1s")])
    );
    assert_eq!(
        FormDecoder.decode("a=1&a=2&b=&c&&=x"),
        values(&[("a", "1"), ("a", "2"), ("b", ""), ("c", ""), ("", "x")])
    );
    assert_eq!(
        FormDecoder.decode("k%20ey=v+a%2Bl%3Due&x=a=b"),
        values(&[("k ey", "v a+l=ue"), ("x", "a=b")])
    );
    assert_eq!(
        FormDecoder.decode("mascot=Ferris%20the%20crab&lang=%E2%9C%93"),
        values(&[("mascot", "Ferris the crab"), ("lang", "✓")])
    );
    assert_eq!(FormDecoder.decode("name=%e5%bc%a0"), values(&[("name", "张")]));
    assert!(FormDecoder.decode("").is_empty());
    assert!(FormDecoder.decode("&&").is_empty());
}

#[test]
fn form_decode_malformed() {
    for s in [
        "a=%",
        "a=%2",
        "a=%2g",
        "%=1",
        "ok=1&bad=%x1",
        "a=1;b=2",
        "a;=1",
    ] {
        assert!(FormDecoder.decode(s).is_empty(), "{s}");
    }
}

#[test]
fn form_decode_lossy() {
    assert_eq!(
        FormDecoder.decode("a=%C3%28&b=%80&c=ok"),
        values(&[("a", "\u{FFFD}("), ("b", "\u{FFFD}"), ("c", "ok")])
    );
    assert_eq!(
        FormDecoder.decode("%FF%FE=1"),
        values(&[("\u{FFFD}\u{FFFD}", "1")])
    );
}

#[test]
fn collapse_first_value() {
    let mut vals = values(&[("a", "1"), ("a", "2"), ("c", "3")]);
    vals.insert("b".to_owned(), Vec::new());
    let params = collapse(vals);
    assert_eq!(params.len(), 2);
    assert_eq!(params["a"], "1");
    assert_eq!(params["c"], "3");
    assert!(!params.contains_key("b"));
}

#[test]
fn estr() {
    assert!(EStr::new("a%20b").is_some());
    assert!(EStr::new("").is_some());
    assert!(EStr::new("%").is_none());
    assert!(EStr::new("%a").is_none());
    assert!(EStr::new("%ag").is_none());
    assert!(EStr::new("100%").is_none());

    let s = EStr::new("id=3&name=%E5%BC%A0%E4%B8%89").unwrap();
    let mut split = s.split('&');

    let it = split.next().unwrap();
    assert_eq!(it, "id=3");
    assert_eq!(*it.decode().to_bytes(), *b"id=3");

    let (k, v) = it.split_once('=').unwrap();
    assert_eq!(k, "id");
    assert_eq!(v, "3");

    let it = split.next().unwrap();
    assert_eq!(it, "name=%E5%BC%A0%E4%B8%89");
    let (k, v) = it.split_once('=').unwrap();
    assert_eq!(k.decode().to_string().unwrap(), "name");
    assert_eq!(v.decode().to_string().unwrap(), "张三");

    assert!(split.next().is_none());
    assert_eq!(EStr::new("a").unwrap().split_once('='), None);
}

#[test]
fn decode_chunks() {
    let s = EStr::new("a+b%20c").unwrap();
    assert!(s.decode().eq([
        DecodedChunk::Unencoded("a+b"),
        DecodedChunk::Decoded(b' '),
        DecodedChunk::Unencoded("c"),
    ]));
    assert!(s.decode_form().eq([
        DecodedChunk::Unencoded("a"),
        DecodedChunk::Decoded(b' '),
        DecodedChunk::Unencoded("b"),
        DecodedChunk::Decoded(b' '),
        DecodedChunk::Unencoded("c"),
    ]));

    assert_eq!(
        *EStr::new("%FF%FE").unwrap().decode().to_bytes(),
        [0xffu8, 0xfe]
    );
    assert_eq!(
        EStr::new("%FF").unwrap().decode().to_string().unwrap_err(),
        [0xffu8]
    );
    assert_eq!(
        EStr::new("%FF+%41").unwrap().decode_form().to_string_lossy(),
        "\u{FFFD} A"
    );
}

#[test]
#[should_panic]
fn split_on_percent() {
    let _ = EStr::new("a%20b").unwrap().split('%');
}
