#![no_main]
use libfuzzer_sys::fuzz_target;
use uri_value::UriValue;

fuzz_target!(|data: &str| {
    let u = UriValue::from_string(data);
    assert_eq!(u.get_string().unwrap(), data);

    let Ok(c) = u.components() else {
        return;
    };
    for part in [c.scheme(), c.user(), c.host(), c.path(), c.query(), c.fragment()] {
        assert!(data.contains(part));
    }
    assert_ne!(c.port(), Some(0));
    assert!(u.is_literal());
});
