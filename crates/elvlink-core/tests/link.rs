use elvlink_core::link::{
    amazon_store_url, append_jwt, create_sku_deeplink, is_link_supported, play_store_url,
};

#[test]
fn sku_deeplink_uses_fixed_template() {
    for (marketplace, sku) in [
        ("iq__2Jfs", "5MmuT4"),
        ("m", "s"),
        ("", ""),
    ] {
        assert_eq!(
            create_sku_deeplink(marketplace, sku),
            format!("elvwallet://items/{marketplace}/ictr/{sku}")
        );
    }
}

#[test]
fn sku_segments_are_not_encoded() {
    // reserved characters pass through untouched
    assert_eq!(
        create_sku_deeplink("a/b", "c?d#e"),
        "elvwallet://items/a/b/ictr/c?d#e"
    );
}

#[test]
fn support_check_only_looks_at_scheme() {
    assert!(is_link_supported("elvwallet://items/m/ictr/s"));
    assert!(is_link_supported("elvwallet://anything?jwt=x"));
    assert!(!is_link_supported("Elvwallet://items/m/ictr/s"));
    assert!(!is_link_supported(" elvwallet://items"));
    assert!(!is_link_supported("https://elvwallet://"));
}

#[test]
fn append_jwt_adds_query_parameter() {
    assert_eq!(
        append_jwt("elvwallet://items/m/ictr/s", "abc"),
        "elvwallet://items/m/ictr/s?jwt=abc"
    );
    assert_eq!(
        append_jwt("elvwallet://items/m/ictr/s?x=1", "abc"),
        "elvwallet://items/m/ictr/s?x=1&jwt=abc"
    );
}

#[test]
fn append_jwt_encodes_token_value() {
    assert_eq!(
        append_jwt("elvwallet://items/m/ictr/s", "a&b=c"),
        "elvwallet://items/m/ictr/s?jwt=a%26b%3Dc"
    );
}

#[test]
fn append_jwt_uses_uri_component_encoding() {
    assert_eq!(
        append_jwt("elvwallet://items/m/ictr/s", "a b"),
        "elvwallet://items/m/ictr/s?jwt=a%20b"
    );
    assert_eq!(
        append_jwt("elvwallet://items/m/ictr/s", "a b~!"),
        "elvwallet://items/m/ictr/s?jwt=a%20b~!"
    );
}

#[test]
fn append_jwt_keeps_input_bytes() {
    assert_eq!(
        append_jwt("elvwallet://items/m/../x/ictr/s", "t"),
        "elvwallet://items/m/../x/ictr/s?jwt=t"
    );
    assert_eq!(
        append_jwt("ELVWALLET://items/m/ictr/s", "t"),
        "ELVWALLET://items/m/ictr/s?jwt=t"
    );
    assert_eq!(
        append_jwt(" elvwallet://items/m/ictr/s", "t"),
        " elvwallet://items/m/ictr/s?jwt=t"
    );
}

#[test]
fn store_urls() {
    assert_eq!(
        play_store_url("elvwallet://items/m/ictr/s"),
        "market://details?id=app.eluvio.wallet&referrer=url%3Delvwallet%3A%2F%2Fitems%2Fm%2Fictr%2Fs"
    );
    assert_eq!(amazon_store_url(), "amzn://apps/android?p=app.eluvio.wallet");
}

#[test]
fn referrer_encodes_nested_query_once() {
    let url = play_store_url("elvwallet://items/m/ictr/s?x=1&jwt=a%2Bb");
    assert!(url.ends_with("url%3Delvwallet%3A%2F%2Fitems%2Fm%2Fictr%2Fs%3Fx%3D1%26jwt%3Da%252Bb"));
}
