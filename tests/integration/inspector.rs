//! The inspector over parsed and decoded databases

use fgdkit_binary::{decode, encode};
use fgdkit_language::parse_str;
use fgdkit_runtime::{Inspector, Reply};

const SOURCE: &str = r#"
@BaseClass = Targetname [ targetname(target_source) : "Name" ]
@BaseClass base(Targetname) = Toggle [ input Toggle(void) ]
@SolidClass base(Toggle) = func_brush [
    solidity(choices) : "Solidity" : 0 =
    [
        0 : "Toggle"
        1 : "Never Solid"
    ]
]
@FilterClass = filter_multi []
"#;

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        Reply::Quit => panic!("unexpected quit"),
    }
}

#[test]
fn browse_decoded_database() {
    let fgd = decode(&encode(&parse_str(SOURCE).unwrap()).unwrap()).unwrap();
    let inspector = Inspector::new(fgd);

    assert!(text(inspector.eval("list filter")).contains("filter_multi"));
    assert_eq!(
        text(inspector.eval("bases func_brush")),
        "func_brush\n  Toggle\n    Targetname"
    );

    let detail = text(inspector.eval("kv func_brush solidity"));
    assert!(detail.contains("0 = Toggle"));
    assert!(detail.contains("1 = Never Solid"));
    assert!(text(inspector.eval("io func_brush")).contains("input  Toggle(void)"));
}

#[test]
fn keywords_cover_every_class() {
    let inspector = Inspector::new(parse_str(SOURCE).unwrap());
    let keywords = inspector.keywords();
    for class in ["Targetname", "Toggle", "func_brush", "filter_multi"] {
        assert!(keywords.iter().any(|kw| kw == class), "{class}");
    }
}
