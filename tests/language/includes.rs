//! Integration tests for `@include` handling

use fgdkit_foundation::ErrorKind;
use fgdkit_language::{Loader, MemoryFs, ParseOptions, load};
use fgdkit_schema::Fgd;

#[test]
fn include_merges_files() {
    let fs = MemoryFs::new()
        .with_file("base.fgd", "@BaseClass = Targetname [ targetname(target_source) ]")
        .with_file(
            "game.fgd",
            "@include \"base.fgd\"\n@PointClass base(Targetname) = info_target []",
        );
    let fgd = load(&fs, "game.fgd").unwrap();
    assert_eq!(fgd.len(), 2);
    assert!(fgd.get("info_target").unwrap().keyvalues().contains("targetname"));
}

#[test]
fn extension_is_optional_and_case_insensitive() {
    let fs = MemoryFs::new()
        .with_file("shared/Base.FGD", "@BaseClass = Angles [ angles(angle) ]")
        .with_file("game.fgd", "@include \"SHARED\\base\"\n@PointClass base(Angles) = a []");
    let fgd = load(&fs, "game").unwrap();
    assert_eq!(fgd.len(), 2);
}

#[test]
fn self_include_is_parsed_once() {
    let fs = MemoryFs::new().with_file("loop.fgd", "@include \"loop.fgd\"\n@PointClass = a []");
    let fgd = load(&fs, "loop.fgd").unwrap();
    assert_eq!(fgd.len(), 1);
    assert_eq!(fgd.files().count(), 1);
}

#[test]
fn mutual_includes_are_parsed_once() {
    let fs = MemoryFs::new()
        .with_file("a.fgd", "@include \"b.fgd\"\n@PointClass = from_a []")
        .with_file("b.fgd", "@include \"a.fgd\"\n@PointClass = from_b []")
        .with_file("c.fgd", "@include \"a.fgd\"\n@include \"b.fgd\"\n@PointClass = from_c []");

    let fgd = load(&fs, "c.fgd").unwrap();
    assert_eq!(fgd.len(), 3);
    let mut files: Vec<_> = fgd.files().collect();
    files.sort_unstable();
    assert_eq!(files, ["a.fgd", "b.fgd", "c.fgd"]);
}

#[test]
fn missing_include_names_the_site() {
    let fs = MemoryFs::new().with_file("game.fgd", "\n@include \"missing.fgd\"");
    let err = load(&fs, "game.fgd").unwrap_err();
    assert_eq!(err.kind, ErrorKind::FileNotFound("missing.fgd".into()));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("game.fgd"));
    assert_eq!(ctx.line, Some(2));
}

#[test]
fn earlier_entities_survive_a_failed_include() {
    let fs = MemoryFs::new()
        .with_file("good.fgd", "@PointClass = kept []")
        .with_file("bad.fgd", "@PointClass = broken [ x(nonsense) ]")
        .with_file("game.fgd", "@include \"good.fgd\"\n@include \"bad.fgd\"");

    let loader = Loader::new(&fs).with_options(ParseOptions::new().with_resolve_bases(false));
    let mut fgd = Fgd::new();
    assert!(loader.load_into(&mut fgd, "game.fgd").is_err());
    assert!(fgd.contains("kept"));
    // The failing class was registered when its body opened.
    assert!(fgd.contains("broken"));
    assert!(fgd.get("broken").unwrap().keyvalues().is_empty());
}

#[test]
fn unresolved_bases_can_be_kept() {
    let fs = MemoryFs::new().with_file("game.fgd", "@PointClass base(Elsewhere) = a []");
    let loader = Loader::new(&fs).with_options(ParseOptions::new().with_resolve_bases(false));
    assert!(loader.load("game.fgd").is_ok());
    assert!(load(&fs, "game.fgd").is_err());
}
