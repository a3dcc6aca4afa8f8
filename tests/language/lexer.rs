//! Integration tests for the lexer

use fgdkit_language::{Lexer, TokenKind, TokenStream};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn entity_header_tokens() {
    use TokenKind::{BracketClose, BracketOpen, Colon, Eof, Equals, ParenArgs, String};
    assert_eq!(
        kinds("@PointClass base(Targetname) = info_target : \"Target\" []"),
        [String, String, ParenArgs, Equals, String, Colon, String, BracketOpen, BracketClose, Eof]
    );
}

#[test]
fn comments_are_skipped_but_newlines_kept() {
    use TokenKind::{Eof, Newline, String};
    assert_eq!(kinds("a // comment [ ] =\nb"), [String, Newline, String, Eof]);
}

#[test]
fn quoted_text_keeps_spaces_and_escapes() {
    let tokens = Lexer::tokenize_all(r#""Line one\nTwo \"quoted\"""#).unwrap();
    assert_eq!(tokens[0].text, "Line one\nTwo \"quoted\"");
}

#[test]
fn source_name_is_reported() {
    let mut lexer = Lexer::new("\n\n  \"open").with_source_name("base.fgd");
    assert_eq!(lexer.source_name(), Some("base.fgd"));
    let err = loop {
        match lexer.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => panic!("expected an error"),
            Ok(_) => {}
            Err(err) => break err,
        }
    };
    assert!(err.is_syntax());
    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("base.fgd"));
    assert_eq!(ctx.line, Some(3));
}

#[test]
fn stray_braces_are_errors() {
    assert!(Lexer::tokenize_all("{").unwrap_err().is_syntax());
    assert!(Lexer::tokenize_all(")").unwrap_err().is_syntax());
    assert!(Lexer::tokenize_all("size((1)").unwrap_err().is_syntax());
}
