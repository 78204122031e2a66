#![no_main]

use golex::{scan, Kind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let (tokens, err) = scan(&s);

    // Output is bounded: a scan can add at most one synthetic semicolon per
    // emitted token plus one at end of input.
    assert!(tokens.len() <= s.chars().count().saturating_mul(2) + 2);

    let mut prev = (0u32, 0u32);
    let mut any_invalid = false;
    for tok in &tokens {
        assert!(tok.line >= 1 && tok.col >= 1);
        assert!((tok.line, tok.col) >= prev, "position went backwards");
        prev = (tok.line, tok.col);

        assert!(!tok.val.is_empty());
        any_invalid |= !tok.kind.is_valid();

        let classes = usize::from(tok.kind.is_keyword())
            + usize::from(tok.kind.is_operator())
            + usize::from(tok.kind.is_literal());
        assert!(classes <= 1);

        if tok.kind == Kind::INVALID {
            // A stray rune is exactly one rune.
            assert_eq!(tok.val.chars().count(), 1);
        }
    }

    // A diagnostic and an invalid token always come together.
    assert_eq!(err.is_some(), any_invalid);
});
