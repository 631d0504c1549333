// Integration tests for dataset invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

#[test]
fn glizzy_sprites_are_unique_bare_pngs() {
    assert!(!glizzy_cat::GLIZZY_SPRITES.is_empty());
    let mut seen = HashSet::new();
    for s in glizzy_cat::GLIZZY_SPRITES {
        assert!(seen.insert(*s), "duplicate sprite '{}' in GLIZZY_SPRITES", s);
        assert!(s.ends_with(".png"), "sprite '{}' is not a png", s);
        assert!(
            !s.contains('/'),
            "sprite '{}' should be a bare filename, the pile prefixes the images dir",
            s
        );
    }
}

#[test]
fn feed_responses_are_unique_and_nonempty() {
    let mut seen = HashSet::new();
    for r in glizzy_cat::FEED_RESPONSES {
        assert!(!r.trim().is_empty(), "empty feed response");
        assert!(seen.insert(*r), "duplicate feed response '{}'", r);
    }
    // The random pick needs some variety to stay funny.
    assert!(glizzy_cat::FEED_RESPONSES.len() >= 5);
}
