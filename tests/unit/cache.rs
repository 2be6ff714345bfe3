use projectflow::cache::reset_tokens::token_digest;

#[test]
fn reset_token_digest_hides_the_token() {
    let token = "8f14e45fceea167a5a36dedd4bea2543";
    let digest = token_digest(token);
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(digest, token);
    assert_eq!(digest, token_digest(token));
    assert_ne!(digest, token_digest("another-token"));
}
