/// Integration tests for crypto-core JWT functionality
///
/// This test module covers:
/// - Token issuance and decoding through the public API
/// - Tamper detection
/// - Error classification for invalid tokens
use crypto_core::jwt::{Claims, Role, TokenCodec, TokenError};
use uuid::Uuid;

const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

fn codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET).expect("Failed to build codec")
}

// ============================================================================
// Issuance
// ============================================================================

#[test]
fn test_fresh_token_decodes_to_same_claims_for_every_role() {
    let codec = codec();

    for role in [Role::Customer, Role::Admin] {
        let claims = Claims::new(Uuid::new_v4(), "test@example.com", "Test User", role);
        let token = codec.issue(&claims).expect("Should issue token");
        let decoded = codec.decode(&token).expect("Should decode token");

        assert_eq!(decoded, claims);
        assert_eq!(decoded.role, role);
    }
}

#[test]
fn test_codecs_sharing_secret_interoperate() {
    let issuer = codec();
    let verifier = codec();

    let claims = Claims::new(Uuid::new_v4(), "test@example.com", "Test User", Role::Customer);
    let token = issuer.issue(&claims).unwrap();

    assert_eq!(verifier.decode(&token).unwrap().sub, claims.sub);
}

// ============================================================================
// Tampering
// ============================================================================

#[test]
fn test_tampered_payload_is_rejected() {
    let codec = codec();
    let claims = Claims::new(Uuid::new_v4(), "test@example.com", "Test User", Role::Customer);
    let token = codec.issue(&claims).unwrap();

    // Swap the payload for one claiming the admin role, keep the original signature
    let admin = Claims {
        role: Role::Admin,
        ..claims
    };
    let forged_payload = codec.issue(&admin).unwrap();

    let original: Vec<&str> = token.split('.').collect();
    let forged: Vec<&str> = forged_payload.split('.').collect();
    let spliced = format!("{}.{}.{}", original[0], forged[1], original[2]);

    assert_eq!(codec.decode(&spliced), Err(TokenError::InvalidSignature));
}

#[test]
fn test_truncated_token_is_malformed() {
    let codec = codec();
    let claims = Claims::new(Uuid::new_v4(), "test@example.com", "Test User", Role::Customer);
    let token = codec.issue(&claims).unwrap();
    let truncated: String = token.split('.').take(2).collect::<Vec<_>>().join(".");

    assert!(matches!(
        codec.decode(&truncated),
        Err(TokenError::Malformed(_))
    ));
}

#[test]
fn test_empty_token_is_malformed() {
    assert!(matches!(codec().decode(""), Err(TokenError::Malformed(_))));
}
