//! Integration tests for outbound signing.
//!
//! These tests verify the end-to-end flow:
//! 1. Credentials are assembled from PEM fixtures
//! 2. Requests and client payment parameters are signed with the merchant key
//! 3. The signatures verify against the merchant certificate
//! 4. Gateway requests carry headers a transport can send as-is

use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::Method;
use proptest::prelude::*;
use serde_json::json;

use wechat_pay_guard::adapters::wechat_pay::{GatewayClient, OrderIdentifier, TransactionChannel};
use wechat_pay_guard::domain::signing::{rsa_sha256, CanonicalString, AUTHORIZATION_SCHEME};
use wechat_pay_guard::{
    Certificate, ClientPaymentSigner, CredentialStore, GatewayError, MerchantPrivateKey, Nonce,
    RequestSigner, UnixTimestamp,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const MERCHANT_KEY: &str = include_str!("fixtures/merchant_key.pem");
const MERCHANT_CERT: &str = include_str!("fixtures/merchant_cert.pem");
const PLATFORM_CERT: &str = include_str!("fixtures/platform_cert.pem");

const GET_SIGNATURE: &str = "ujpOkxaWiZtp8mXjRJxRDGElVTz/vb8V18IZlNTufUfG9uh1gTSGHdBWry1DVi1Lac+j0umHF+zaIrlkYvCMoLewEdoSr7jjUrqWh3ntA0g8o1yAUii25YFOk2dCHc7ICNMldivuKWL5kGjt/jOzeOG+P3jOc/LMUAyyjBYXZ0eAf78JTPafBd4kgPn8YPnocnNlRGce5cH+25To6ZqaLl5THrwwv1JDdKFnWxFLBmcaekPUOItN9PS99Opk6J30qp6d4dJOgFCG1iF3d0b/oDDVlUuVuPyoX4w3sx93tTDdDRRfjzhmml1jsj3l2B24GAQvRY+Ydd2dSw9OcsRPsg==";
const POST_SIGNATURE: &str = "i785R/oQ3RgndETOm51OjwaYvbXFHY/+QJyH+6UAMmg6kH0loSqK+/7ijTf7jvhPEFllqWwUZ+rU0UmnUbY6arH7FNDYsrTdb/LkhptV6qyOYySlK7thWwa6Azu+h+iMkNnMRrQ7FGBFVvtxjRbP0W7+6d8pYVmC+M1p46aeX68ARjB2A+e75Zh1aTyp6L+UzOHpTmSbz6oNGjkUlak1Whs7IZYYyzBC8gOSF6YCvWtlZKbnL1SSuAA2xYXFfzQqtsLno9Md0teENRrrWbPNC/0JB5RLoBvVxRZ9lhe85eXetS0G2SGgxVB/z8ukiz/1KQQbGkf7j0E9RjHMXZJV0Q==";

fn credentials() -> Arc<CredentialStore> {
    Arc::new(
        CredentialStore::new("wx18802234", "16000000")
            .with_api_v3_key("8934e7d15453e97507ef794cf7b0519d")
            .unwrap()
            .with_merchant_private_key(MerchantPrivateKey::from_pem(MERCHANT_KEY).unwrap())
            .with_merchant_certificate(Certificate::from_pem(MERCHANT_CERT).unwrap())
            .with_platform_certificate(Certificate::from_pem(PLATFORM_CERT).unwrap()),
    )
}

fn fixed_time() -> (UnixTimestamp, Nonce) {
    (UnixTimestamp::from_secs(1_600_000), Nonce::parse("hhhhhhhhh").unwrap())
}

fn merchant_verifies(message: &[u8], signature: &str) -> bool {
    let cert = Certificate::from_pem(MERCHANT_CERT).unwrap();
    rsa_sha256::verify(cert.public_key(), message, signature).unwrap()
}

// =============================================================================
// Authorization Header
// =============================================================================

#[test]
fn authorization_header_is_deterministic_for_fixed_inputs() {
    let signer = RequestSigner::new(credentials());
    let (ts, nonce) = fixed_time();
    let signed = signer
        .sign_request_at(&Method::GET, "/v3/api/wechat_pay", r#"{"name":"Ruby"}"#, ts, nonce)
        .unwrap();

    assert_eq!(
        signed.authorization,
        format!(
            "{} mchid=\"16000000\",nonce_str=\"hhhhhhhhh\",signature=\"{}\",serial_no=\"0254A801C0\",timestamp=\"1600000\"",
            AUTHORIZATION_SCHEME, GET_SIGNATURE
        )
    );
}

#[test]
fn method_feeds_the_signature() {
    let signer = RequestSigner::new(credentials());
    let (ts, nonce) = fixed_time();
    let post = signer
        .sign_request_at(&Method::POST, "/v3/api/wechat_pay", r#"{"name":"Ruby"}"#, ts, nonce)
        .unwrap();
    assert_eq!(post.signature, POST_SIGNATURE);
    assert_ne!(post.signature, GET_SIGNATURE);
}

#[test]
fn fresh_requests_use_fresh_nonces() {
    let signer = RequestSigner::new(credentials());
    let a = signer.sign_request(&Method::GET, "/v3/certificates", "").unwrap();
    let b = signer.sign_request(&Method::GET, "/v3/certificates", "").unwrap();
    assert_ne!(a.nonce, b.nonce);
    assert!(merchant_verifies(a.canonical_string.as_bytes(), &a.signature));
    assert!(merchant_verifies(b.canonical_string.as_bytes(), &b.signature));
}

#[test]
fn signing_without_private_key_is_a_configuration_error() {
    let store = CredentialStore::new("wx18802234", "16000000")
        .with_merchant_certificate(Certificate::from_pem(MERCHANT_CERT).unwrap());
    let signer = RequestSigner::new(Arc::new(store));
    assert!(matches!(
        signer.sign_request(&Method::GET, "/v3/certificates", ""),
        Err(GatewayError::Configuration(_))
    ));
}

// =============================================================================
// Client Payment Parameters
// =============================================================================

#[test]
fn client_parameters_verify_against_merchant_certificate() {
    let signer = ClientPaymentSigner::new(credentials());

    let app = signer.app_payment_params("wx18802234", "wx201410272009395522657a690389285100").unwrap();
    let canonical = format!(
        "{}\n{}\n{}\n{}\n",
        app.app_id, app.time_stamp, app.nonce_str, app.prepay_id
    );
    assert!(merchant_verifies(canonical.as_bytes(), &app.sign));

    let jsapi = signer.jsapi_payment_params("wx18802234", "wx201410272009395522657a690389285100").unwrap();
    let canonical = format!(
        "wx18802234\n{}\n{}\n{}\n",
        jsapi.time_stamp, jsapi.nonce_str, jsapi.package
    );
    assert!(merchant_verifies(canonical.as_bytes(), &jsapi.pay_sign));
}

// =============================================================================
// Gateway Requests
// =============================================================================

#[test]
fn gateway_requests_carry_verifiable_authorization() {
    let client = GatewayClient::new(credentials());
    let requests = vec![
        client
            .place_order(
                TransactionChannel::Native,
                json!({
                    "description": "Image形象店-深圳腾大-QQ公仔",
                    "out_trade_no": "1217752501201407033233368018",
                    "amount": { "total": 1 },
                    "notify_url": "https://example.com/notify"
                }),
            )
            .unwrap(),
        client
            .query_order(&OrderIdentifier::TransactionId("4323400972202104305133344444".into()))
            .unwrap(),
        client.close_order("N3344445").unwrap(),
        client.media_upload("logo.jpg", b"\xff\xd8\xff").unwrap(),
    ];

    for request in requests {
        let header = request.headers[AUTHORIZATION].to_str().unwrap().to_string();
        assert!(header.starts_with(AUTHORIZATION_SCHEME));

        let field = |name: &str| {
            let start = header.find(&format!("{}=\"", name)).unwrap() + name.len() + 2;
            let end = header[start..].find('"').unwrap() + start;
            header[start..end].to_string()
        };
        let canonical = CanonicalString::request(
            request.method.as_str(),
            &request.path,
            UnixTimestamp::from_secs(field("timestamp").parse().unwrap()),
            &Nonce::parse(field("nonce_str")).unwrap(),
            &request.body,
        );
        assert!(
            merchant_verifies(canonical.as_bytes(), &field("signature")),
            "{} {} did not verify",
            request.method,
            request.path
        );
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn signatures_verify_only_for_the_signed_body(
        body in "[ -~]{0,80}",
        other in "[ -~]{0,80}",
    ) {
        let signer = RequestSigner::new(credentials());
        let signed = signer.sign_request(&Method::POST, "/v3/pay/transactions/native", &body).unwrap();
        prop_assert!(merchant_verifies(signed.canonical_string.as_bytes(), &signed.signature));

        prop_assume!(other != body);
        let altered = CanonicalString::request(
            "POST",
            "/v3/pay/transactions/native",
            signed.timestamp,
            &signed.nonce,
            &other,
        );
        prop_assert!(!merchant_verifies(altered.as_bytes(), &signed.signature));
    }
}
