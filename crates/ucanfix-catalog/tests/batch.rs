use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier};
use serde_json::Value;
use ucanfix_catalog::{run_batch, BatchKind};
use ucanfix_token::{decode_did_key, decode_segment};

fn run(kind: BatchKind) -> Vec<Value> {
    let mut out = Vec::new();
    run_batch(kind, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    serde_json::Deserializer::from_str(&text)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn find<'a>(fixtures: &'a [Value], comment: &str) -> &'a Value {
    fixtures
        .iter()
        .find(|f| f["comment"] == comment)
        .unwrap_or_else(|| panic!("no fixture commented '{comment}'"))
}

fn tags(fixture: &Value, key: &str) -> Vec<String> {
    fixture["assertions"][key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|v| v.as_str().unwrap().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Checks the corpus-wide shape rules on one fixture.
fn check_shape(fixture: &Value) {
    let token = fixture["token"].as_str().unwrap();
    let segments: Vec<&str> = token.split('.').collect();
    let assertions = &fixture["assertions"];
    let has_header = assertions.get("header").is_some();
    let has_payload = assertions.get("payload").is_some();

    if tags(fixture, "validationErrors") == ["base64Invalid"] {
        // Deliberately corrupt encoding; nothing is asserted about parts.
        assert!(!has_header && !has_payload);
        return;
    }

    match (has_header, has_payload) {
        (true, true) => assert!(segments.len() == 2 || segments.len() == 3),
        (true, false) | (false, true) => assert_eq!(segments.len(), 2),
        (false, false) => panic!("fixture asserts neither header nor payload: {fixture}"),
    }

    // Present segments must decode to exactly the asserted values.
    if has_header {
        assert_eq!(
            decode_segment(segments[0]).unwrap(),
            assertions["header"],
            "header mismatch for {}",
            fixture["comment"]
        );
    }
    if has_payload {
        let index = if has_header { 1 } else { 0 };
        assert_eq!(
            decode_segment(segments[index]).unwrap(),
            assertions["payload"],
            "payload mismatch for {}",
            fixture["comment"]
        );
    }
}

/// Verifies that an embedded proof token is a well-formed three-segment
/// token signed by its declared issuer.
fn check_proof_token(token: &str) {
    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);
    let payload = decode_segment(segments[1]).unwrap();
    let issuer = decode_did_key(payload["iss"].as_str().unwrap()).unwrap();
    let signing_input = format!("{}.{}", segments[0], segments[1]);
    let signature_bytes = URL_SAFE_NO_PAD.decode(segments[2]).unwrap();
    let signature = Signature::from_slice(&signature_bytes).unwrap();
    issuer
        .verify(signing_input.as_bytes(), &signature)
        .unwrap();
}

#[test]
fn invalid_batch_has_the_full_category_roster() {
    let fixtures = run(BatchKind::Invalid);
    assert_eq!(fixtures.len(), 40);
}

#[test]
fn valid_batch_has_the_full_category_roster() {
    let fixtures = run(BatchKind::Valid);
    assert_eq!(fixtures.len(), 15);
}

#[test]
fn every_invalid_fixture_carries_exactly_one_error_list() {
    for fixture in run(BatchKind::Invalid) {
        let validation = tags(&fixture, "validationErrors");
        let type_errors = tags(&fixture, "typeErrors");
        assert!(
            validation.is_empty() != type_errors.is_empty(),
            "expected exactly one non-empty error list: {fixture}"
        );
        check_shape(&fixture);
    }
}

#[test]
fn valid_fixtures_carry_no_error_tags() {
    for fixture in run(BatchKind::Valid) {
        assert!(tags(&fixture, "validationErrors").is_empty());
        assert!(tags(&fixture, "typeErrors").is_empty());
        check_shape(&fixture);
    }
}

#[test]
fn embedded_witness_tokens_verify_under_their_issuers() {
    let valid = run(BatchKind::Valid);
    let invalid = run(BatchKind::Invalid);
    for fixture in valid.iter().chain(invalid.iter()) {
        let Some(proofs) = fixture["assertions"]["payload"]["prf"].as_array() else {
            continue;
        };
        for proof in proofs {
            if let Some(token) = proof.as_str() {
                check_proof_token(token);
            }
        }
    }
}

#[test]
fn batches_share_one_issuer_and_audience() {
    let fixtures = run(BatchKind::Valid);
    let first = &fixtures[0]["assertions"]["payload"];
    let iss = first["iss"].as_str().unwrap();
    let aud = first["aud"].as_str().unwrap();
    for fixture in &fixtures {
        let payload = &fixture["assertions"]["payload"];
        assert_eq!(payload["iss"].as_str().unwrap(), iss);
        assert_eq!(payload["aud"].as_str().unwrap(), aud);
    }
}

#[test]
fn wrong_type_header_still_yields_a_well_formed_token() {
    let fixtures = run(BatchKind::Invalid);
    let fixture = find(&fixtures, "Header `typ` field should be a string");
    assert_eq!(tags(fixture, "typeErrors"), ["typWrongType"]);
    let token = fixture["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(fixture["assertions"]["header"]["typ"], 1);
}

#[test]
fn omitted_signature_keeps_both_decoded_parts() {
    let fixtures = run(BatchKind::Invalid);
    let fixture = find(&fixtures, "UCAN signature is missing");
    assert_eq!(
        tags(fixture, "validationErrors"),
        ["signatureMissingOrInvalid"]
    );
    let token = fixture["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 2);
    assert!(fixture["assertions"].get("header").is_some());
    assert!(fixture["assertions"].get("payload").is_some());
}

#[test]
fn expired_fixture_has_a_past_expiry() {
    let fixtures = run(BatchKind::Invalid);
    let fixture = find(&fixtures, "UCAN has expired");
    assert_eq!(tags(fixture, "validationErrors"), ["expExpired"]);
    let exp = fixture["assertions"]["payload"]["exp"].as_i64().unwrap();
    assert!(exp < ucanfix_token::clock::unix_now());
}

#[test]
fn dangling_proof_reference_claims_a_missing_index() {
    let fixtures = run(BatchKind::Invalid);
    let fixture = find(&fixtures, "Witness referenced in prf scheme does not exist");
    assert_eq!(
        tags(fixture, "validationErrors"),
        ["prfWitnessDoesNotExist"]
    );
    let payload = &fixture["assertions"]["payload"];
    assert_eq!(payload["att"][0]["with"], "prf/2");
    assert_eq!(payload["att"][0]["can"], "ucan/DELEGATE");
    assert_eq!(payload["prf"].as_array().unwrap().len(), 1);
}

#[test]
fn rights_amplification_claims_the_union_of_witness_grants() {
    let fixtures = run(BatchKind::Valid);
    let fixture = find(
        &fixtures,
        "Delegated UCAN has rights amplification from combining witness capabilities",
    );
    let payload = &fixture["assertions"]["payload"];
    assert_eq!(payload["prf"].as_array().unwrap().len(), 2);

    let abilities: Vec<&str> = payload["att"]
        .as_array()
        .unwrap()
        .iter()
        .map(|att| att["can"].as_str().unwrap())
        .collect();
    assert!(abilities.contains(&"db/READ"));
    assert!(abilities.contains(&"db/WRITE"));

    // Each ability is granted by a distinct witness.
    let witness_abilities: Vec<String> = payload["prf"]
        .as_array()
        .unwrap()
        .iter()
        .map(|proof| {
            let segments: Vec<&str> = proof.as_str().unwrap().split('.').collect();
            let witness_payload = decode_segment(segments[1]).unwrap();
            witness_payload["att"][0]["can"].as_str().unwrap().to_string()
        })
        .collect();
    assert!(witness_abilities.contains(&"db/READ".to_string()));
    assert!(witness_abilities.contains(&"db/WRITE".to_string()));
}

#[test]
fn boundary_windows_are_classified_valid() {
    let fixtures = run(BatchKind::Valid);

    let same_expiry = find(
        &fixtures,
        "Witnesses expire at the same time as the delegated UCAN",
    );
    let payload = &same_expiry["assertions"]["payload"];
    let proof = payload["prf"][0].as_str().unwrap();
    let segments: Vec<&str> = proof.split('.').collect();
    let witness_payload = decode_segment(segments[1]).unwrap();
    assert_eq!(payload["exp"], witness_payload["exp"]);
    assert!(tags(same_expiry, "validationErrors").is_empty());

    let same_readiness = find(
        &fixtures,
        "Witness is ready to be used at the same time as the delegated UCAN",
    );
    let payload = &same_readiness["assertions"]["payload"];
    let proof = payload["prf"][0].as_str().unwrap();
    let segments: Vec<&str> = proof.split('.').collect();
    let witness_payload = decode_segment(segments[1]).unwrap();
    assert_eq!(payload["nbf"], witness_payload["nbf"]);
    assert!(tags(same_readiness, "validationErrors").is_empty());
}

#[test]
fn misaligned_witness_audience_differs_from_delegate_issuer() {
    let fixtures = run(BatchKind::Invalid);
    let fixture = find(
        &fixtures,
        "Witness issuer audience DID does not align with delegated issuer DID",
    );
    let payload = &fixture["assertions"]["payload"];
    let proof = payload["prf"][0].as_str().unwrap();
    let segments: Vec<&str> = proof.split('.').collect();
    let witness_payload = decode_segment(segments[1]).unwrap();
    assert_ne!(witness_payload["aud"], payload["iss"]);
}

#[test]
fn mismatched_witness_version_differs_from_delegate_version() {
    let fixtures = run(BatchKind::Invalid);
    let fixture = find(
        &fixtures,
        "Witness UCAN version does not match delegated UCAN version",
    );
    let proof = fixture["assertions"]["payload"]["prf"][0].as_str().unwrap();
    let segments: Vec<&str> = proof.split('.').collect();
    let witness_header = decode_segment(segments[0]).unwrap();
    assert_eq!(witness_header["ucv"], "0.7");
    assert_eq!(fixture["assertions"]["header"]["ucv"], "0.8.1");
}
