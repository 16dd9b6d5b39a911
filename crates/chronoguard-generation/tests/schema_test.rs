use chronoguard_core::constants::STOP_MARKER;
use chronoguard_core::errors::SchemaError;
use chronoguard_generation::SchemaValidator;
use test_fixtures::PayloadFixture;

fn validator() -> SchemaValidator {
    SchemaValidator::new(
        2,
        Some("intl_1990_usd"),
        ["p-1850".to_string(), "p-1950".to_string()],
        vec![STOP_MARKER.to_string()],
    )
}

fn payloads() -> PayloadFixture {
    test_fixtures::load_fixture("payloads.json")
}

#[test]
fn valid_payloads_pass_and_normalize_units() {
    let v = validator();
    for raw in payloads().valid {
        let payload = v
            .validate(&raw)
            .unwrap_or_else(|e| panic!("rejected valid payload {raw}: {e}"));
        assert_eq!(payload.range.unit, "intl_1990_usd");
        assert!(payload.evidence.iter().all(|b| b.year.is_some()));
    }
}

#[test]
fn year_is_filled_from_bullet_text() {
    let raw = &payloads().valid[0];
    let payload = validator().validate(raw).unwrap();
    assert_eq!(payload.evidence[1].year, Some(1850));
}

#[test]
fn every_invalid_payload_is_rejected_with_its_reason() {
    let v = validator();
    let errors: Vec<SchemaError> = payloads()
        .invalid
        .iter()
        .map(|raw| v.validate(raw).unwrap_err())
        .collect();

    assert_eq!(errors[0], SchemaError::NoJsonObject);
    assert!(matches!(errors[1], SchemaError::ImplausibleRange { .. }));
    assert_eq!(
        errors[2],
        SchemaError::MissingYearReferences {
            required: 2,
            found: 1
        }
    );
    assert_eq!(
        errors[3],
        SchemaError::UnitMismatch {
            required: "intl_1990_usd".to_string(),
            found: "nominal usd".to_string(),
        }
    );
    assert_eq!(
        errors[4],
        SchemaError::UnknownCitation {
            passage_id: "p-999".to_string()
        }
    );
}

#[test]
fn any_unit_accepted_without_a_required_unit() {
    let v = SchemaValidator::new(2, None, Vec::<String>::new(), Vec::new());
    let raw = &payloads().invalid[3];
    let payload = v.validate(raw).unwrap();
    assert_eq!(payload.range.unit, "nominal_usd");
}

#[test]
fn non_object_json_is_malformed() {
    let err = validator().validate("{\"range\": 5}").unwrap_err();
    assert!(matches!(err, SchemaError::Malformed { .. }));
}
