//! Payload value and error behavior across the public surface.

use spindle_foundation::{EntityId, Error, Value};

#[test]
fn values_convert_from_primitives() {
    assert_eq!(Value::from(7i64).as_int(), Some(7));
    assert_eq!(Value::from(2.5f64).as_float(), Some(2.5));
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from("melee").as_str(), Some("melee"));
}

#[test]
fn entity_refs_round_trip_through_values() {
    let e = EntityId::new(11);
    let v = Value::from(e);
    assert_eq!(v.as_entity(), Some(e));
    assert_eq!(format!("{v}"), "Entity(11)");
}

#[test]
fn numbers_unify_through_as_number() {
    assert_eq!(Value::Int(3).as_number(), Some(3.0));
    assert_eq!(Value::Float(3.5).as_number(), Some(3.5));
    assert_eq!(Value::from("3").as_number(), None);
}

#[test]
fn error_messages_name_the_missing_key() {
    assert_eq!(
        Error::unknown_tag("player").to_string(),
        "unknown tag: player"
    );
    assert_eq!(
        Error::unknown_group("enemies").to_string(),
        "unknown group: enemies"
    );
}
