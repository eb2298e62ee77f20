//! `DuckDB` value to JSON conversion for result rows.
//!
//! Scalars map to JSON numbers, strings, booleans or `null`. Nested values
//! convert recursively:
//!
//! | Engine type            | JSON                                          |
//! |------------------------|-----------------------------------------------|
//! | `LIST`, `ARRAY`        | array                                         |
//! | `STRUCT`               | object, fields in declaration order           |
//! | `MAP` with text keys   | object                                        |
//! | `MAP`, other keys      | array of `{"key": .., "value": ..}`           |
//! | `ENUM`                 | the member name                               |
//! | `UNION`                | the active member's value                     |
//! | `INTERVAL`             | `{"months": .., "days": .., "micros": ..}`    |

use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
use duckdb::types::{OrderedMap, TimeUnit, Value};
use serde_json::{Map, Number, Value as JsonValue, json};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const MICROS_PER_SECOND: i64 = 1_000_000;

const NANOS_PER_MICRO: i64 = 1_000;

/// Convert an owned `DuckDB` [`Value`] to a `serde_json::Value`.
pub fn to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::TinyInt(i) => JsonValue::Number((*i).into()),
        Value::SmallInt(i) => JsonValue::Number((*i).into()),
        Value::Int(i) => JsonValue::Number((*i).into()),
        Value::BigInt(i) => JsonValue::Number((*i).into()),
        Value::HugeInt(i) => i64::try_from(*i).map_or_else(
            |_| JsonValue::String(i.to_string()),
            |n| JsonValue::Number(n.into()),
        ),
        Value::UHugeInt(i) => u64::try_from(*i).map_or_else(
            |_| JsonValue::String(i.to_string()),
            |n| JsonValue::Number(n.into()),
        ),
        Value::UTinyInt(i) => JsonValue::Number((*i).into()),
        Value::USmallInt(i) => JsonValue::Number((*i).into()),
        Value::UInt(i) => JsonValue::Number((*i).into()),
        Value::UBigInt(i) => JsonValue::Number((*i).into()),
        Value::Float(f) => float(f64::from(*f)),
        Value::Double(f) => float(*f),
        Value::Decimal(d) => decimal(d.to_string()),
        Value::Text(s) | Value::Enum(s) => JsonValue::String(s.clone()),
        Value::Blob(b) | Value::Geometry(b) => {
            JsonValue::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
        Value::Date32(days) => date(*days).map_or_else(
            || JsonValue::String(days.to_string()),
            |d| JsonValue::String(d.format("%Y-%m-%d").to_string()),
        ),
        Value::Timestamp(unit, v) => {
            DateTime::from_timestamp_micros(unit.to_micros(*v)).map_or_else(
                || JsonValue::String(v.to_string()),
                |ts| JsonValue::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            )
        }
        Value::Time64(unit, v) => time(*unit, *v).map_or_else(
            || JsonValue::String(v.to_string()),
            |t| JsonValue::String(t.format("%H:%M:%S%.f").to_string()),
        ),
        Value::Interval {
            months,
            days,
            nanos,
        } => json!({
            "months": months,
            "days": days,
            "micros": nanos / NANOS_PER_MICRO,
        }),
        Value::List(items) | Value::Array(items) => {
            JsonValue::Array(items.iter().map(to_json).collect())
        }
        Value::Struct(fields) => JsonValue::Object(
            fields
                .iter()
                .map(|(name, v)| (name.clone(), to_json(v)))
                .collect(),
        ),
        Value::Map(entries) => map(entries),
        Value::Union(inner) => to_json(inner),
        // `Value` is non-exhaustive; a type added upstream has no encoding yet.
        _ => JsonValue::Null,
    }
}

/// Text-keyed maps become objects. Anything else keeps its typed keys as
/// `{key, value}` pairs.
fn map(entries: &OrderedMap<Value, Value>) -> JsonValue {
    if entries.keys().all(|k| matches!(k, Value::Text(_))) {
        let object: Map<String, JsonValue> = entries
            .iter()
            .filter_map(|(k, v)| match k {
                Value::Text(key) => Some((key.clone(), to_json(v))),
                _ => None,
            })
            .collect();
        return JsonValue::Object(object);
    }
    JsonValue::Array(
        entries
            .iter()
            .map(|(k, v)| json!({ "key": to_json(k), "value": to_json(v) }))
            .collect(),
    )
}

fn float(f: f64) -> JsonValue {
    Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
}

/// Scale-0 decimals (e.g. `SUM` over integers) stay integral.
fn decimal(text: String) -> JsonValue {
    if let Ok(n) = text.parse::<i64>() {
        return JsonValue::Number(n.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(JsonValue::String(text), JsonValue::Number)
}

fn date(days_since_epoch: i32) -> Option<NaiveDate> {
    days_since_epoch
        .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

fn time(unit: TimeUnit, v: i64) -> Option<NaiveTime> {
    let micros = unit.to_micros(v);
    let secs = u32::try_from(micros.div_euclid(MICROS_PER_SECOND)).ok()?;
    let nanos = u32::try_from(micros.rem_euclid(MICROS_PER_SECOND) * 1_000).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_owned())
    }

    #[test]
    fn scalars() {
        assert_eq!(to_json(&Value::Null), JsonValue::Null);
        assert_eq!(to_json(&Value::Boolean(true)), json!(true));
        assert_eq!(to_json(&Value::Int(-7)), json!(-7));
        assert_eq!(to_json(&Value::UBigInt(u64::MAX)), json!(u64::MAX));
        assert_eq!(to_json(&Value::Double(2.5)), json!(2.5));
        assert_eq!(to_json(&text("Alice")), json!("Alice"));
    }

    #[test]
    fn huge_int_outside_i64_becomes_string() {
        assert_eq!(to_json(&Value::HugeInt(6)), json!(6));
        let big = i128::from(i64::MAX) + 1;
        assert_eq!(to_json(&Value::HugeInt(big)), json!(big.to_string()));
        assert_eq!(to_json(&Value::UHugeInt(u128::MAX)), json!(u128::MAX.to_string()));
    }

    #[test]
    fn decimal_text() {
        assert_eq!(decimal("6".into()), json!(6));
        assert_eq!(decimal("1.5".into()), json!(1.5));
    }

    #[test]
    fn non_finite_float_is_null() {
        assert_eq!(to_json(&Value::Double(f64::NAN)), JsonValue::Null);
        assert_eq!(to_json(&Value::Float(f32::INFINITY)), JsonValue::Null);
    }

    #[test]
    fn blob_is_base64() {
        assert_eq!(to_json(&Value::Blob(vec![0xde, 0xad])), json!("3q0="));
    }

    #[test]
    fn dates_and_times() {
        // 2025-07-15 is 20_284 days after the epoch.
        assert_eq!(to_json(&Value::Date32(20_284)), json!("2025-07-15"));
        assert_eq!(to_json(&Value::Date32(-1)), json!("1969-12-31"));
        assert_eq!(
            to_json(&Value::Timestamp(TimeUnit::Second, 1_752_575_400)),
            json!("2025-07-15T10:30:00Z")
        );
        assert_eq!(
            to_json(&Value::Time64(TimeUnit::Microsecond, 37_800_000_000)),
            json!("10:30:00")
        );
    }

    #[test]
    fn interval_is_an_object_in_micros() {
        let value = Value::Interval {
            months: 14,
            days: 3,
            nanos: 1_500_000_000,
        };
        assert_eq!(
            to_json(&value),
            json!({ "months": 14, "days": 3, "micros": 1_500_000 })
        );
    }

    #[test]
    fn lists_and_arrays_recurse() {
        let list = Value::List(vec![Value::Int(1), Value::Null, Value::Date32(20_284)]);
        assert_eq!(to_json(&list), json!([1, null, "2025-07-15"]));

        let nested = Value::Array(vec![Value::List(vec![text("a")]), Value::List(vec![])]);
        assert_eq!(to_json(&nested), json!([["a"], []]));
    }

    #[test]
    fn enum_and_union_unwrap_to_their_value() {
        assert_eq!(to_json(&Value::Enum("Done".into())), json!("Done"));
        assert_eq!(to_json(&Value::Union(Box::new(Value::SmallInt(4)))), json!(4));
    }

    #[test]
    fn struct_keeps_field_order() {
        let value = Value::Struct(OrderedMap::from(vec![
            ("z".to_owned(), Value::Int(1)),
            ("a".to_owned(), Value::List(vec![text("x")])),
        ]));
        let json = to_json(&value);

        assert_eq!(json, json!({ "z": 1, "a": ["x"] }));
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn text_keyed_map_is_an_object() {
        let value = Value::Map(OrderedMap::from(vec![
            (text("k"), Value::Int(1)),
            (text("j"), Value::Null),
        ]));
        assert_eq!(to_json(&value), json!({ "k": 1, "j": null }));
    }

    #[test]
    fn other_keyed_map_is_a_pair_list() {
        let value = Value::Map(OrderedMap::from(vec![
            (Value::Int(1), text("a")),
            (Value::Int(2), text("b")),
        ]));
        assert_eq!(
            to_json(&value),
            json!([{ "key": 1, "value": "a" }, { "key": 2, "value": "b" }])
        );
    }
}
