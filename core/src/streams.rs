use std::iter;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use serde_path_to_error as spte;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::types::{Channel, NormalizedTable, RawStreams, Series};

/// Justerer rå kanaler til en [`NormalizedTable`] med N = len(`time`).
///
/// Kanaler som mangler blir rene `None`-kolonner. Kanaler med feil lengde
/// kuttes eller fylles med `None` posisjonelt; det gjøres ingen
/// tidsstempel-matching.
pub fn normalize(raw: &RawStreams, cfg: &AnalysisConfig) -> Result<NormalizedTable> {
    let time = raw
        .get(Channel::Time)
        .ok_or(AnalysisError::MissingRequiredChannel(Channel::Time.key()))?;
    let n = time.len();

    let align = |channel: Channel| -> Series {
        match raw.get(channel) {
            None => vec![None; n],
            Some(data) => {
                if data.len() != n {
                    warn!(
                        "channel '{}' has {} samples, time has {}; aligning positionally",
                        channel,
                        data.len(),
                        n
                    );
                }
                data.iter()
                    .map(|v| v.filter(|x| x.is_finite()))
                    .chain(iter::repeat(None))
                    .take(n)
                    .collect()
            }
        }
    };

    let time = align(Channel::Time);
    let power = align(Channel::Watts);
    let mut hr = align(Channel::HeartRate);
    if cfg.filter_non_positive_hr {
        for h in hr.iter_mut() {
            if matches!(h, Some(v) if *v <= 0.0) {
                *h = None;
            }
        }
    }

    debug!(
        "normalized {} rows (channels present: {:?})",
        n,
        raw.channels().collect::<Vec<_>>()
    );

    Ok(NormalizedTable::from_aligned(
        time,
        power,
        hr,
        align(Channel::Distance),
        align(Channel::Altitude),
        align(Channel::Grade),
    ))
}

// ──────────────────────────────────────────────────────────────────────────────
// Leverandørformat: liste `[{"type": "time", "data": [...]}, ...]`
// eller nøkkel-form `{"time": {"data": [...]}, ...}`
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StreamIn {
    #[serde(rename = "type")]
    kind: String,
    data: Value,
}

/// Tolker leverandørens stream-JSON. Ukjente kanaler (cadence, latlng, …)
/// ignoreres uten å parse innholdet.
pub fn parse_streams_json(json_in: &str) -> Result<RawStreams> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    let root: Value = spte::deserialize(&mut de)?;
    parse_streams_value(root)
}

pub fn parse_streams_value(root: Value) -> Result<RawStreams> {
    let mut raw = RawStreams::new();

    match root {
        Value::Array(items) => {
            for (idx, item) in items.into_iter().enumerate() {
                let prefix = format!("[{idx}]");
                let stream: StreamIn = decode(item, &prefix)?;
                let Some(channel) = Channel::from_key(&stream.kind) else {
                    debug!("ignoring stream '{}'", stream.kind);
                    continue;
                };
                let data: Series = decode(stream.data, &format!("{prefix}.data"))?;
                if raw.insert(channel, data).is_some() {
                    warn!("duplicate stream '{}', keeping the last one", channel);
                }
            }
        }
        Value::Object(map) => {
            for (key, entry) in map {
                let Some(channel) = Channel::from_key(&key) else {
                    debug!("ignoring stream '{}'", key);
                    continue;
                };
                // aksepter både {"data": [...]} og en bar liste
                let (data, path) = match entry {
                    Value::Object(mut inner) => (
                        inner.remove("data").unwrap_or(Value::Null),
                        format!("{key}.data"),
                    ),
                    other => (other, key.clone()),
                };
                let data: Series = decode(data, &path)?;
                raw.insert(channel, data);
            }
        }
        other => {
            return Err(AnalysisError::Parse {
                path: ".".into(),
                message: format!("expected stream list or object, got {}", kind_of(&other)),
            })
        }
    }

    Ok(raw)
}

fn decode<T: DeserializeOwned>(value: Value, prefix: &str) -> Result<T> {
    spte::deserialize(value).map_err(|e| {
        let inner = e.path().to_string();
        let path = if inner == "." {
            prefix.to_string()
        } else if inner.starts_with('[') {
            format!("{prefix}{inner}")
        } else {
            format!("{prefix}.{inner}")
        };
        AnalysisError::Parse {
            path,
            message: e.into_inner().to_string(),
        }
    })
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    #[test]
    fn missing_time_is_fatal() {
        let raw = RawStreams::new().with_values(Channel::Watts, [100.0, 200.0]);
        let err = normalize(&raw, &cfg()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingRequiredChannel("time")));
    }

    #[test]
    fn absent_channels_become_null_columns() {
        let raw = RawStreams::new()
            .with_values(Channel::Time, [0.0, 1.0, 2.0])
            .with_values(Channel::Watts, [100.0, 110.0, 120.0]);
        let t = normalize(&raw, &cfg()).unwrap();
        assert_eq!(t.len(), 3);
        for c in Channel::ALL {
            assert_eq!(t.column(c).len(), 3);
        }
        assert!(t.hr().iter().all(Option::is_none));
        assert!(t.grade().iter().all(Option::is_none));
        assert_eq!(t.power()[2], Some(120.0));
    }

    #[test]
    fn short_and_long_channels_are_aligned_to_time() {
        let raw = RawStreams::new()
            .with_values(Channel::Time, [0.0, 1.0, 2.0, 3.0])
            .with_values(Channel::Watts, [100.0, 110.0])
            .with_values(Channel::Altitude, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = normalize(&raw, &cfg()).unwrap();
        assert_eq!(t.power(), &[Some(100.0), Some(110.0), None, None]);
        assert_eq!(t.altitude().len(), 4);
        assert_eq!(t.altitude()[3], Some(4.0));
    }

    #[test]
    fn non_positive_hr_is_filtered_by_default() {
        let raw = RawStreams::new()
            .with_values(Channel::Time, [0.0, 1.0, 2.0])
            .with_values(Channel::HeartRate, [-1.0, 0.0, 140.0]);
        let t = normalize(&raw, &cfg()).unwrap();
        assert_eq!(t.hr(), &[None, None, Some(140.0)]);

        let keep = AnalysisConfig {
            filter_non_positive_hr: false,
            ..cfg()
        };
        let t = normalize(&raw, &keep).unwrap();
        assert_eq!(t.hr(), &[Some(-1.0), Some(0.0), Some(140.0)]);
    }

    #[test]
    fn parses_list_form_and_ignores_unknown() {
        let json_in = r#"[
            {"type": "time", "data": [0, 1, 2], "series_type": "distance"},
            {"type": "watts", "data": [150, null, 170]},
            {"type": "latlng", "data": [[59.9, 10.7], [59.9, 10.8], [59.9, 10.9]]}
        ]"#;
        let raw = parse_streams_json(json_in).unwrap();
        assert!(raw.contains(Channel::Time));
        assert_eq!(raw.get(Channel::Watts).unwrap(), &[Some(150.0), None, Some(170.0)]);
        assert_eq!(raw.channels().count(), 2);
    }

    #[test]
    fn parses_keyed_form() {
        let json_in = r#"{
            "time": {"data": [0, 1]},
            "heartrate": [120, 121],
            "cadence": {"data": [80, 81]}
        }"#;
        let raw = parse_streams_json(json_in).unwrap();
        assert_eq!(raw.get(Channel::HeartRate).unwrap(), &[Some(120.0), Some(121.0)]);
        assert_eq!(raw.channels().count(), 2);
    }

    #[test]
    fn parses_already_decoded_value() {
        let root = serde_json::json!([
            {"type": "time", "data": [0, 1, 2]},
            {"type": "altitude", "data": [10.5, 11.0, null]}
        ]);
        let raw = parse_streams_value(root).unwrap();
        assert_eq!(raw.get(Channel::Altitude).unwrap(), &[Some(10.5), Some(11.0), None]);
        let t = normalize(&raw, &cfg()).unwrap();
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn bad_sample_reports_json_path() {
        let json_in = r#"[{"type": "time", "data": [0, 1]}, {"type": "watts", "data": [1, "x"]}]"#;
        match parse_streams_json(json_in).unwrap_err() {
            AnalysisError::Parse { path, .. } => assert_eq!(path, "[1].data[1]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn scalar_root_is_rejected() {
        assert!(matches!(
            parse_streams_json("42").unwrap_err(),
            AnalysisError::Parse { .. }
        ));
    }
}
