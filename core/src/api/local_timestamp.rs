use chrono::NaiveDateTime;
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format for request dates: local wall-clock time without an offset.
pub const LOCAL_ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn format(date_time: &NaiveDateTime) -> String {
    date_time.format(LOCAL_ISO_FORMAT).to_string()
}

/// Serializer used through `#[serde(with = "local_timestamp")]` on request fields.
///
/// # Arguments
///
/// * 'date_time' - the local date time
/// * 'serializer' - serializer given from serde
pub fn serialize<S>(date_time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(date_time))
}

pub fn deserialize<'de, D>(d: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    NaiveDateTime::parse_from_str(&raw, LOCAL_ISO_FORMAT)
        .map_err(|e| D::Error::custom(format!("invalid local timestamp '{raw}': {e}")))
}
