use super::ports::{PortMapping, parse_ports};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

/// Decoded value of one `ps` column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
    Timestamp(DateTime<FixedOffset>),
    Ports(Vec<Option<PortMapping>>),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Timestamp(at) => Some(at),
            _ => None,
        }
    }

    pub fn as_ports(&self) -> Option<&[Option<PortMapping>]> {
        match self {
            Self::Ports(ports) => Some(ports),
            _ => None,
        }
    }
}

type Decoder = fn(&str) -> AttributeValue;

/// Columns that need more than a raw string. Anything not listed here is
/// stored as [`AttributeValue::Text`].
const DECODERS: &[(&str, Decoder)] = &[
    ("labels", decode_list),
    ("mounts", decode_list),
    ("networks", decode_list),
    ("createdat", decode_created_at),
    ("ports", decode_ports),
];

fn decoder_for(name: &str) -> Decoder {
    DECODERS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, decoder)| *decoder)
        .unwrap_or(decode_text)
}

fn decode_text(raw: &str) -> AttributeValue {
    AttributeValue::Text(raw.to_string())
}

// An empty column still splits into a single empty element.
fn decode_list(raw: &str) -> AttributeValue {
    AttributeValue::List(raw.split(',').map(str::to_string).collect())
}

fn decode_created_at(raw: &str) -> AttributeValue {
    match parse_created_at(raw) {
        Some(at) => AttributeValue::Timestamp(at),
        None => AttributeValue::Text(raw.to_string()),
    }
}

fn decode_ports(raw: &str) -> AttributeValue {
    AttributeValue::Ports(parse_ports(raw))
}

/// Parses `2024-01-31 09:15:02 +0000 UTC`. Fractional seconds, as printed by
/// podman, are accepted too. Zones without an abbreviation are printed as a
/// numeric name (`-0300 -03`).
fn parse_created_at(raw: &str) -> Option<DateTime<FixedOffset>> {
    let (stamp, zone) = raw.trim().rsplit_once(' ')?;
    if zone.is_empty() {
        return None;
    }

    DateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S%.f %z").ok()
}

/// Snapshot of one container as reported by `<runtime> ps`.
///
/// All decoding happens in [`ContainerInstance::new`]; the record is
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerInstance {
    id: String,
    name: String,
    attributes: BTreeMap<String, AttributeValue>,
}

impl ContainerInstance {
    pub fn new<I, K, V>(id: impl Into<String>, name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let attributes = attributes
            .into_iter()
            .map(|(key, raw)| {
                let key = key.into();
                let value = decoder_for(&key)(raw.as_ref());
                (key, value)
            })
            .collect();

        Self {
            id: id.into(),
            name: name.into(),
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded value of a column, or `None` if it was never supplied.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    pub fn image(&self) -> Option<&str> {
        self.attribute("image").and_then(AttributeValue::as_text)
    }

    pub fn status(&self) -> Option<&str> {
        self.attribute("status").and_then(AttributeValue::as_text)
    }

    /// Creation time, if the runtime printed it in the expected format.
    pub fn created_at(&self) -> Option<&DateTime<FixedOffset>> {
        self.attribute("createdat")
            .and_then(AttributeValue::as_timestamp)
    }

    pub fn ports(&self) -> &[Option<PortMapping>] {
        self.attribute("ports")
            .and_then(AttributeValue::as_ports)
            .unwrap_or_default()
    }

    pub fn labels(&self) -> &[String] {
        self.list("labels")
    }

    pub fn mounts(&self) -> &[String] {
        self.list("mounts")
    }

    pub fn networks(&self) -> &[String] {
        self.list("networks")
    }

    /// Value of a `key=value` label.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels()
            .iter()
            .filter_map(|label| label.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    /// Host port published for `container_port`. Exposed-only ports and
    /// ports the container does not have both yield `None`.
    pub fn host_port(&self, container_port: u16) -> Option<u16> {
        self.ports()
            .iter()
            .flatten()
            .filter(|mapping| mapping.docker() == container_port)
            .find_map(PortMapping::host)
    }

    fn list(&self, name: &str) -> &[String] {
        self.attribute(name)
            .and_then(AttributeValue::as_list)
            .unwrap_or_default()
    }
}
