use regex::{Captures, Regex};
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// One decoded segment of the `ports` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PortMapping {
    /// `0.0.0.0:8080->80/tcp`
    Bound {
        bind: String,
        host: u16,
        docker: u16,
        protocol: String,
    },
    /// `8080->80/tcp`
    Published {
        host: u16,
        docker: u16,
        protocol: String,
    },
    /// `80/tcp`, exposed by the image but not published on the host
    Exposed { docker: u16, protocol: String },
}

impl PortMapping {
    pub fn bind(&self) -> Option<&str> {
        match self {
            Self::Bound { bind, .. } => Some(bind),
            Self::Published { .. } | Self::Exposed { .. } => None,
        }
    }

    pub fn host(&self) -> Option<u16> {
        match self {
            Self::Bound { host, .. } | Self::Published { host, .. } => Some(*host),
            Self::Exposed { .. } => None,
        }
    }

    pub fn docker(&self) -> u16 {
        match self {
            Self::Bound { docker, .. }
            | Self::Published { docker, .. }
            | Self::Exposed { docker, .. } => *docker,
        }
    }

    pub fn protocol(&self) -> &str {
        match self {
            Self::Bound { protocol, .. }
            | Self::Published { protocol, .. }
            | Self::Exposed { protocol, .. } => protocol,
        }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound {
                bind,
                host,
                docker,
                protocol,
            } => write!(f, "{bind}:{host}->{docker}/{protocol}"),
            Self::Published {
                host,
                docker,
                protocol,
            } => write!(f, "{host}->{docker}/{protocol}"),
            Self::Exposed { docker, protocol } => write!(f, "{docker}/{protocol}"),
        }
    }
}

type Shape = fn(&Captures) -> Option<PortMapping>;

// Tried top-down, first match wins. The patterns are unanchored so that
// IPv6 binds (`:::8080->80/tcp`) still fall through to the published shape.
static SHAPES: LazyLock<Vec<(Regex, Shape)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"([\d.]+):(\d+)->(\d+)/([a-z]+)").expect("bound port pattern"),
            bound as Shape,
        ),
        (
            Regex::new(r"(\d+)->(\d+)/([a-z]+)").expect("published port pattern"),
            published as Shape,
        ),
        (
            Regex::new(r"(\d+)/([a-z]+)").expect("exposed port pattern"),
            exposed as Shape,
        ),
    ]
});

fn bound(caps: &Captures) -> Option<PortMapping> {
    Some(PortMapping::Bound {
        bind: caps[1].to_string(),
        host: caps[2].parse().ok()?,
        docker: caps[3].parse().ok()?,
        protocol: caps[4].to_string(),
    })
}

fn published(caps: &Captures) -> Option<PortMapping> {
    Some(PortMapping::Published {
        host: caps[1].parse().ok()?,
        docker: caps[2].parse().ok()?,
        protocol: caps[3].to_string(),
    })
}

fn exposed(caps: &Captures) -> Option<PortMapping> {
    Some(PortMapping::Exposed {
        docker: caps[1].parse().ok()?,
        protocol: caps[2].to_string(),
    })
}

/// Decodes a single port segment. Whitespace anywhere in the segment is
/// ignored. Returns `None` when no shape matches, or when the first matching
/// shape carries a port number outside the `u16` range.
pub fn parse_port_mapping(segment: &str) -> Option<PortMapping> {
    let segment: String = segment.chars().filter(|c| !c.is_whitespace()).collect();

    SHAPES
        .iter()
        .find_map(|(pattern, shape)| pattern.captures(&segment).map(|caps| shape(&caps)))
        .flatten()
}

/// Decodes the whole `ports` column. Blank segments are skipped; segments
/// that match no shape are kept as `None` so positions line up with the
/// raw column.
pub fn parse_ports(raw: &str) -> Vec<Option<PortMapping>> {
    raw.split(',')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            let mapping = parse_port_mapping(segment);
            if mapping.is_none() {
                warn!("  Segmento de porta não reconhecido: {:?}", segment);
            }
            mapping
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bound_mapping() {
        assert_eq!(
            parse_port_mapping("0.0.0.0:5432->5432/tcp"),
            Some(PortMapping::Bound {
                bind: "0.0.0.0".to_string(),
                host: 5432,
                docker: 5432,
                protocol: "tcp".to_string(),
            })
        );
    }

    #[test]
    fn parses_published_mapping() {
        let mapping = parse_port_mapping("8080->80/tcp").unwrap();
        assert_eq!(mapping.bind(), None);
        assert_eq!(mapping.host(), Some(8080));
        assert_eq!(mapping.docker(), 80);
        assert_eq!(mapping.protocol(), "tcp");
    }

    #[test]
    fn parses_exposed_mapping() {
        assert_eq!(
            parse_port_mapping("5432/tcp"),
            Some(PortMapping::Exposed {
                docker: 5432,
                protocol: "tcp".to_string(),
            })
        );
    }

    #[test]
    fn strips_whitespace_before_matching() {
        let mapping = parse_port_mapping(" 127.0.0.1 : 6379 -> 6379 / udp ").unwrap();
        assert_eq!(mapping.bind(), Some("127.0.0.1"));
        assert_eq!(mapping.host(), Some(6379));
        assert_eq!(mapping.protocol(), "udp");
    }

    #[test]
    fn ipv6_bind_falls_back_to_published_shape() {
        let mapping = parse_port_mapping(":::8080->80/tcp").unwrap();
        assert_eq!(mapping.bind(), None);
        assert_eq!(mapping.host(), Some(8080));
        assert_eq!(mapping.docker(), 80);
    }

    #[test]
    fn unrecognised_segment_is_none() {
        assert_eq!(parse_port_mapping("garbage"), None);
        assert_eq!(parse_port_mapping("80"), None);
    }

    #[test]
    fn out_of_range_port_does_not_fall_through() {
        assert_eq!(parse_port_mapping("0.0.0.0:70000->80/tcp"), None);
        assert_eq!(parse_port_mapping("70000->80/tcp"), None);
        assert_eq!(parse_port_mapping("70000/tcp"), None);
        assert_eq!(parse_ports("0.0.0.0:70000->80/tcp"), vec![None]);
    }

    #[test]
    fn parses_column_with_holes() {
        let ports = parse_ports("0.0.0.0:80->80/tcp, nonsense, 443/tcp");
        assert_eq!(ports.len(), 3);
        assert_eq!(ports[0].as_ref().and_then(|m| m.host()), Some(80));
        assert!(ports[1].is_none());
        assert_eq!(ports[2].as_ref().map(|m| m.docker()), Some(443));
    }

    #[test]
    fn empty_column_yields_no_mappings() {
        assert!(parse_ports("").is_empty());
        assert!(parse_ports(" , ").is_empty());
    }

    #[test]
    fn displays_in_runtime_notation() {
        for raw in ["0.0.0.0:5432->5432/tcp", "8080->80/tcp", "53/udp"] {
            assert_eq!(parse_port_mapping(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn serialises_without_absent_keys() {
        let exposed = serde_json::to_value(parse_port_mapping("5432/tcp").unwrap()).unwrap();
        assert_eq!(
            exposed,
            serde_json::json!({ "docker": 5432, "protocol": "tcp" })
        );
    }
}
