//! IP address check.

use super::{on_text, Check};
use crate::error::CheckError;
use crate::message::MessageArg;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Address forms accepted by [`IpAddr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpFamily {
    /// Any of the forms below
    Any,
    /// Dotted-quad IPv4 (`192.0.2.1`)
    V4,
    /// IPv6 that is not an IPv4-mapped address (`2001:db8::1`)
    V6,
    /// IPv4-mapped IPv6 (`::ffff:192.0.2.1`)
    V4MappedV6,
    /// IPv4 network in CIDR notation (`192.0.2.0/24`)
    V4Cidr,
    /// IPv6 network in CIDR notation (`2001:db8::/32`)
    V6Cidr,
    /// IPv4-mapped IPv6 network in CIDR notation (`::ffff:192.0.2.0/120`)
    V4MappedV6Cidr,
}

impl IpFamily {
    const CONCRETE: [IpFamily; 6] = [
        IpFamily::V4,
        IpFamily::V6,
        IpFamily::V4MappedV6,
        IpFamily::V4Cidr,
        IpFamily::V6Cidr,
        IpFamily::V4MappedV6Cidr,
    ];

    /// Whether `s` is written in this form.
    pub fn matches(self, s: &str) -> bool {
        match self {
            IpFamily::Any => Self::CONCRETE.iter().any(|family| family.matches(s)),
            IpFamily::V4 => s.parse::<Ipv4Addr>().is_ok(),
            IpFamily::V6 => parse_v6(s).is_some_and(|ip| ip.to_ipv4_mapped().is_none()),
            IpFamily::V4MappedV6 => parse_v6(s).is_some_and(|ip| ip.to_ipv4_mapped().is_some()),
            IpFamily::V4Cidr => cidr(s, 32, |addr| IpFamily::V4.matches(addr)),
            IpFamily::V6Cidr => cidr(s, 128, |addr| IpFamily::V6.matches(addr)),
            IpFamily::V4MappedV6Cidr => cidr(s, 128, |addr| IpFamily::V4MappedV6.matches(addr)),
        }
    }
}

fn parse_v6(s: &str) -> Option<Ipv6Addr> {
    s.parse::<Ipv6Addr>().ok()
}

fn cidr(s: &str, max_prefix: u8, address: impl FnOnce(&str) -> bool) -> bool {
    let Some((addr, prefix)) = s.split_once('/') else {
        return false;
    };
    let prefix_ok = !prefix.is_empty()
        && prefix.bytes().all(|b| b.is_ascii_digit())
        && prefix.parse::<u8>().is_ok_and(|p| p <= max_prefix);
    prefix_ok && address(addr)
}

/// Requires a string to be an IP address in one of the requested forms.
///
/// An empty family list accepts any form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddr {
    /// Accepted forms
    pub families: Vec<IpFamily>,
}

impl IpAddr {
    /// Create an IP address check accepting any of `families`.
    pub fn new(families: impl IntoIterator<Item = IpFamily>) -> Self {
        Self {
            families: families.into_iter().collect(),
        }
    }

    /// Create an IP address check accepting every form.
    pub fn any() -> Self {
        Self::new([IpFamily::Any])
    }
}

impl Check for IpAddr {
    fn name(&self) -> &'static str {
        "ip_addr"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_text("ip_addr", value, |s| {
            if self.families.is_empty() {
                IpFamily::Any.matches(s)
            } else {
                self.families.iter().any(|family| family.matches(s))
            }
        })
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.ip_addr", Vec::new())
    }

    fn default_message(&self) -> String {
        "Must be a valid IP address".to_string()
    }
}
