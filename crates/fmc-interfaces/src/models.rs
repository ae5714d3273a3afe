//! Physical interface data models.
//!
//! The same [`PhysicalInterface`] shape is sent in a full-replace `PUT` and
//! returned by every read. Optional settings are omitted from the wire when
//! unset rather than sent as `null`.

use serde::{Deserialize, Deserializer, Serialize};

/// Resource kind reported by the management center for physical interfaces.
pub const PHYSICAL_INTERFACE_KIND: &str = "PhysicalInterface";

fn default_kind() -> String {
    PHYSICAL_INTERFACE_KIND.to_string()
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Identifier pair used to locate an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceIdentity {
    /// Server-assigned identifier.
    pub id: String,
    /// Human-assigned name, usable as an alternate lookup key.
    pub name: String,
}

/// Configuration of one physical network interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhysicalInterface {
    /// Resource kind.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Server-assigned identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Interface name (e.g. `GigabitEthernet0/0`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Administrative state.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Logical name on the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifname: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MTU in bytes.
    #[serde(rename = "MTU", default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    /// Operating mode, passed through untouched (`NONE`, `INLINE`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub mode: String,
    /// Security zone the interface belongs to.
    #[serde(
        rename = "securityZone",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub security_zone: Option<SecurityZoneRef>,
    /// IPv4 addressing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4Config>,
    /// IPv6 addressing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Ipv6Config>,
}

impl Default for PhysicalInterface {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            id: String::new(),
            name: String::new(),
            enabled: false,
            ifname: None,
            description: None,
            mtu: None,
            mode: String::new(),
            security_zone: None,
            ipv4: None,
            ipv6: None,
        }
    }
}

impl PhysicalInterface {
    /// Create an interface value carrying only its identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// The identifier pair of this interface.
    #[must_use]
    pub fn identity(&self) -> InterfaceIdentity {
        InterfaceIdentity {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    /// True when the value carries no server-assigned identifier, i.e. it
    /// does not describe an existing interface.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Reference to an externally managed security zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityZoneRef {
    /// Zone identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Zone object type (typically `SecurityZone`).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

/// IPv4 addressing block. At most one of `static` and `dhcp` is expected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ipv4Config {
    /// Static address assignment.
    #[serde(rename = "static", default, skip_serializing_if = "Option::is_none")]
    pub static_address: Option<Ipv4Static>,
    /// DHCP client settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp: Option<Ipv4Dhcp>,
}

/// How an [`Ipv4Config`] assigns its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4Addressing {
    /// Neither static nor DHCP.
    Unconfigured,
    /// Static address only.
    Static,
    /// DHCP only.
    Dhcp,
    /// Both blocks populated; the server decides which applies.
    Ambiguous,
}

impl Ipv4Config {
    /// Static addressing with the given address and prefix length.
    pub fn with_static(address: impl Into<String>, netmask: u8) -> Self {
        Self {
            static_address: Some(Ipv4Static {
                address: address.into(),
                netmask,
            }),
            dhcp: None,
        }
    }

    /// DHCP addressing.
    #[must_use]
    pub const fn with_dhcp(enable_default_route: bool, route_metric: u32) -> Self {
        Self {
            static_address: None,
            dhcp: Some(Ipv4Dhcp {
                enable_default_route,
                route_metric,
            }),
        }
    }

    /// Classify the block.
    #[must_use]
    pub const fn addressing(&self) -> Ipv4Addressing {
        match (&self.static_address, &self.dhcp) {
            (None, None) => Ipv4Addressing::Unconfigured,
            (Some(_), None) => Ipv4Addressing::Static,
            (None, Some(_)) => Ipv4Addressing::Dhcp,
            (Some(_), Some(_)) => Ipv4Addressing::Ambiguous,
        }
    }
}

/// Static IPv4 address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ipv4Static {
    /// Dotted-quad address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Prefix length.
    #[serde(default, deserialize_with = "null_as_default")]
    pub netmask: u8,
}

/// DHCP client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ipv4Dhcp {
    /// Install the default route learned over DHCP.
    #[serde(rename = "enableDefaultRouteDHCP", default, deserialize_with = "null_as_default")]
    pub enable_default_route: bool,
    /// Metric for the learned route.
    #[serde(rename = "dhcpRouteMetric", default, deserialize_with = "null_as_default")]
    pub route_metric: u32,
}

/// IPv6 addressing block.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ipv6Config {
    /// Configured addresses, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Ipv6Address>,
}

/// One IPv6 address assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ipv6Address {
    /// Address text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Prefix length.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prefix: u8,
    /// Derive the interface identifier with modified EUI-64.
    #[serde(
        rename = "enforceEUI64",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub enforce_eui64: bool,
}

/// List response for a device's physical interfaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhysicalInterfaceList {
    /// Link back to the collection.
    #[serde(default)]
    pub links: Links,
    /// Interfaces in server order. Absent when the device has none.
    #[serde(default)]
    pub items: Vec<PhysicalInterface>,
    /// Paging metadata; only the first page is ever read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

/// Hypermedia links.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Links {
    /// Self-referential link.
    #[serde(rename = "self", default)]
    pub self_link: String,
}

/// Paging block returned with list responses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paging {
    /// Offset of the first item.
    #[serde(default)]
    pub offset: u32,
    /// Page size.
    #[serde(default)]
    pub limit: u32,
    /// Total number of items.
    #[serde(default)]
    pub count: u32,
    /// Total number of pages.
    #[serde(default)]
    pub pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(interface: &PhysicalInterface) -> PhysicalInterface {
        let bytes = serde_json::to_vec(interface).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn static_only_round_trips_without_dhcp() {
        let interface = PhysicalInterface {
            enabled: true,
            mtu: Some(1500),
            mode: "NONE".into(),
            ipv4: Some(Ipv4Config::with_static("10.0.0.1", 24)),
            ..PhysicalInterface::new("1", "eth0")
        };

        let value = serde_json::to_value(&interface).unwrap();
        assert_eq!(value["ipv4"], json!({"static": {"address": "10.0.0.1", "netmask": 24}}));
        assert!(value.get("ipv6").is_none());
        assert_eq!(round_trip(&interface), interface);
    }

    #[test]
    fn dhcp_only_round_trips() {
        let interface = PhysicalInterface {
            ipv4: Some(Ipv4Config::with_dhcp(true, 5)),
            ..PhysicalInterface::new("2", "eth1")
        };

        let value = serde_json::to_value(&interface).unwrap();
        assert_eq!(
            value["ipv4"],
            json!({"dhcp": {"enableDefaultRouteDHCP": true, "dhcpRouteMetric": 5}})
        );
        assert_eq!(round_trip(&interface), interface);
    }

    #[test]
    fn unconfigured_interface_omits_addressing() {
        let interface = PhysicalInterface::new("3", "eth2");
        let value = serde_json::to_value(&interface).unwrap();
        assert_eq!(
            value,
            json!({"type": "PhysicalInterface", "id": "3", "name": "eth2", "enabled": false, "mode": ""})
        );
        assert_eq!(round_trip(&interface), interface);
    }

    #[test]
    fn ipv6_addresses_keep_order() {
        let interface = PhysicalInterface {
            ipv6: Some(Ipv6Config {
                addresses: vec![
                    Ipv6Address {
                        address: "2001:db8::1".into(),
                        prefix: 64,
                        enforce_eui64: false,
                    },
                    Ipv6Address {
                        address: "2001:db8:1::".into(),
                        prefix: 64,
                        enforce_eui64: true,
                    },
                ],
            }),
            ..PhysicalInterface::new("4", "eth3")
        };

        let value = serde_json::to_value(&interface).unwrap();
        assert_eq!(
            value["ipv6"]["addresses"],
            json!([
                {"address": "2001:db8::1", "prefix": 64},
                {"address": "2001:db8:1::", "prefix": 64, "enforceEUI64": true}
            ])
        );
        assert_eq!(round_trip(&interface), interface);
    }

    #[test]
    fn decode_tolerates_sparse_payload() {
        let interface: PhysicalInterface =
            serde_json::from_value(json!({"id": "abc", "name": "eth0"})).unwrap();
        assert_eq!(interface.kind, PHYSICAL_INTERFACE_KIND);
        assert!(!interface.enabled);
        assert!(interface.mtu.is_none());
        assert!(interface.security_zone.is_none());
    }

    #[test]
    fn decode_fills_sparse_and_null_fields() {
        let interface: PhysicalInterface = serde_json::from_value(json!({
            "id": "1",
            "name": "eth0",
            "mode": null,
            "enabled": null,
            "securityZone": {"id": "zone-1"},
            "ipv4": {"static": {"address": "10.0.0.1"}},
            "ipv6": {"addresses": [{"address": "fe80::1"}, {"prefix": 64}]}
        }))
        .unwrap();

        assert_eq!(interface.mode, "");
        assert!(!interface.enabled);
        assert_eq!(interface.security_zone.map(|zone| zone.kind), Some(String::new()));
        let static_address = interface.ipv4.and_then(|ipv4| ipv4.static_address).unwrap();
        assert_eq!(static_address.address, "10.0.0.1");
        assert_eq!(static_address.netmask, 0);
        let addresses = interface.ipv6.unwrap().addresses;
        assert_eq!(addresses[0].prefix, 0);
        assert_eq!(addresses[1].address, "");
        assert_eq!(addresses[1].prefix, 64);
    }

    #[test]
    fn list_without_items_is_empty() {
        let list: PhysicalInterfaceList = serde_json::from_value(json!({
            "links": {"self": "https://fmc/api/physicalinterfaces?expanded=true"},
            "paging": {"offset": 0, "limit": 25, "count": 0, "pages": 0}
        }))
        .unwrap();
        assert!(list.items.is_empty());
        assert_eq!(
            list.links.self_link,
            "https://fmc/api/physicalinterfaces?expanded=true"
        );
        assert_eq!(list.paging.map(|p| p.limit), Some(25));
    }

    #[test]
    fn addressing_classification() {
        assert_eq!(
            Ipv4Config::default().addressing(),
            Ipv4Addressing::Unconfigured
        );
        assert_eq!(
            Ipv4Config::with_static("10.0.0.1", 24).addressing(),
            Ipv4Addressing::Static
        );
        assert_eq!(Ipv4Config::with_dhcp(false, 1).addressing(), Ipv4Addressing::Dhcp);

        let both = Ipv4Config {
            dhcp: Some(Ipv4Dhcp::default()),
            ..Ipv4Config::with_static("10.0.0.1", 24)
        };
        assert_eq!(both.addressing(), Ipv4Addressing::Ambiguous);
    }

    #[test]
    fn identity_and_emptiness() {
        let interface = PhysicalInterface::new("1", "eth0");
        assert_eq!(
            interface.identity(),
            InterfaceIdentity {
                id: "1".into(),
                name: "eth0".into()
            }
        );
        assert!(!interface.is_empty());
        assert!(PhysicalInterface::default().is_empty());
        assert!(PhysicalInterface::new("", "eth0").is_empty());
    }
}
