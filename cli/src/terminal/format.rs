use crate::terminal::colors;
use colored::*;
use std::net::{IpAddr, Ipv6Addr};

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    if is_global_unicast(ipv6_addr) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

// 2000::/3
fn is_global_unicast(ipv6_addr: &Ipv6Addr) -> bool {
    let first_byte = ipv6_addr.octets()[0];
    (0x20..=0x3F).contains(&first_byte)
}

/// Label and coloured value for one reachable address.
pub fn ip_to_detail(ip: &IpAddr) -> (&'static str, ColoredString) {
    match ip {
        IpAddr::V4(ipv4_addr) => ("IPv4", ipv4_addr.to_string().color(colors::IPV4_ADDR)),
        IpAddr::V6(ipv6_addr) => (
            ipv6_to_type_str(ipv6_addr),
            ipv6_addr.to_string().color(colors::IPV6_ADDR),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_ipv6_scopes() {
        let cases = [
            ("2001:db8::1", "GUA"),
            ("fd00::1", "ULA"),
            ("fe80::1", "LLA"),
            ("::1", "IPv6"),
        ];
        for (raw, expected) in cases {
            let addr: Ipv6Addr = raw.parse().unwrap();
            assert_eq!(ipv6_to_type_str(&addr), expected, "{raw}");
        }
    }

    #[test]
    fn ipv4_detail_label() {
        let (label, value) = ip_to_detail(&"10.0.0.1".parse().unwrap());
        assert_eq!(label, "IPv4");
        assert!(value.to_string().contains("10.0.0.1"));
    }
}
