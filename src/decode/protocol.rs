use std::fmt;

macro_rules! ip_protocol {
    (
        $(
            $name:ident = $value:literal => $label:literal
        ),*
    ) => {
        /// Protocol number of an IPv4 header or next header value of an IPv6 header
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum IpProtocol {
            $(
                $name,
            )*
            Other(u8),
        }

        impl From<u8> for IpProtocol {
            fn from(value: u8) -> Self {
                match value {
                    $(
                        $value => IpProtocol::$name,
                    )*
                    other => IpProtocol::Other(other),
                }
            }
        }
        impl From<IpProtocol> for u8 {
            fn from(value: IpProtocol) -> Self {
                match value {
                    $(
                        IpProtocol::$name => $value,
                    )*
                    IpProtocol::Other(other) => other,
                }
            }
        }
        impl fmt::Display for IpProtocol {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(
                        IpProtocol::$name => f.write_str($label),
                    )*
                    IpProtocol::Other(other) => write!(f, "Other ({other})"),
                }
            }
        }
    };
}
ip_protocol! {
    Icmp = 1 => "ICMP",
    Igmp = 2 => "IGMP",
    Tcp = 6 => "TCP",
    Udp = 17 => "UDP",
    Ipv6 = 41 => "IPv6",
    Gre = 47 => "GRE",
    Esp = 50 => "ESP",
    Ah = 51 => "AH",
    Icmpv6 = 58 => "ICMPv6",
    Ospf = 89 => "OSPF",
    Sctp = 132 => "SCTP",
    MplsInIp = 137 => "MPLS-in-IP"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let expected = [
            (1, "ICMP"),
            (2, "IGMP"),
            (6, "TCP"),
            (17, "UDP"),
            (41, "IPv6"),
            (47, "GRE"),
            (50, "ESP"),
            (51, "AH"),
            (58, "ICMPv6"),
            (89, "OSPF"),
            (132, "SCTP"),
            (137, "MPLS-in-IP"),
        ];
        for (value, label) in expected {
            assert_eq!(IpProtocol::from(value).to_string(), label);
        }
    }

    #[test]
    fn every_value_has_a_label() {
        for value in 0..=u8::MAX {
            let protocol = IpProtocol::from(value);
            assert_eq!(u8::from(protocol), value);
            assert!(!protocol.to_string().is_empty());
        }
        assert_eq!(IpProtocol::from(0).to_string(), "Other (0)");
        assert_eq!(IpProtocol::from(255).to_string(), "Other (255)");
    }
}
