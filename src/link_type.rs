//! Link-layer header types announced by capture files
//!
//! Only [LinkType::Ethernet] frames are decoded meaningfully. Anything else is
//! kept so it can be reported, the frames are still handed to the Ethernet
//! decoder.
use std::fmt;

macro_rules! link_type {
    (
        $(
            $name:ident = $value:literal
        ),*
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum LinkType {
            $(
                $name,
            )*
            /// A value not in the table above
            Other(u32),
        }

        impl From<u32> for LinkType {
            fn from(value: u32) -> Self {
                match value {
                    $(
                        $value => LinkType::$name,
                    )*
                    other => LinkType::Other(other),
                }
            }
        }
        impl From<LinkType> for u32 {
            fn from(value: LinkType) -> Self {
                match value {
                    $(
                        LinkType::$name => $value,
                    )*
                    LinkType::Other(other) => other,
                }
            }
        }
    };
}
link_type! {
    Null = 0,
    Ethernet = 1,
    Ieee802_5 = 6,
    Ppp = 9,
    Fddi = 10,
    Raw = 101,
    Ieee802_11 = 105,
    Loop = 108,
    LinuxSll = 113,
    Ieee802_11Radiotap = 127,
    Ipv4 = 228,
    Ipv6 = 229,
    LinuxSll2 = 276
}
impl LinkType {
    pub fn is_ethernet(&self) -> bool {
        matches!(self, LinkType::Ethernet)
    }
}
impl From<u16> for LinkType {
    fn from(value: u16) -> Self {
        LinkType::from(value as u32)
    }
}
impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkType::Other(value) => write!(f, "unknown ({value})"),
            known => write!(f, "{known:?} ({})", u32::from(*known)),
        }
    }
}
