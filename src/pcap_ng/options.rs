use crate::{byte_order::Endianness, pcap_ng::pad_length_to_32_bits};
use thiserror::Error;

macro_rules! define_options_enum {
    (
        $(#[$docs:meta])*
        enum $name:ident {
            $(
                $(#[$variant_docs:meta])*
                $variant:ident = $value:literal,
            )*
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $(#[$docs])*
        pub enum $name {
            $(
                $(#[$variant_docs])*
                $variant = $value,
            )*
        }

        impl TryFrom<u16> for $name {
            type Error = ();

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $(
                        $value => Ok(Self::$variant),
                    )*
                    _ => Err(()),
                }
            }
        }
    };
}
pub(crate) use define_options_enum;

/// Code that terminates an option list
pub const END_OF_OPTIONS: u16 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOption {
    pub code: u16,
    pub length: u16,
    pub value: Vec<u8>,
}
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionParseError {
    #[error("Option {code} declares {length} bytes but only {available} remain")]
    TruncatedOption {
        code: u16,
        length: u16,
        available: usize,
    },
}
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockOptions(pub Vec<BlockOption>);
impl BlockOptions {
    /// Parses the option list at the end of a block body
    ///
    /// A missing end-of-options marker is tolerated, trailing bytes shorter than
    /// an option header are ignored.
    pub fn parse(bytes: &[u8], endianness: Endianness) -> Result<Self, OptionParseError> {
        let mut options = Vec::new();
        let mut rest = bytes;
        while rest.len() >= 4 {
            let code = endianness.u16_at(rest, 0);
            let length = endianness.u16_at(rest, 2);
            if code == END_OF_OPTIONS {
                break;
            }
            let padded_length = pad_length_to_32_bits(length as usize);
            let available = rest.len() - 4;
            if length as usize > available {
                return Err(OptionParseError::TruncatedOption {
                    code,
                    length,
                    available,
                });
            }
            options.push(BlockOption {
                code,
                length,
                value: rest[4..4 + length as usize].to_vec(),
            });
            rest = &rest[(4 + padded_length).min(rest.len())..];
        }
        Ok(Self(options))
    }
    /// The value of the first option with the given code
    pub fn find(&self, code: u16) -> Option<&[u8]> {
        self.0
            .iter()
            .find(|option| option.code == code)
            .map(|option| option.value.as_slice())
    }
}
