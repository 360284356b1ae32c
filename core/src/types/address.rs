use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use crc::Crc;
use lazy_static::lazy_static;

use super::{TonAddressParseError, TonHash};
use crate::cell::{StateInit, TonCellError};

mod serde_impl;

lazy_static! {
    pub static ref CRC_16_XMODEM: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_XMODEM);
}

const USER_FRIENDLY_LEN: usize = 48;

/// Flags carried by the user-friendly (base64) address form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressFlags {
    pub bounceable: bool,
    pub testnet: bool,
}

impl Default for AddressFlags {
    fn default() -> Self {
        AddressFlags {
            bounceable: true,
            testnet: false,
        }
    }
}

impl AddressFlags {
    fn tag(self) -> u8 {
        let mut tag = if self.bounceable { 0x11 } else { 0x51 };
        if self.testnet {
            tag |= 0x80;
        }
        tag
    }

    fn from_tag(tag: u8) -> Option<AddressFlags> {
        let testnet = tag & 0x80 != 0;
        let bounceable = match tag & 0x7f {
            0x11 => true,
            0x51 => false,
            _ => return None,
        };
        Some(AddressFlags {
            bounceable,
            testnet,
        })
    }
}

/// Standard internal address: workchain and 256-bit account id.
///
/// An absent address (`addr_none`) is modelled as `Option<TonAddress>`.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct TonAddress {
    pub workchain: i32,
    pub hash_part: TonHash,
}

impl TonAddress {
    pub fn new(workchain: i32, hash_part: &TonHash) -> TonAddress {
        TonAddress {
            workchain,
            hash_part: *hash_part,
        }
    }

    /// Address of the contract deployed in `workchain` with `state_init`.
    pub fn from_state_init(
        workchain: i32,
        state_init: &StateInit,
    ) -> Result<TonAddress, TonCellError> {
        Ok(TonAddress::new(workchain, &state_init.build()?.cell_hash()))
    }

    pub fn from_hex_str(s: &str) -> Result<TonAddress, TonAddressParseError> {
        let (wc, hash) = s.split_once(':').ok_or_else(|| {
            TonAddressParseError::new(s, "Invalid hex address string: wrong address format")
        })?;
        let workchain = wc.parse::<i32>().map_err(|_| {
            TonAddressParseError::new(s, "Invalid hex address string: parse int error")
        })?;
        let hash_part = hex::decode(hash)
            .ok()
            .and_then(|bytes| TonHash::try_from(bytes.as_slice()).ok())
            .ok_or_else(|| {
                TonAddressParseError::new(s, "Invalid hex address string: bad account id")
            })?;
        Ok(TonAddress::new(workchain, &hash_part))
    }

    pub fn from_base64_url(s: &str) -> Result<TonAddress, TonAddressParseError> {
        Ok(Self::from_base64_url_flags(s)?.0)
    }

    pub fn from_base64_url_flags(s: &str) -> Result<(TonAddress, AddressFlags), TonAddressParseError> {
        Self::from_user_friendly(s, URL_SAFE_NO_PAD.decode(s))
    }

    pub fn from_base64_std(s: &str) -> Result<TonAddress, TonAddressParseError> {
        Ok(Self::from_base64_std_flags(s)?.0)
    }

    pub fn from_base64_std_flags(s: &str) -> Result<(TonAddress, AddressFlags), TonAddressParseError> {
        Self::from_user_friendly(s, STANDARD_NO_PAD.decode(s))
    }

    fn from_user_friendly(
        src: &str,
        decoded: Result<Vec<u8>, base64::DecodeError>,
    ) -> Result<(TonAddress, AddressFlags), TonAddressParseError> {
        if src.len() != USER_FRIENDLY_LEN {
            return Err(TonAddressParseError::new(
                src,
                "Invalid base64 address: wrong length",
            ));
        }
        let bytes: [u8; 36] = decoded
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| TonAddressParseError::new(src, "Invalid base64 address: decode error"))?;

        let flags = AddressFlags::from_tag(bytes[0])
            .ok_or_else(|| TonAddressParseError::new(src, "Invalid base64 address: wrong tag byte"))?;
        let calc_crc = CRC_16_XMODEM.checksum(&bytes[0..34]);
        let addr_crc = u16::from_be_bytes([bytes[34], bytes[35]]);
        if calc_crc != addr_crc {
            return Err(TonAddressParseError::new(
                src,
                "Invalid base64 address: CRC mismatch",
            ));
        }
        let workchain = bytes[1] as i8 as i32;
        let hash_part = TonHash::try_from(&bytes[2..34])
            .map_err(|_| TonAddressParseError::new(src, "Invalid base64 address: bad account id"))?;
        Ok((TonAddress::new(workchain, &hash_part), flags))
    }

    pub fn to_hex(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash_part))
    }

    pub fn to_base64_url(&self) -> String {
        self.to_base64_url_flags(AddressFlags::default())
    }

    pub fn to_base64_url_flags(&self, flags: AddressFlags) -> String {
        URL_SAFE_NO_PAD.encode(self.user_friendly_bytes(flags))
    }

    pub fn to_base64_std(&self) -> String {
        STANDARD_NO_PAD.encode(self.user_friendly_bytes(AddressFlags::default()))
    }

    fn user_friendly_bytes(&self, flags: AddressFlags) -> [u8; 36] {
        let mut bytes = [0u8; 36];
        bytes[0] = flags.tag();
        bytes[1] = (self.workchain & 0xff) as u8;
        bytes[2..34].copy_from_slice(&self.hash_part);
        let crc = CRC_16_XMODEM.checksum(&bytes[0..34]);
        bytes[34..36].copy_from_slice(&crc.to_be_bytes());
        bytes
    }
}

impl Display for TonAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_base64_url().as_str())
    }
}

impl Debug for TonAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_base64_url().as_str())
    }
}

impl FromStr for TonAddress {
    type Err = TonAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == USER_FRIENDLY_LEN {
            if s.contains('-') || s.contains('_') {
                TonAddress::from_base64_url(s)
            } else {
                TonAddress::from_base64_std(s)
            }
        } else {
            TonAddress::from_hex_str(s)
        }
    }
}

impl TryFrom<String> for TonAddress {
    type Error = TonAddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}
