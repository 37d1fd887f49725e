//! TON account addresses.
//!
//! Supports the raw `<workchain>:<hex hash>` form and the 48-character
//! user-friendly form (base64 or base64url over tag, workchain, hash and a
//! CRC16-XMODEM checksum).

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use crc::{Crc, CRC_16_XMODEM};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::AddressError;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const FLAG_TESTNET: u8 = 0x80;

const FRIENDLY_LEN: usize = 48;
const FRIENDLY_BYTES: usize = 36;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TonAddress {
    pub workchain: i32,
    pub hash: [u8; 32],
}

impl TonAddress {
    pub const fn new(workchain: i32, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Parse either the raw or the user-friendly representation.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }
        if trimmed.contains(':') {
            Self::from_raw(trimmed)
        } else {
            Self::from_friendly(trimmed)
        }
    }

    pub fn from_raw(input: &str) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidRaw(input.to_string());
        let (wc, hash_hex) = input.split_once(':').ok_or_else(invalid)?;
        let workchain: i32 = wc.parse().map_err(|_| invalid())?;
        if hash_hex.len() != 64 {
            return Err(invalid());
        }
        let mut hash = [0u8; 32];
        hex::decode_to_slice(hash_hex, &mut hash).map_err(|_| invalid())?;
        Ok(Self { workchain, hash })
    }

    pub fn from_friendly(input: &str) -> Result<Self, AddressError> {
        let invalid = |reason: &str| AddressError::InvalidFriendly {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        if input.len() != FRIENDLY_LEN {
            return Err(invalid("expected 48 characters"));
        }
        let bytes = if input.contains('-') || input.contains('_') {
            URL_SAFE.decode(input)
        } else {
            STANDARD.decode(input)
        }
        .map_err(|e| invalid(&e.to_string()))?;
        if bytes.len() != FRIENDLY_BYTES {
            return Err(invalid("expected 36 bytes"));
        }

        let tag = bytes[0] & !FLAG_TESTNET;
        if tag != TAG_BOUNCEABLE && tag != TAG_NON_BOUNCEABLE {
            return Err(invalid("unknown address tag"));
        }

        let expected = CRC16.checksum(&bytes[..34]);
        let actual = u16::from_be_bytes([bytes[34], bytes[35]]);
        if expected != actual {
            return Err(AddressError::Checksum { expected, actual });
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);
        Ok(Self {
            workchain: bytes[1] as i8 as i32,
            hash,
        })
    }

    /// Raw form, e.g. `0:83df...31a8`.
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// User-friendly base64url form.
    pub fn to_base64_url(&self, bounceable: bool, testnet: bool) -> String {
        let mut tag = if bounceable { TAG_BOUNCEABLE } else { TAG_NON_BOUNCEABLE };
        if testnet {
            tag |= FLAG_TESTNET;
        }
        let mut bytes = Vec::with_capacity(FRIENDLY_BYTES);
        bytes.push(tag);
        bytes.push(self.workchain as i8 as u8);
        bytes.extend_from_slice(&self.hash);
        let crc = CRC16.checksum(&bytes);
        bytes.extend_from_slice(&crc.to_be_bytes());
        URL_SAFE.encode(bytes)
    }

    /// Shortened form for compact UI labels: `EQCD39...xqB2N`.
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 5..])
    }
}

impl fmt::Display for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64_url(true, false))
    }
}

impl FromStr for TonAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TonAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TonAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "0:83dfd552e63729b472fcbcc8c45ebcc6691702558b68ec7527e1ba403a0f31a8";
    const BOUNCEABLE: &str = "EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2N";
    const NON_BOUNCEABLE: &str = "UQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqEBI";
    const TESTNET: &str = "kQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqKYH";

    #[test]
    fn test_parse_raw() {
        let addr = TonAddress::parse(RAW).unwrap();
        assert_eq!(addr.workchain, 0);
        assert_eq!(addr.hash[0], 0x83);
        assert_eq!(addr.to_raw(), RAW);
    }

    #[test]
    fn test_parse_friendly_forms_are_equal() {
        let raw = TonAddress::parse(RAW).unwrap();
        assert_eq!(TonAddress::parse(BOUNCEABLE).unwrap(), raw);
        assert_eq!(TonAddress::parse(NON_BOUNCEABLE).unwrap(), raw);
        assert_eq!(TonAddress::parse(TESTNET).unwrap(), raw);
    }

    #[test]
    fn test_to_base64_url_variants() {
        let addr = TonAddress::parse(RAW).unwrap();
        assert_eq!(addr.to_base64_url(true, false), BOUNCEABLE);
        assert_eq!(addr.to_base64_url(false, false), NON_BOUNCEABLE);
        assert_eq!(addr.to_base64_url(true, true), TESTNET);
        assert_eq!(addr.to_string(), BOUNCEABLE);
    }

    #[test]
    fn test_masterchain_address() {
        let addr = TonAddress::new(-1, [0xff; 32]);
        let friendly = addr.to_string();
        assert_eq!(friendly, "Ef___________________________________________7Sg");
        assert_eq!(TonAddress::parse(&friendly).unwrap(), addr);
        // standard alphabet variant of the same bytes
        assert_eq!(
            TonAddress::parse("Ef///////////////////////////////////////////7Sg").unwrap(),
            addr
        );
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut corrupted = BOUNCEABLE.to_string();
        corrupted.replace_range(47..48, "M");
        assert!(matches!(
            TonAddress::parse(&corrupted),
            Err(AddressError::Checksum { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(TonAddress::parse("  "), Err(AddressError::Empty));
        assert!(matches!(TonAddress::parse("0:abcd"), Err(AddressError::InvalidRaw(_))));
        assert!(matches!(TonAddress::parse("x:00"), Err(AddressError::InvalidRaw(_))));
        assert!(matches!(
            TonAddress::parse("EQshort"),
            Err(AddressError::InvalidFriendly { .. })
        ));
    }

    #[test]
    fn test_short() {
        let addr = TonAddress::parse(RAW).unwrap();
        assert_eq!(addr.short(), "EQCD39...xqB2N");
    }

    #[test]
    fn test_serde_roundtrip_uses_friendly_form() {
        let addr = TonAddress::parse(RAW).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", BOUNCEABLE));
        let back: TonAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
