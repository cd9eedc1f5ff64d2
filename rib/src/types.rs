// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Formatter};
use std::net::Ipv4Addr;
use std::str::FromStr;

#[derive(
    Debug, Copy, Clone, Serialize, Deserialize, Eq, Hash, PartialEq, JsonSchema,
)]
pub struct Prefix4 {
    pub value: Ipv4Addr,
    pub length: u8,
}

impl PartialOrd for Prefix4 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Prefix4 {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.value != other.value {
            return self.value.cmp(&other.value);
        }
        self.length.cmp(&other.length)
    }
}

impl Prefix4 {
    pub const HOST_MASK: u8 = 32;

    /// Create a new `Prefix4` from an IP address and net mask. Host bits
    /// are zeroed upon creation.
    /// ```
    /// use rib::types::Prefix4;
    /// use std::net::Ipv4Addr;
    /// let p4 = Prefix4::new(Ipv4Addr::new(10, 0, 0, 10), 24);
    /// assert_eq!(p4.value, Ipv4Addr::new(10, 0, 0, 0));
    /// ```
    pub fn new(ip: Ipv4Addr, length: u8) -> Self {
        let mut new = Self { value: ip, length };
        new.unset_host_bits();
        new
    }

    pub fn host_bits_are_unset(&self) -> bool {
        self.value.to_bits() & self.mask() == self.value.to_bits()
    }

    pub fn unset_host_bits(&mut self) {
        self.value = Ipv4Addr::from_bits(self.value.to_bits() & self.mask())
    }

    /// Check if this prefix is equal to or more specific than `other`.
    pub fn within(&self, other: &Prefix4) -> bool {
        if self.length < other.length {
            return false;
        }
        self.value.to_bits() & other.mask()
            == other.value.to_bits() & other.mask()
    }

    fn mask(&self) -> u32 {
        match self.length {
            0 => 0,
            1..=31 => (!0u32) << (32 - self.length),
            _ => !0u32,
        }
    }
}

impl fmt::Display for Prefix4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.value, self.length)
    }
}

impl FromStr for Prefix4 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, length) =
            s.split_once('/').ok_or("malformed prefix".to_string())?;

        let length: u8 =
            length.parse().map_err(|_| "malformed length".to_string())?;
        if length > Self::HOST_MASK {
            return Err("malformed length".to_string());
        }

        Ok(Self::new(
            value.parse().map_err(|_| "malformed ip addr".to_string())?,
            length,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::Prefix4;
    use std::net::Ipv4Addr;

    #[test]
    fn prefix4_host_bits() {
        let p: Prefix4 = "198.51.100.77/24".parse().unwrap();
        assert_eq!(p.value, Ipv4Addr::new(198, 51, 100, 0));
        assert!(p.host_bits_are_unset());
    }

    #[test]
    fn prefix4_rejects_oversized_length() {
        assert!("10.0.0.0/40".parse::<Prefix4>().is_err());
        assert!("10.0.0.0/33".parse::<Prefix4>().is_err());
        let host: Prefix4 = "10.0.0.1/32".parse().unwrap();
        assert_eq!(host.value, Ipv4Addr::new(10, 0, 0, 1));
        assert!(host.host_bits_are_unset());
    }

    #[test]
    fn prefix4_within() {
        let net: Prefix4 = "10.0.0.0/8".parse().unwrap();
        let sub: Prefix4 = "10.1.2.0/24".parse().unwrap();
        let other: Prefix4 = "192.0.2.0/24".parse().unwrap();
        assert!(sub.within(&net));
        assert!(!net.within(&sub));
        assert!(!other.within(&net));
    }
}
