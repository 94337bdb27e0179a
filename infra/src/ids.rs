use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use data_encoding::BASE64URL_NOPAD;
use err_derive::Error;
use hex_slice::AsHex;
use log::*;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const ID_LEN: usize = 16;
const DIVIDER: &str = "-";

/// A 128-bit identifier, tagged with the kind of thing it names.
///
/// Printed as `<prefix>-<base64url>`, where the prefix comes from the
/// entity's `Entity::PREFIX`.
pub struct Id<T> {
    val: [u8; ID_LEN],
    phantom: PhantomData<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error(display = "invalid prefix; expected {:?}", _0)]
    InvalidPrefix(&'static str),
    #[error(display = "unparseable id")]
    Unparseable,
}

pub trait Entity {
    const PREFIX: &'static str;
}

/// Generates time-ordered identifiers: nanoseconds since the epoch in the
/// high half, randomness in the low half.
#[derive(Debug, Default, Clone)]
pub struct IdGen {
    _priv: (),
}

impl<T> Id<T> {
    fn from_bytes(val: [u8; ID_LEN]) -> Self {
        Id {
            val,
            phantom: PhantomData,
        }
    }

    /// Derives a stable identifier from the hash of `entity`. Equal inputs
    /// always produce equal ids.
    pub fn hashed<H: Hash + ?Sized>(entity: &H) -> Self {
        let mut val = [0u8; ID_LEN];
        for (i, chunk) in val.chunks_mut(8).enumerate() {
            let mut h = siphasher::sip::SipHasher24::new_with_keys(0, i as u64);
            entity.hash(&mut h);
            chunk.copy_from_slice(&h.finish().to_be_bytes());
        }
        Self::from_bytes(val)
    }

    pub fn timestamp(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_nanos(self.high())
    }

    pub fn random(&self) -> u64 {
        self.low()
    }

    fn high(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.val[..8]);
        u64::from_be_bytes(buf)
    }

    fn low(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.val[8..]);
        u64::from_be_bytes(buf)
    }
}

impl IdGen {
    pub fn new() -> Self {
        IdGen { _priv: () }
    }

    pub fn generate<T>(&self) -> Id<T> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_else(|e| {
                warn!("Clock before epoch: {}", e);
                0
            });
        let random = rand::thread_rng().gen::<u64>();

        let mut val = [0u8; ID_LEN];
        val[..8].copy_from_slice(&stamp.to_be_bytes());
        val[8..].copy_from_slice(&random.to_be_bytes());
        Id::from_bytes(val)
    }
}

impl<T> Distribution<Id<T>> for Standard {
    fn sample<R: ?Sized + rand::Rng>(&self, rng: &mut R) -> Id<T> {
        Id::from_bytes(rng.gen())
    }
}

impl<T: Entity> fmt::Display for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{}{}{}",
            T::PREFIX,
            DIVIDER,
            BASE64URL_NOPAD.encode(&self.val)
        )
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Id")
            .field("val", &format_args!("{:x}", self.val.as_hex()))
            .finish()
    }
}

impl<T: Entity> std::str::FromStr for Id<T> {
    type Err = IdParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let remainder = src
            .strip_prefix(T::PREFIX)
            .ok_or(IdParseError::InvalidPrefix(T::PREFIX))?;
        let b64 = remainder
            .strip_prefix(DIVIDER)
            .ok_or(IdParseError::Unparseable)?;

        let bytes = BASE64URL_NOPAD
            .decode(b64.as_bytes())
            .map_err(|_| IdParseError::Unparseable)?;
        if bytes.len() != ID_LEN {
            return Err(IdParseError::Unparseable);
        }

        let mut val = [0u8; ID_LEN];
        val.copy_from_slice(&bytes);
        Ok(Id::from_bytes(val))
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Id::from_bytes(Default::default())
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T: Entity> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, T: Entity> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdStrVisitor<T>(PhantomData<T>);
        impl<'vi, T: Entity> de::Visitor<'vi> for IdStrVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "an Id string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Id<T>, E> {
                value.parse::<Id<T>>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IdStrVisitor(PhantomData))
    }
}
