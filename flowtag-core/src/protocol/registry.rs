use crate::protocol::iana::IANA_PROTOCOL_NUMBERS;
use std::borrow::Cow;
use std::fmt;

/// Name reported for protocol numbers the registry does not know.
pub const UNKNOWN_PROTOCOL: &str = "unknown";

/// Resolves an IP protocol number to its canonical lowercase name.
///
/// Implementations must be pure: the same number always yields the same name,
/// and numbers without a mapping yield [`UNKNOWN_PROTOCOL`].
pub trait ProtocolResolver {
    fn resolve(&self, number: u8) -> &str;
}

/// Immutable number -> name table covering the whole 8-bit protocol space.
#[derive(Clone)]
pub struct ProtocolRegistry {
    names: Box<[Option<Cow<'static, str>>]>,
}

impl ProtocolRegistry {
    /// Snapshot of the IANA assigned internet protocol numbers.
    pub fn iana() -> Self {
        Self::from_entries(
            IANA_PROTOCOL_NUMBERS
                .iter()
                .map(|(number, name)| (*number, Cow::Borrowed(*name))),
        )
    }

    /// Builds a registry from explicit entries. Names are lowercased; a later
    /// entry for the same number replaces an earlier one.
    pub fn from_entries<I, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u8, N)>,
        N: Into<Cow<'static, str>>,
    {
        let mut names: Vec<Option<Cow<'static, str>>> = vec![None; 256];

        for (number, name) in entries {
            let name = name.into();
            let name = if name.chars().any(char::is_uppercase) {
                Cow::Owned(name.to_lowercase())
            } else {
                name
            };
            names[number as usize] = Some(name);
        }

        Self {
            names: names.into_boxed_slice(),
        }
    }

    /// Number of protocol numbers with a known name.
    pub fn len(&self) -> usize {
        self.names.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProtocolRegistry {
    fn default() -> Self {
        Self::iana()
    }
}

impl ProtocolResolver for ProtocolRegistry {
    fn resolve(&self, number: u8) -> &str {
        self.names[number as usize]
            .as_deref()
            .unwrap_or(UNKNOWN_PROTOCOL)
    }
}

impl fmt::Debug for ProtocolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolRegistry")
            .field("known", &self.len())
            .finish()
    }
}
