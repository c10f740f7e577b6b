//! Persisted accessory state.
//!
//! The `{current, target}` pair is stored as a single opaque record under
//! a fixed domain/key. An absent or size-mismatched record resets to the
//! factory defaults; the domain is purged only by a factory reset outside
//! this crate.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::Fault;
use crate::state::AccessoryState;

/// Key-value store domain holding accessory configuration.
pub const STATE_DOMAIN: u8 = 0x00;
/// Key of the persisted state record inside [`STATE_DOMAIN`].
pub const STATE_KEY: u8 = 0x00;

/// Durable key-value store exposed by the platform.
///
/// Records are opaque byte blobs addressed by a domain/key pair. Both
/// operations either succeed or fail with a platform [`Fault`]; there is
/// no partial-failure mode.
pub trait KeyValueStore {
    /// Read the record at `domain`/`key` into `buf`.
    ///
    /// Returns the number of bytes read, or `None` when no record exists.
    fn get(&mut self, domain: u8, key: u8, buf: &mut [u8]) -> Result<Option<usize>, Fault>;

    /// Write the record at `domain`/`key`.
    fn set(&mut self, domain: u8, key: u8, value: &[u8]) -> Result<(), Fault>;
}

/// Loads and saves the accessory state record.
pub struct StateStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> StateStore<K> {
    pub const fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Load the persisted state.
    ///
    /// Falls back to [`AccessoryState::default`] when no record exists or
    /// the stored record does not match the expected size. A mismatched
    /// record is logged; it is recovered from, not an error.
    pub fn load(&mut self) -> Result<AccessoryState, Fault> {
        let mut buf = [0u8; AccessoryState::ENCODED_SIZE];
        match self.kv.get(STATE_DOMAIN, STATE_KEY, &mut buf)? {
            Some(len) if len == buf.len() => {
                Ok(AccessoryState::decode(&buf).unwrap_or_default())
            }
            Some(_len) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "unexpected state record found in key-value store ({} bytes), resetting to defaults",
                    _len
                );
                Ok(AccessoryState::default())
            }
            None => Ok(AccessoryState::default()),
        }
    }

    /// Persist the full state record.
    pub fn save(&mut self, state: &AccessoryState) -> Result<(), Fault> {
        self.kv.set(STATE_DOMAIN, STATE_KEY, &state.encode())
    }
}
