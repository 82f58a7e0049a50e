//! Message Identifiers
//!
//! Ids come from the OS random source as UUIDv4 strings. If that source is
//! unavailable a seeded `SmallRng` produces a base-36 token instead, suffixed
//! with a process-wide counter so tokens stay unique for the session.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, RngCore, SeedableRng};

/// Unique message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a new unique message ID
    #[must_use]
    pub fn new() -> Self {
        Self(generate_id())
    }

    /// Wrap an existing token
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate an identifier from the OS random source
#[must_use]
pub fn generate_id() -> String {
    generate_id_with(&mut OsRng)
}

/// Generate an identifier from `source`, falling back when it fails
pub fn generate_id_with<R: RngCore + ?Sized>(source: &mut R) -> String {
    let mut bytes = [0u8; 16];
    match source.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "Random source unavailable, using fallback ids");
            fallback_id()
        }
    }
}

fn fallback_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut rng = SmallRng::seed_from_u64(nanos ^ seq.rotate_left(32));

    format!("{}{}", to_base36(rng.gen()), to_base36(seq))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// A random source that always fails
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::other("no entropy")))
        }
    }

    #[test]
    fn test_ids_are_unique_and_non_empty() {
        let ids: Vec<String> = (0..1000).map(|_| generate_id()).collect();
        assert!(ids.iter().all(|id| !id.is_empty()));

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_os_ids_are_uuid_v4() {
        let id = generate_id();
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_fallback_ids_are_unique() {
        let ids: Vec<String> = (0..1000).map(|_| generate_id_with(&mut BrokenRng)).collect();
        assert!(ids.iter().all(|id| !id.is_empty()));
        assert!(ids.iter().all(|id| uuid::Uuid::parse_str(id).is_err()));

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_message_id_display() {
        let id = MessageId::from_token("m0");
        assert_eq!(id.to_string(), "m0");
        assert_ne!(MessageId::new(), MessageId::new());
    }
}
