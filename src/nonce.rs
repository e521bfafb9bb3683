//! Nonce - anti-forgery tokens for the edit endpoint.
//!
//! Tokens are HMAC-SHA256 over `"{tick}|{action}|{user_id}"`, encoded as
//! unpadded base64url. A tick is half the configured lifetime, and a token
//! verifies during the tick it was issued in and the one after, so a token
//! lives between one half-lifetime and one full lifetime.
//!
//! The edit action is scoped to the widget's bot id and minimum role (see
//! [`scoped_action`]). A client that rewrites either value in its submission
//! no longer holds a matching token.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::access::Requester;

type HmacSha256 = Hmac<Sha256>;

/// Action name the edit endpoint is registered under.
pub const SAVE_ACTION: &str = "save_chatbot_instructions";

/// Default token lifetime: one day.
pub const DEFAULT_LIFETIME_SECS: u64 = 86_400;

/// Capability supplied by the host: issue and check anti-forgery tokens.
pub trait AntiForgery: Send + Sync {
    /// Issue a token for `action` bound to `requester`.
    fn issue(&self, action: &str, requester: &Requester) -> String;

    /// Check a token previously issued for `action` and `requester`.
    fn verify(&self, token: &str, action: &str, requester: &Requester) -> bool;
}

/// Action name for editing `bot_id` under the `min_role` threshold.
pub fn scoped_action(bot_id: &str, min_role: &str) -> String {
    format!("{}:{}:{}", SAVE_ACTION, bot_id, min_role)
}

/// HMAC nonce issuer/verifier with tick-based expiry.
#[derive(Clone)]
pub struct NonceKeeper {
    secret: Vec<u8>,
    lifetime_secs: u64,
}

impl NonceKeeper {
    /// Create a keeper with an explicit secret. Lifetimes under 2s are raised to 2s.
    pub fn new(secret: impl Into<Vec<u8>>, lifetime_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_secs: lifetime_secs.max(2),
        }
    }

    /// Create a keeper with a fresh random 32-byte secret.
    ///
    /// Tokens issued by one process do not verify in another.
    pub fn random(lifetime_secs: u64) -> Self {
        let mut secret = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self::new(secret, lifetime_secs)
    }

    fn tick(&self, now_secs: u64) -> u64 {
        now_secs / (self.lifetime_secs / 2)
    }

    fn sign(&self, tick: u64, action: &str, requester: &Requester) -> Option<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        let payload = format!(
            "{}|{}|{}",
            tick,
            action,
            requester.user_id().unwrap_or_default()
        );
        mac.update(payload.as_bytes());
        Some(mac.finalize().into_bytes().to_vec())
    }

    /// Issue a token as of `now_secs` (seconds since the Unix epoch).
    pub fn issue_at(&self, action: &str, requester: &Requester, now_secs: u64) -> String {
        self.sign(self.tick(now_secs), action, requester)
            .map(|mac| URL_SAFE_NO_PAD.encode(mac))
            .unwrap_or_default()
    }

    /// Verify a token as of `now_secs` (seconds since the Unix epoch).
    pub fn verify_at(&self, token: &str, action: &str, requester: &Requester, now_secs: u64) -> bool {
        let Ok(presented) = URL_SAFE_NO_PAD.decode(token.trim()) else {
            return false;
        };
        let tick = self.tick(now_secs);
        [Some(tick), tick.checked_sub(1)]
            .into_iter()
            .flatten()
            .filter_map(|t| self.sign(t, action, requester))
            .any(|expected| {
                expected.len() == presented.len() && bool::from(expected.ct_eq(presented.as_slice()))
            })
    }
}

impl AntiForgery for NonceKeeper {
    fn issue(&self, action: &str, requester: &Requester) -> String {
        self.issue_at(action, requester, unix_now())
    }

    fn verify(&self, token: &str, action: &str, requester: &Requester) -> bool {
        self.verify_at(token, action, requester, unix_now())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
