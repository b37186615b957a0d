//! Signed-in state as an explicit context object.
//!
//! The application creates one [`Session`] at startup, hands it to whatever needs it, and
//! tears it down on exit. Nothing here talks to an identity provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityProvider {
    Email,
    Google,
    Kakao,
    Naver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    SignedOut,
    SignedIn {
        provider: IdentityProvider,
        since: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn init() -> Self {
        Self {
            state: SessionState::SignedOut,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn { .. })
    }

    /// Re-signing in with the same provider keeps the original timestamp.
    pub fn sign_in(&mut self, provider: IdentityProvider, now: DateTime<Utc>) {
        if let SessionState::SignedIn { provider: current, .. } = &self.state {
            if *current == provider {
                return;
            }
        }
        tracing::info!(?provider, "session signed in");
        self.state = SessionState::SignedIn {
            provider,
            since: now,
        };
    }

    pub fn sign_out(&mut self) {
        if self.is_signed_in() {
            tracing::info!("session signed out");
        }
        self.state = SessionState::SignedOut;
    }

    /// Ends the session for good; consumes it so it cannot be used afterwards.
    pub fn teardown(mut self) {
        self.sign_out();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn starts_signed_out() {
        let s = Session::init();
        assert!(!s.is_signed_in());
        assert_eq!(s.state(), &SessionState::SignedOut);
    }

    #[test]
    fn sign_in_then_out() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 27, 9, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 1, 27, 10, 0, 0).unwrap();
        let mut s = Session::init();

        s.sign_in(IdentityProvider::Kakao, t0);
        s.sign_in(IdentityProvider::Kakao, t1);
        assert_eq!(
            s.state(),
            &SessionState::SignedIn {
                provider: IdentityProvider::Kakao,
                since: t0
            }
        );

        s.sign_in(IdentityProvider::Naver, t1);
        assert!(matches!(
            s.state(),
            SessionState::SignedIn { provider: IdentityProvider::Naver, since } if *since == t1
        ));

        s.sign_out();
        assert!(!s.is_signed_in());
        s.teardown();
    }

    #[test]
    fn state_serializes_with_tag() {
        let v = serde_json::to_value(SessionState::SignedOut).unwrap();
        assert_eq!(v, serde_json::json!({"state": "signed_out"}));
    }
}
