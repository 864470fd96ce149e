//! Login boundary: checks credentials against configured accounts and keeps a
//! session token under the `music_auth` key.

use crate::config::Account;
use crate::storage::{AUTH_KEY, StateStore};
use anyhow::Context;
use sha1::{Digest, Sha1};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub struct Authenticator<'a> {
    accounts: &'a [Account],
    store: &'a dyn StateStore,
}

impl<'a> Authenticator<'a> {
    pub fn new(accounts: &'a [Account], store: &'a dyn StateStore) -> Self {
        Self { accounts, store }
    }

    pub fn is_authenticated(&self) -> bool {
        match self.store.get(AUTH_KEY) {
            Ok(token) => token.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("cannot read auth state: {e:#}");
                false
            }
        }
    }

    pub fn login(&self, credentials: &Credentials) -> anyhow::Result<()> {
        if self.accounts.is_empty() {
            anyhow::bail!("no accounts configured; add one with `lyrix account add`");
        }

        let account = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(credentials.email.trim()));
        let valid = account.is_some_and(|a| verify_password(&a.password, &credentials.password));
        if !valid {
            tracing::info!(email = %credentials.email, "login rejected");
            anyhow::bail!("invalid email or password");
        }

        let token = hex::encode(rand::random::<[u8; 16]>());
        self.store.set(AUTH_KEY, &token).context("store session")?;
        tracing::info!(email = %credentials.email, "logged in");
        Ok(())
    }

    pub fn logout(&self) -> anyhow::Result<()> {
        self.store.remove(AUTH_KEY).context("clear session")
    }
}

/// Rounds of SHA-1 applied to new password digests.
const HASH_ROUNDS: u32 = 20_000;

/// Stretched, salted digest in the `rounds$salt$hex` form stored in the config file.
pub fn hash_password(password: &str) -> String {
    let salt = hex::encode(rand::random::<[u8; 8]>());
    let digest = hex::encode(stretch(HASH_ROUNDS, &salt, password));
    format!("{HASH_ROUNDS}${salt}${digest}")
}

/// Also accepts single-round `salt$hex` digests written by older builds.
pub fn verify_password(stored: &str, password: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    let (rounds, salt, expected) = match parts.as_slice() {
        [rounds, salt, expected] => match rounds.parse::<u32>() {
            Ok(rounds) if rounds > 0 => (rounds, *salt, *expected),
            _ => return false,
        },
        [salt, expected] => (1, *salt, *expected),
        _ => return false,
    };
    let Ok(expected) = hex::decode(expected) else {
        return false;
    };
    constant_time_eq(&stretch(rounds, salt, password), &expected)
}

/// Add an account or replace the password of an existing one.
pub fn upsert_account(accounts: &mut Vec<Account>, email: &str, password: &str) {
    let email = email.trim();
    accounts.retain(|a| !a.email.eq_ignore_ascii_case(email));
    accounts.push(Account {
        email: email.to_string(),
        password: hash_password(password),
    });
}

fn stretch(rounds: u32, salt: &str, password: &str) -> Vec<u8> {
    let mut hasher = Sha1::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let mut out = hasher.finalize();
    for _ in 1..rounds {
        let mut hasher = Sha1::new();
        hasher.update(out);
        hasher.update(password.as_bytes());
        out = hasher.finalize();
    }
    out.to_vec()
}

/// Compares every byte regardless of where the first mismatch is.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn accounts() -> Vec<Account> {
        let mut accounts = Vec::new();
        upsert_account(&mut accounts, "yoursong@lyrix.com", "melody");
        accounts
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("melody");
        let b = hash_password("melody");
        assert_ne!(a, b);
        assert!(verify_password(&a, "melody"));
        assert!(verify_password(&b, "melody"));
        assert!(!verify_password(&a, "harmony"));
        assert!(!verify_password("no-separator", "melody"));
    }

    #[test]
    fn test_hash_is_stretched() {
        let stored = hash_password("melody");
        let (rounds, rest) = stored.split_once('$').unwrap();
        assert_eq!(rounds.parse::<u32>().unwrap(), HASH_ROUNDS);

        // Same salt and digest with fewer rounds must not verify.
        assert!(!verify_password(&format!("1${rest}"), "melody"));
        assert!(!verify_password(&format!("0${rest}"), "melody"));
        assert!(!verify_password(&format!("many${rest}"), "melody"));
    }

    #[test]
    fn test_single_round_digest_still_verifies() {
        let legacy = format!("abcd${}", hex::encode(stretch(1, "abcd", "melody")));
        assert!(verify_password(&legacy, "melody"));
        assert!(!verify_password(&legacy, "harmony"));
        assert!(!verify_password("abcd$not-hex", "melody"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"lyrix", b"lyrix"));
        assert!(!constant_time_eq(b"lyrix", b"lyriz"));
        assert!(!constant_time_eq(b"lyrix", b"lyri"));
    }

    #[test]
    fn test_login_logout() {
        let store = MemoryStore::new();
        let accounts = accounts();
        let auth = Authenticator::new(&accounts, &store);
        assert!(!auth.is_authenticated());

        auth.login(&creds("YourSong@lyrix.com", "melody")).unwrap();
        assert!(auth.is_authenticated());

        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_bad_credentials_leave_marker_unset() {
        let store = MemoryStore::new();
        let accounts = accounts();
        let auth = Authenticator::new(&accounts, &store);

        assert!(auth.login(&creds("yoursong@lyrix.com", "wrong")).is_err());
        assert!(auth.login(&creds("someone@else.com", "melody")).is_err());
        assert!(!auth.is_authenticated());
        assert_eq!(store.get(AUTH_KEY).unwrap(), None);
    }

    #[test]
    fn test_no_accounts_rejects_login() {
        let store = MemoryStore::new();
        let auth = Authenticator::new(&[], &store);
        assert!(auth.login(&creds("a@b.c", "x")).is_err());
    }

    #[test]
    fn test_upsert_account_replaces_password() {
        let mut accounts = accounts();
        upsert_account(&mut accounts, "YOURSONG@lyrix.com", "rhythm");
        assert_eq!(accounts.len(), 1);
        assert!(verify_password(&accounts[0].password, "rhythm"));
    }
}
