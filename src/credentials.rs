//! Secret lookup for credentials omitted from the run configuration.

use keyring::Entry;
use std::env;

/// Look up a secret: OS keyring first, then the environment variable.
pub(crate) fn lookup_secret(service: &str, account: &str, env_var: &str) -> Option<String> {
    if let Ok(entry) = Entry::new(service, account) {
        if let Ok(secret) = entry.get_password() {
            return Some(secret);
        }
    }
    env::var(env_var).ok().filter(|s| !s.is_empty())
}

/// Keyring service names.
pub(crate) const OCILION_KEYRING_SERVICE: &str = "rest-nodes-ocilion";
pub(crate) const ODOO_KEYRING_SERVICE: &str = "rest-nodes-odoo";
