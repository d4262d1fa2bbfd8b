//! Recipient allow-list

use std::collections::BTreeSet;

use crate::config::MailSettings;

/// Which recipient addresses may receive a submission
///
/// An address is allowed when it exactly matches one of the special
/// addresses, or when the text after its last `@` (lowercased) is one of the
/// allowed domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientPolicy {
    domains: BTreeSet<String>,
    special_addresses: BTreeSet<String>,
}

impl RecipientPolicy {
    /// Build a policy; domains are normalized to lowercase
    pub fn new<D, S>(domains: D, special_addresses: S) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
            special_addresses: special_addresses
                .into_iter()
                .map(|a| a.as_ref().trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Build a policy from the `[mail]` settings
    #[must_use]
    pub fn from_settings(settings: &MailSettings) -> Self {
        Self::new(&settings.allowed_domains, &settings.allowed_special_emails)
    }

    /// Whether a single address may receive mail
    #[must_use]
    pub fn is_allowed(&self, address: &str) -> bool {
        if self.special_addresses.contains(address) {
            return true;
        }

        address
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_lowercase())
            .is_some_and(|domain| self.domains.contains(&domain))
    }

    /// Addresses that fail the policy, in their original order
    #[must_use]
    pub fn disallowed<'a>(&self, addresses: &'a [String]) -> Vec<&'a str> {
        addresses
            .iter()
            .map(String::as_str)
            .filter(|address| !self.is_allowed(address))
            .collect()
    }

    /// Human-readable summary used in rejection messages
    ///
    /// e.g. `addresses at gmail.com, yahoo.com or careers@accelx.net`
    #[must_use]
    pub fn describe(&self) -> String {
        let domains = self.domains.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        let special = self
            .special_addresses
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        match (domains.is_empty(), special.is_empty()) {
            (false, false) => format!("addresses at {domains} or {special}"),
            (false, true) => format!("addresses at {domains}"),
            (true, false) => special,
            (true, true) => "no addresses".to_string(),
        }
    }
}
