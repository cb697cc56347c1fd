//! Network Registry
//!
//! Immutable table mapping a network identifier to its full deployment
//! target profile. Built once at startup from static configuration and
//! shared read-only afterwards; resolution is a pure lookup. Centralizing
//! network metadata here is what lets the same verification logic run
//! unmodified against any number of heterogeneous chains.

use std::collections::HashMap;

use crate::domain::models::network_profile::NetworkProfile;
use crate::shared::errors::RegistryError;

/// Read-only network profile table
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    profiles: HashMap<String, NetworkProfile>,
}

impl NetworkRegistry {
    /// Build the registry, enforcing uniqueness of network ids and chain ids
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateNetworkId` if two profiles share an
    /// id, and `RegistryError::DuplicateChainId` if two profiles share a
    /// chain id. The registry must not be usable in either state.
    pub fn new(profiles: Vec<NetworkProfile>) -> Result<Self, RegistryError> {
        let mut by_id: HashMap<String, NetworkProfile> = HashMap::with_capacity(profiles.len());
        let mut by_chain_id: HashMap<u64, String> = HashMap::with_capacity(profiles.len());

        for profile in profiles {
            if by_id.contains_key(profile.id()) {
                return Err(RegistryError::DuplicateNetworkId(profile.id().to_string()));
            }
            if let Some(first) = by_chain_id.get(&profile.chain_id()) {
                return Err(RegistryError::DuplicateChainId {
                    chain_id: profile.chain_id(),
                    first: first.clone(),
                    second: profile.id().to_string(),
                });
            }
            by_chain_id.insert(profile.chain_id(), profile.id().to_string());
            by_id.insert(profile.id().to_string(), profile);
        }

        Ok(Self { profiles: by_id })
    }

    /// Resolve a network identifier to its profile
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownNetwork` for unregistered (or empty)
    /// identifiers; never a partial or default profile.
    pub fn resolve(&self, network_id: &str) -> Result<&NetworkProfile, RegistryError> {
        self.profiles
            .get(network_id)
            .ok_or_else(|| RegistryError::UnknownNetwork(network_id.to_string()))
    }

    /// Iterate all registered profiles (unordered)
    pub fn profiles(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.profiles.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
