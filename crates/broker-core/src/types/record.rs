//! Codec for the shared assignment record.
//!
//! On the wire the record is a flat set of strings. Every assignment
//! contributes three members: the client id, the resource id, and a pairing
//! token joining the two with [`PAIRING_SEPARATOR`]. Stores only ever need
//! membership predicates ("is this client or resource already present?")
//! to reserve atomically, and readers decode the set into a validated
//! bidirectional mapping with [`AssignmentRecord::decode`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::id::{ClientId, ResourceId};

/// Separator joining a client id and a resource id in a pairing token.
pub const PAIRING_SEPARATOR: &str = "=|pair|=";

/// Build the pairing token for an assignment.
pub fn pairing_token(client: &ClientId, resource: &ResourceId) -> String {
    format!("{client}{PAIRING_SEPARATOR}{resource}")
}

/// The three set members written by a single reservation.
pub fn reservation_members(client: &ClientId, resource: &ResourceId) -> [String; 3] {
    [
        client.to_string(),
        resource.to_string(),
        pairing_token(client, resource),
    ]
}

/// A single client → resource assignment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assignment {
    /// Client holding the resource.
    pub client: ClientId,
    /// Resource held by the client.
    pub resource: ResourceId,
}

/// Decoded, validated view of the assignment record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentRecord {
    by_client: BTreeMap<ClientId, ResourceId>,
    by_resource: BTreeMap<ResourceId, ClientId>,
}

impl AssignmentRecord {
    /// Decode the raw set members of the record.
    ///
    /// Fails with `CorruptRecord` when the member count is not a multiple of
    /// three, when a pairing token references a component that is not present
    /// standalone, when a client or resource appears in more than one pairing
    /// token, or when a standalone member belongs to no pairing token.
    pub fn decode<I, S>(members: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members: BTreeSet<String> = members
            .into_iter()
            .map(|m| m.as_ref().to_string())
            .collect();

        if members.len() % 3 != 0 {
            return Err(AppError::corrupt_record(format!(
                "Record holds {} members, expected a multiple of three",
                members.len()
            )));
        }

        let mut tokens = Vec::new();
        let mut standalone = BTreeSet::new();
        for member in &members {
            if member.contains(PAIRING_SEPARATOR) {
                tokens.push(member.as_str());
            } else {
                standalone.insert(member.as_str());
            }
        }

        let mut record = Self::default();

        for token in tokens {
            let Some((client, resource)) = token.split_once(PAIRING_SEPARATOR) else {
                continue;
            };
            if client.is_empty() || resource.is_empty() {
                return Err(AppError::corrupt_record(format!(
                    "Malformed pairing token '{token}'"
                )));
            }
            if !standalone.contains(client) || !standalone.contains(resource) {
                return Err(AppError::corrupt_record(format!(
                    "Pairing token '{token}' has no standalone components"
                )));
            }

            let client = ClientId::from_trusted(client);
            let resource = ResourceId::new(resource);
            if record.by_client.contains_key(&client) {
                return Err(AppError::corrupt_record(format!(
                    "Client '{client}' is paired more than once"
                )));
            }
            if record.by_resource.contains_key(&resource) {
                return Err(AppError::corrupt_record(format!(
                    "Resource '{resource}' is paired more than once"
                )));
            }
            record.by_client.insert(client.clone(), resource.clone());
            record.by_resource.insert(resource, client);
        }

        if standalone.len() != record.by_client.len() * 2 {
            return Err(AppError::corrupt_record(format!(
                "Record holds {} standalone members for {} pairings",
                standalone.len(),
                record.by_client.len()
            )));
        }

        Ok(record)
    }

    /// Resource assigned to the client, if any.
    pub fn resource_for(&self, client: &ClientId) -> Option<&ResourceId> {
        self.by_client.get(client)
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.by_client.len()
    }

    /// Whether the record holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.by_client.is_empty()
    }

    /// All assignments ordered by client id.
    pub fn assignments(&self) -> Vec<Assignment> {
        self.by_client
            .iter()
            .map(|(client, resource)| Assignment {
                client: client.clone(),
                resource: resource.clone(),
            })
            .collect()
    }
}
