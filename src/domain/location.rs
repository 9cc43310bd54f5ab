//! Location entity and the assignment search rule.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user::User;

/// A physical or logical site users can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "North Warehouse")]
    pub name: String,
    #[schema(example = "12 Dock Road")]
    pub address: Option<String>,
}

/// Location creation data
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewLocation {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "North Warehouse")]
    pub name: String,
    #[schema(example = "12 Dock Road")]
    pub address: Option<String>,
}

/// Drop every suggested user already assigned to the location.
///
/// Membership is decided by user id, so two loads of the same row compare
/// equal even if they came from different queries.
pub fn exclude_assigned(suggested: Vec<User>, assigned: &[User]) -> Vec<User> {
    let assigned_ids: HashSet<i32> = assigned.iter().map(|u| u.id).collect();
    let mut seen = HashSet::with_capacity(suggested.len());

    suggested
        .into_iter()
        .filter(|u| !assigned_ids.contains(&u.id) && seen.insert(u.id))
        .collect()
}
