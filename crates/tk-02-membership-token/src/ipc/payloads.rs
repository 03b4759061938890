//! Request and response payloads of the membership token calls.

use serde::{Deserialize, Serialize};
use shared_types::Principal;

use crate::domain::MembershipControllers;

pub use shared_types::{UpdateControllerRequest, UpdateControllerResponse};

/// Body of `issue_memberships`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMembershipsRequest {
    pub principals: Vec<Principal>,
}

/// Body of `revoke_memberships`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeMembershipsRequest {
    pub principals: Vec<Principal>,
}

/// Answer to the state-changing membership calls.
///
/// `changed` counts the principals that actually moved; no-op entries are
/// not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipUpdateResponse {
    #[serde(default)]
    pub changed: usize,
}

/// Body of `is_member` and `is_pending_member`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsMemberRequest {
    pub prin: Principal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsMemberResponse {
    pub is_member: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTotalMembersResponse {
    pub total_members: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetControllersResponse {
    pub controllers: MembershipControllers,
}
