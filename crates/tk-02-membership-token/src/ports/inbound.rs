//! # Inbound Port - MembershipTokenApi
//!
//! ## Authorization
//!
//! | Method | Authorized Caller |
//! |--------|-------------------|
//! | `issue_memberships` | issue controllers |
//! | `revoke_memberships` | issue controllers |
//! | `update_issue_controller` | issue controllers |
//! | `accept_membership`, `decline_membership` | the affected principal (the caller) |
//! | reads | any principal |

use shared_types::Principal;

use crate::domain::MembershipError;
use crate::ipc::payloads::*;

/// Call surface of a membership token.
pub trait MembershipTokenApi: Send + Sync {
    /// Offers membership to every listed NonMember.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not an issue controller
    fn issue_memberships(
        &mut self,
        caller: &Principal,
        request: IssueMembershipsRequest,
    ) -> Result<MembershipUpdateResponse, MembershipError>;

    /// Accepts the caller's pending membership.
    ///
    /// # Errors
    /// - `NotPendingMember`: the caller has nothing to accept
    fn accept_membership(&mut self, caller: &Principal) -> Result<MembershipUpdateResponse, MembershipError>;

    /// Gives up the caller's pending or active membership.
    ///
    /// # Errors
    /// - `NotAMember`: the caller holds no membership
    fn decline_membership(&mut self, caller: &Principal) -> Result<MembershipUpdateResponse, MembershipError>;

    /// Withdraws every listed pending or active membership.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not an issue controller
    fn revoke_memberships(
        &mut self,
        caller: &Principal,
        request: RevokeMembershipsRequest,
    ) -> Result<MembershipUpdateResponse, MembershipError>;

    /// Replaces the issue controller set. An empty set locks issuing and
    /// revoking forever.
    ///
    /// # Errors
    /// - `Unauthorized`: caller is not an issue controller
    fn update_issue_controller(
        &mut self,
        caller: &Principal,
        request: UpdateControllerRequest,
    ) -> Result<UpdateControllerResponse, MembershipError>;

    fn get_controllers(&self) -> GetControllersResponse;

    fn is_member(&self, request: IsMemberRequest) -> IsMemberResponse;

    fn is_pending_member(&self, request: IsMemberRequest) -> IsMemberResponse;

    fn get_total_members(&self) -> GetTotalMembersResponse;
}
