/*
[INPUT]:  GovernanceClient and resource DTOs
[OUTPUT]: Per-resource endpoint methods on GovernanceClient
[POS]:    API layer - one module per backend resource
[UPDATE]: When adding a resource module
*/

pub mod access_requests;
pub mod approval_workflows;
pub mod connectors;
pub mod correlation;
pub mod federation;
pub mod licenses;
pub mod lifecycle;
pub mod meta_roles;
pub mod nhi;
pub mod nhi_vault;
pub mod outliers;
pub mod peer_groups;
pub mod provisioning_scripts;
pub mod reconciliation;
pub mod scim_targets;
pub mod siem;
pub mod sod_rules;
pub mod users;
pub mod webhooks;
