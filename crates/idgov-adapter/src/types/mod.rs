/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new resource types added
*/

pub mod access_requests;
pub mod approval_workflows;
pub mod common;
pub mod connectors;
pub mod correlation;
pub mod federation;
pub mod licenses;
pub mod lifecycle;
pub mod meta_roles;
pub mod nhi;
pub mod outliers;
pub mod peer_groups;
pub mod provisioning_scripts;
pub mod reconciliation;
pub mod scim_targets;
pub mod siem;
pub mod sod_rules;
pub mod users;
pub mod webhooks;

pub use access_requests::*;
pub use approval_workflows::*;
pub use common::*;
pub use connectors::*;
pub use correlation::*;
pub use federation::*;
pub use licenses::*;
pub use lifecycle::*;
pub use meta_roles::*;
pub use nhi::*;
pub use outliers::*;
pub use peer_groups::*;
pub use provisioning_scripts::*;
pub use reconciliation::*;
pub use scim_targets::*;
pub use siem::*;
pub use sod_rules::*;
pub use users::*;
pub use webhooks::*;
