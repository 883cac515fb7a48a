use org_core::MembershipPolicy;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// `enroll` adds referenced non-members to the department, `strict`
    /// rejects the write
    pub membership_policy: MembershipPolicy,
}
