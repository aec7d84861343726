//! Role policy
//!
//! Every POS route is open to floor staff and above. Finer permissions are
//! decided by the login service when it issues the token.

/// Roles accepted on `/pos/*`
pub const POS_ROLES: &[&str] = &["staff", "manager", "owner"];

/// Case-insensitive role check
pub fn is_pos_role(role: &str) -> bool {
    POS_ROLES.iter().any(|r| r.eq_ignore_ascii_case(role.trim()))
}
