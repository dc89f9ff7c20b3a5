use serde::{Deserialize, Serialize};

/// Header carrying the authenticated user id, set by the upstream authenticator.
pub const SUBJECT_ID_HEADER: &str = "x-subject-id";
/// Header carrying the authenticated user's role.
pub const SUBJECT_ROLE_HEADER: &str = "x-subject-role";

pub const ADMIN_ROLE: &str = "admin";

/// `SecurityContext` identifies who is making a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityContext {
    subject_id: Option<i64>,
    role: Option<String>,
}

impl SecurityContext {
    /// Context with no subject
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated user
    #[must_use]
    pub fn for_subject(subject_id: i64, role: Option<String>) -> Self {
        Self {
            subject_id: Some(subject_id),
            role,
        }
    }

    /// Build from the raw header values.
    ///
    /// A missing or non-numeric subject id yields an anonymous context; the
    /// role is ignored without a subject.
    #[must_use]
    pub fn from_header_values(subject_id: Option<&str>, role: Option<&str>) -> Self {
        let Some(raw) = subject_id else {
            return Self::anonymous();
        };
        match raw.trim().parse::<i64>() {
            Ok(id) => Self::for_subject(
                id,
                role.map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_owned),
            ),
            Err(_) => {
                tracing::warn!(subject_id = raw, "ignoring malformed subject id header");
                Self::anonymous()
            }
        }
    }

    #[must_use]
    pub fn subject_id(&self) -> Option<i64> {
        self.subject_id
    }

    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.subject_id.is_none()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        !self.is_anonymous() && self.role() == Some(ADMIN_ROLE)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_header_is_anonymous() {
        let ctx = SecurityContext::from_header_values(None, Some("admin"));
        assert!(ctx.is_anonymous());
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_malformed_id_is_anonymous() {
        let ctx = SecurityContext::from_header_values(Some("abc"), None);
        assert!(ctx.is_anonymous());
    }

    #[test]
    fn test_subject_with_role() {
        let ctx = SecurityContext::from_header_values(Some(" 7 "), Some("admin"));
        assert_eq!(ctx.subject_id(), Some(7));
        assert!(ctx.is_admin());
    }

    #[test]
    fn test_blank_role_dropped() {
        let ctx = SecurityContext::from_header_values(Some("7"), Some("  "));
        assert_eq!(ctx.role(), None);
        assert!(!ctx.is_admin());
    }
}
