use crate::ids::UserId;
use crate::status::StatusComment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    #[default]
    Guest,
    User,
    Manager,
}

/// Authentication context used when rendering popups and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewer {
    pub user_id: Option<UserId>,
    pub role: Role,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            role: Role::User,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// Whether the edit control is rendered for `comment`.
    ///
    /// Only the author sees it; managers may still edit through the API.
    pub fn can_edit(&self, comment: &StatusComment) -> bool {
        self.user_id == Some(comment.author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{FacilityId, StatusId};

    fn comment_by(author: u64) -> StatusComment {
        StatusComment {
            id: StatusId(1),
            facility_id: FacilityId(1),
            author_id: UserId(author),
            author_name: "someone".into(),
            text: "hello".into(),
            created_at: None,
        }
    }

    #[test]
    fn only_author_gets_edit_affordance() {
        let viewer = Viewer::user(UserId(7));
        assert!(viewer.can_edit(&comment_by(7)));
        assert!(!viewer.can_edit(&comment_by(8)));
        assert!(!Viewer::anonymous().can_edit(&comment_by(7)));
    }
}
