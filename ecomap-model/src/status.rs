use crate::ids::{FacilityId, StatusId, UserId};

/// A user-authored note attached to a facility.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusComment {
    pub id: StatusId,
    #[cfg_attr(feature = "serde", serde(rename = "facilityId"))]
    pub facility_id: FacilityId,
    #[cfg_attr(feature = "serde", serde(rename = "userId"))]
    pub author_id: UserId,
    #[cfg_attr(feature = "serde", serde(rename = "username", default))]
    pub author_name: String,
    #[cfg_attr(feature = "serde", serde(rename = "statuscomment"))]
    pub text: String,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "crate::serde_helpers::opt_timestamp"
        )
    )]
    pub created_at: Option<chrono::NaiveDateTime>,
}

/// Body of a successful `POST /api/status/add`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSubmitted {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<StatusComment>,
}

/// Body of a successful `POST /api/status/update`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusUpdated {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: Option<String>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn decodes_comment_with_mysql_timestamp() {
        let raw = r#"{
            "id": "5",
            "facilityId": 14,
            "userId": "2",
            "username": "alice",
            "statuscomment": "Bins emptied",
            "created_at": "2024-03-01 09:15:00"
        }"#;

        let comment: StatusComment = serde_json::from_str(raw).unwrap();
        assert_eq!(comment.id, StatusId(5));
        assert_eq!(comment.author_id, UserId(2));
        assert_eq!(comment.text, "Bins emptied");
        assert_eq!(
            comment.created_at.map(|ts| ts.to_string()).as_deref(),
            Some("2024-03-01 09:15:00")
        );
    }

    #[test]
    fn timestamp_is_optional() {
        let raw = r#"{"id":1,"facilityId":1,"userId":1,"statuscomment":"ok"}"#;
        let comment: StatusComment = serde_json::from_str(raw).unwrap();
        assert!(comment.created_at.is_none());
        assert!(comment.author_name.is_empty());
    }
}
