// ABOUTME: Type definitions for the WAVED platform API

use serde::{Deserialize, Serialize};

/// How participants prove they did the challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerificationType {
    #[default]
    Text,
    Picture,
    Link,
}

impl VerificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Picture => "PICTURE",
            Self::Link => "LINK",
        }
    }

    /// Resolve a `type` query parameter; unknown or missing values mean TEXT
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("PICTURE") => Self::Picture,
            Some("LINK") => Self::Link,
            _ => Self::Text,
        }
    }
}

impl std::fmt::Display for VerificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChallengeGroup {
    pub group_title: String,
    pub description: String,
    pub thumbnail: String,
    pub verification_type: VerificationType,
    pub is_free: bool,
    pub participant_count: u32,
    pub start_date: String,
    pub end_date: String,
    /// Challenge that reviews are attached to
    pub challenge_id: Option<u64>,
}

/// Challenge group that is still accepting participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitingChallenge {
    pub challenge_group_id: u64,
    pub group_title: String,
    pub image_url: String,
    pub verification_type: VerificationType,
    pub is_free: bool,
    pub participant_count: u32,
    pub start_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChallengeReview {
    pub review_id: u64,
    pub nickname: String,
    pub job_title: String,
    pub content: String,
    pub created_date: String,
}

/// One page of challenge reviews
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewList {
    pub content: Vec<ChallengeReview>,
    pub is_last_page: bool,
}

/// A review written by the signed-in member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyReview {
    pub id: u64,
    pub challenge_title: String,
    pub created_date: String,
    pub context: String,
}

/// Question answered by TEXT verifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// One part of a multipart verification form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}
