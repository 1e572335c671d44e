// ABOUTME: Route definitions and the navigation seam used by page flows
// HistoryNavigator keeps an in-memory history stack for the CLI and tests

use async_trait::async_trait;
use std::fmt;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;
use url::form_urlencoded;

use crate::api::types::VerificationType;

/// Flag appended to the collection route after a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFlag {
    SuccessSubmission,
    DuplicateSubmission,
}

impl CollectionFlag {
    fn query_key(self) -> &'static str {
        match self {
            Self::SuccessSubmission => "successSubmission",
            Self::DuplicateSubmission => "duplicateSubmission",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Register,
    RegisterSuccess,
    ChallengeGroup {
        challenge_group_id: String,
    },
    VerificationCollection {
        challenge_group_id: String,
        verification_type: VerificationType,
        my_challenge_id: Option<String>,
        flag: Option<CollectionFlag>,
    },
}

impl Route {
    /// Path with query string, as pushed onto the history
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/home".to_string(),
            Self::Register => "/register".to_string(),
            Self::RegisterSuccess => "/register/success".to_string(),
            Self::ChallengeGroup { challenge_group_id } => {
                format!("/challenge/{challenge_group_id}")
            }
            Self::VerificationCollection {
                challenge_group_id,
                verification_type,
                my_challenge_id,
                flag,
            } => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                query.append_pair("type", verification_type.as_str());
                if let Some(id) = my_challenge_id {
                    query.append_pair("myChallengeId", id);
                }
                if let Some(flag) = flag {
                    query.append_pair(flag.query_key(), "true");
                }
                format!(
                    "/verification/collection/{challenge_group_id}?{}",
                    query.finish()
                )
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("No previous page in history")]
    NoHistory,
    #[error("Navigation rejected: {0}")]
    Rejected(String),
}

/// Page navigation. Failures are reported to the caller, which logs them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn push(&self, route: &Route) -> Result<(), NavigationError>;
    async fn replace(&self, route: &Route) -> Result<(), NavigationError>;
    async fn back(&self) -> Result<(), NavigationError>;
}

/// In-memory browser-style history
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that already contains the given pages, oldest first
    pub fn with_history(routes: &[Route]) -> Self {
        Self {
            entries: Mutex::new(routes.iter().map(Route::path).collect()),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.entries.lock().ok().and_then(|e| e.last().cloned())
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut Vec<String>) -> Result<T, NavigationError>,
    ) -> Result<T, NavigationError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| NavigationError::Rejected(e.to_string()))?;
        f(&mut entries)
    }
}

#[async_trait]
impl Navigator for HistoryNavigator {
    async fn push(&self, route: &Route) -> Result<(), NavigationError> {
        debug!("Navigate push {}", route);
        self.with_entries(|entries| {
            entries.push(route.path());
            Ok(())
        })
    }

    async fn replace(&self, route: &Route) -> Result<(), NavigationError> {
        debug!("Navigate replace {}", route);
        self.with_entries(|entries| {
            entries.pop();
            entries.push(route.path());
            Ok(())
        })
    }

    async fn back(&self) -> Result<(), NavigationError> {
        debug!("Navigate back");
        self.with_entries(|entries| {
            if entries.len() < 2 {
                return Err(NavigationError::NoHistory);
            }
            entries.pop();
            Ok(())
        })
    }
}
