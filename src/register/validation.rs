// ABOUTME: Input validation predicates shared by the registration wizard and its front-ends
// Pure functions only, so a renderer can disable controls without re-deriving rules

use url::Url;

/// Maximum nickname length, counted in characters
pub const NICKNAME_MAX_CHARS: usize = 10;

/// Outcome of checking a nickname against the registration rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NicknameValidity {
    Empty,
    TooLong,
    Valid,
}

impl NicknameValidity {
    /// Message shown next to the nickname input
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Nickname is required",
            Self::TooLong => "Nickname must be 10 characters or fewer",
            Self::Valid => "Nickname is available",
        }
    }
}

/// Classify a nickname.
///
/// This is the only nickname rule in the crate: the step 3 guard and any
/// input widget both call it.
pub fn nickname_validity(nickname: &str) -> NicknameValidity {
    if nickname.is_empty() {
        NicknameValidity::Empty
    } else if nickname.chars().count() > NICKNAME_MAX_CHARS {
        NicknameValidity::TooLong
    } else {
        NicknameValidity::Valid
    }
}

pub fn is_nickname_valid(nickname: &str) -> bool {
    nickname_validity(nickname) == NicknameValidity::Valid
}

/// Four ASCII digits, e.g. "1995"
pub fn is_birth_year_valid(birth_year: &str) -> bool {
    birth_year.len() == 4 && birth_year.bytes().all(|b| b.is_ascii_digit())
}

/// Absolute http(s) URL with a host
pub fn is_valid_link(link: &str) -> bool {
    match Url::parse(link.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
