// ABOUTME: WAVED platform API integration
// Request wrappers for challenges, reviews, members and verifications

pub mod client;
pub mod member;
pub mod types;
pub mod verification;

pub use client::WavedApiClient;
pub use member::MemberApi;
pub use types::{
    ApiMessage, ChallengeGroup, ChallengeReview, FormField, MyReview, Quiz, RecruitingChallenge,
    ReviewList, VerificationType,
};
pub use verification::VerificationApi;
