// ABOUTME: CLI review commands - challenge reviews, my reviews, review deletion

use anyhow::Result;
use tracing::{error, info};

use super::util::{confirm, load_client, print_json, print_notice, truncate};
use super::{DeleteReviewArgs, OutputFormat, ReviewsArgs};
use crate::api::{MyReview, ReviewList};
use crate::error::{catch_server_error, ErrorNotice, PageProps};

/// Execute the reviews command
///
/// Page 0 is loaded like the challenge page (with credentials); later pages
/// are fetched anonymously like the "load more" button.
pub async fn execute(args: ReviewsArgs, format: OutputFormat) -> Result<()> {
    let client = load_client()?;
    let props = if args.page == 0 {
        catch_server_error(client.get_reviews(args.challenge_id)).await
    } else {
        catch_server_error(client.get_more_reviews(args.page, args.challenge_id)).await
    };

    match props {
        PageProps::Loaded(reviews) => match format {
            OutputFormat::Json => print_json(&reviews)?,
            OutputFormat::Text => output_reviews(&reviews, args.page),
        },
        PageProps::Failed(notice) => print_notice(&notice),
    }
    Ok(())
}

fn output_reviews(reviews: &ReviewList, page: u32) {
    if reviews.content.is_empty() {
        println!("No reviews yet.");
        return;
    }

    for review in &reviews.content {
        println!("{} · {}  {}", review.nickname, review.job_title, review.created_date);
        println!("  {}", review.content);
        println!();
    }
    if !reviews.is_last_page {
        println!("More reviews: --page {}", page + 1);
    }
}

/// Execute the my-reviews command
pub async fn my_reviews(format: OutputFormat) -> Result<()> {
    let client = load_client()?;
    match catch_server_error(client.get_my_reviews()).await {
        PageProps::Loaded(reviews) => match format {
            OutputFormat::Json => print_json(&reviews)?,
            OutputFormat::Text => output_my_reviews(&reviews),
        },
        PageProps::Failed(notice) => print_notice(&notice),
    }
    Ok(())
}

fn output_my_reviews(reviews: &[MyReview]) {
    if reviews.is_empty() {
        println!("You have not written any reviews.");
        return;
    }

    println!("{:<8} {:<30} {:<12} REVIEW", "ID", "CHALLENGE", "DATE");
    println!("{}", "-".repeat(80));
    for review in reviews {
        println!(
            "{:<8} {:<30} {:<12} {}",
            review.id,
            truncate(&review.challenge_title, 30),
            review.created_date,
            truncate(&review.context, 30)
        );
    }
}

/// Execute the delete-review command
pub async fn delete(args: DeleteReviewArgs) -> Result<()> {
    if !args.force && !confirm("남기신 후기를 삭제하시겠습니까?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let client = load_client()?;
    match client.delete_review(args.review_id).await {
        Ok(()) => {
            info!("Deleted review {}", args.review_id);
            println!("Review {} deleted.", args.review_id);
        }
        Err(e) => {
            error!("Failed to delete review {}: {}", args.review_id, e);
            print_notice(&ErrorNotice::from_api_error(&e));
        }
    }
    Ok(())
}
