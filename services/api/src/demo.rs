use crate::infra::{
    InMemoryKycRepository, InMemoryListingRepository, InMemoryNotificationPublisher,
};
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use homestead::config::ModerationConfig;
use homestead::error::AppError;
use homestead::workflows::actor::Actor;
use homestead::workflows::kyc::{DocumentType, KycRequest, KycService, UserId, VerificationSnapshot};
use homestead::workflows::listings::import::submissions_from_reader;
use homestead::workflows::listings::{ListingQuery, ListingService, MarketStatus};

#[derive(Args, Debug)]
pub(crate) struct ImportCheckArgs {
    /// Path to a listings CSV export
    #[arg(long)]
    pub(crate) file: PathBuf,
}

/// Validate a CSV export without writing anything, for pre-flight checks
/// before an admin runs the real import.
pub(crate) fn run_import_check(args: ImportCheckArgs) -> Result<(), AppError> {
    let file = File::open(&args.file)?;
    let submissions = submissions_from_reader(BufReader::new(file))?;

    println!(
        "{} listing(s) parsed from {}",
        submissions.len(),
        args.file.display()
    );
    for submission in &submissions {
        println!(
            "  - '{}' in {} ({})",
            submission.details.title,
            submission.details.city,
            submission.details.kind.label()
        );
    }

    Ok(())
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// City used for the public search step (defaults to Pokhara).
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// User id walked through the KYC portion of the demo.
    #[arg(long)]
    pub(crate) user: Option<String>,
    /// Skip the KYC and trust-score portion of the demo.
    #[arg(long)]
    pub(crate) skip_kyc: bool,
}

const SEED_CSV: &str = "\
Owner,Title,Kind,City,Address,Price,Bedrooms,Bathrooms,Area,Furnished,Description
own-1,Sunny Bungalow,house,Pokhara,Lakeside Road 12,14500000,3,2,1800,yes,Detached bungalow with a garden
own-2,City Flat,flat,Kathmandu,Baluwatar 4,9800000,2,1,950,no,Second-floor apartment
own-1,Riverside Plot,land,Chitwan,,4200000,0,0,6000,no,South-facing plot near the highway
";

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { city, user, skip_kyc } = args;

    let city = city.unwrap_or_else(|| "Pokhara".to_string());
    let user = user.unwrap_or_else(|| "usr-9".to_string());
    let admin = Actor::Admin;

    println!(
        "Homestead marketplace demo ({})",
        chrono::Local::now().date_naive()
    );

    let moderation = ModerationConfig { queue_page_size: 50 };
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let listings = ListingService::new(
        Arc::new(InMemoryListingRepository::default()),
        notifier.clone(),
        moderation.clone(),
    );

    println!("\nListing intake (CSV seed)");
    let seeded = match listings.import(&admin, SEED_CSV.as_bytes()) {
        Ok(records) => records,
        Err(err) => {
            println!("  Seed import failed: {}", err);
            return Ok(());
        }
    };
    for record in &seeded {
        println!(
            "- {} '{}' in {} -> {}",
            record.id.0,
            record.details.title,
            record.details.city,
            record.status.label()
        );
    }

    println!("\nModeration pass");
    let (first, second) = (&seeded[0], &seeded[1]);
    match listings.approve(&admin, &first.id) {
        Ok(record) => println!(
            "- Approved {} -> market status {}",
            record.id.0,
            record.market_status.label()
        ),
        Err(err) => println!("  Approval failed: {}", err),
    }
    match listings.reject(&admin, &second.id) {
        Ok(record) => println!("- Rejected {}", record.id.0),
        Err(err) => println!("  Rejection failed: {}", err),
    }

    let query = ListingQuery {
        city: Some(city.clone()),
        ..ListingQuery::default()
    };
    match listings.search(&query) {
        Ok(results) => {
            println!("\nPublic search for '{}': {} hit(s)", city, results.len());
            for record in &results {
                let summary = record.summary();
                println!(
                    "  - {} '{}' at {} ({})",
                    summary.id.0, summary.title, summary.price, summary.market_status
                );
            }
        }
        Err(err) => println!("  Search unavailable: {}", err),
    }

    match listings.set_market_status(&admin, &first.id, MarketStatus::OnHold) {
        Ok(record) => println!(
            "\nMarket update: {} is now {}",
            record.id.0,
            record.market_status.label()
        ),
        Err(err) => println!("  Market update failed: {}", err),
    }

    match listings.restore(&admin, &second.id) {
        Ok(record) => println!(
            "Restore: {} returned to the queue ({})",
            record.id.0,
            record.status.label()
        ),
        Err(err) => println!("  Restore failed: {}", err),
    }

    if skip_kyc {
        return Ok(());
    }

    println!("\nKYC verification for {user}");
    let kyc = KycService::new(
        Arc::new(InMemoryKycRepository::default()),
        notifier.clone(),
        moderation,
    );
    let user_id = UserId(user.clone());
    let request = KycRequest {
        user_id: user_id.clone(),
        document_type: Some(DocumentType::Citizenship),
        front_image_url: Some("https://img.example/kyc/front.jpg".to_string()),
        back_image_url: Some("https://img.example/kyc/back.jpg".to_string()),
    };

    if let Err(err) = kyc.submit(request.clone()) {
        println!("  Submission rejected: {}", err);
        return Ok(());
    }
    println!("- Documents submitted (citizenship, both faces)");

    match kyc.reject(&admin, &user_id, "blurry image".to_string()) {
        Ok(record) => println!(
            "- Reviewer rejected: {}",
            record.rejection_reason.as_deref().unwrap_or("no reason")
        ),
        Err(err) => println!("  Rejection failed: {}", err),
    }

    if let Err(err) = kyc.submit(request) {
        println!("  Resubmission rejected: {}", err);
        return Ok(());
    }
    println!("- Resubmitted with fresh images; reason cleared");

    if let Err(err) = kyc.approve(&admin, &user_id) {
        println!("  Approval failed: {}", err);
        return Ok(());
    }
    println!("- Reviewer approved the resubmission");

    let snapshot = VerificationSnapshot {
        email_verified: true,
        phone_verified: true,
        has_profile_photo: false,
        open_reports: 0,
    };
    match kyc.trust_score(&user_id, snapshot) {
        Ok(score) => {
            println!("\nTrust score for {user}: {}", score.total);
            for component in &score.components {
                let mark = if component.satisfied { "+" } else { " " };
                println!("  [{mark}] {} ({})", component.factor, component.weight);
            }
        }
        Err(err) => println!("  Trust score unavailable: {}", err),
    }

    println!("\nNotices dispatched: {}", notifier.events().len());
    for notice in notifier.events() {
        println!("  - {} -> {}", notice.template, notice.recipient);
    }

    Ok(())
}
