//! Publish command

use colored::Colorize;

use crate::cli::PublishArgs;
use crate::errors::Result;
use crate::services::publisher::{PublishRequest, PublisherService};
use crate::storage::{CITIES, ClientProfile};

pub async fn publish_profile(publisher: &PublisherService, args: PublishArgs) -> Result<()> {
    if let Some(ref city) = args.city
        && !CITIES.contains(&city.as_str())
    {
        println!(
            "{} City '{}' is not in the admin form's list; storing it anyway",
            "⚠".bold().yellow(),
            city.yellow()
        );
    }

    let profile = ClientProfile {
        name: args.name,
        logo: args.logo,
        phone: args.phone,
        whatsapp: args.whatsapp,
        maps: args.maps,
        facebook: args.facebook,
        instagram: args.instagram,
        tiktok: args.tiktok,
        snapchat: args.snapchat,
        city: args.city,
    };

    let published = publisher
        .publish(PublishRequest {
            slug: args.slug,
            profile,
        })
        .await?;

    println!(
        "{} Published profile under slug: {}",
        "✓".bold().green(),
        published.slug.cyan()
    );
    println!(
        "{} Share link: {}",
        "ℹ".bold().blue(),
        published.url.blue().underline()
    );

    Ok(())
}
