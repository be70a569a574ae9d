//! Sample data seeding for local development.
//!
//! Populates the catalog and the home-page content sections so both
//! services have something to show on a fresh database. Refuses to run
//! against a database that already has products.

use rust_decimal::Decimal;

use apexdrive_admin::db::categories::CategoryInput;
use apexdrive_admin::db::content::{
    BrandStoryInput, CategoryTileInput, HeroSlideInput, HighlightInput, LogoInput, ShowcaseInput,
};
use apexdrive_admin::db::products::ProductInput;
use apexdrive_admin::db::{self, CategoryRepository, ContentRepository, ProductRepository};

use super::{CommandError, database_url};

/// Seed the database with sample catalog and home-page content.
///
/// # Errors
///
/// Returns an error if the database is unreachable, already seeded, or a
/// write fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let products = ProductRepository::new(&pool);
    if products.count().await? > 0 {
        return Err(CommandError::Invalid(
            "database already contains products; refusing to seed".into(),
        ));
    }

    let categories = CategoryRepository::new(&pool);
    tracing::info!("Seeding categories...");
    for input in sample_categories() {
        categories.create(input).await?;
    }

    tracing::info!("Seeding products...");
    for input in sample_products() {
        products.create(input).await?;
    }

    let content = ContentRepository::new(&pool);
    tracing::info!("Seeding home-page content...");
    for input in sample_hero_slides() {
        content.create_hero_slide(input).await?;
    }
    for input in sample_highlights() {
        content.create_highlight(input).await?;
    }
    for input in sample_category_tiles() {
        content.create_category_tile(input).await?;
    }

    content
        .upsert_showcase(ShowcaseInput {
            heading: "Built for the road ahead".into(),
            tagline: "New season, new setup".into(),
            body: "Our latest drop covers everything from trunk organizers to \
                   track-day phone mounts. Fitment-checked for the models you \
                   actually drive."
                .into(),
            image_url: "/seed/showcase.jpg".into(),
            cta_label: "Shop the drop".into(),
            cta_href: "/products?sort=newest".into(),
            text_color: "#ffffff".into(),
            enabled: true,
        })
        .await?;

    content
        .upsert_brand_story(BrandStoryInput {
            heading: "Why Apex Drive".into(),
            body: "We started in a two-car garage, annoyed that every accessory \
                   either rattled, faded, or didn't fit. Everything we sell is \
                   tested in our own daily drivers first."
                .into(),
            image_url: "/seed/brand-story.jpg".into(),
            enabled: true,
        })
        .await?;

    content
        .upsert_logo(LogoInput {
            logo_url: "/seed/logo.svg".into(),
            alt_text: "Apex Drive".into(),
            width_px: 160,
            show_wordmark: true,
        })
        .await?;

    tracing::info!("Seed complete!");
    Ok(())
}

fn sample_categories() -> Vec<CategoryInput> {
    [
        ("Interior", "/seed/categories/interior.jpg"),
        ("Exterior", "/seed/categories/exterior.jpg"),
        ("Electronics", "/seed/categories/electronics.jpg"),
        ("Care & Detailing", "/seed/categories/care.jpg"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, image_url))| CategoryInput {
        name: name.into(),
        image_url: image_url.into(),
        sort_order: i32::try_from(i).unwrap_or(0),
        enabled: true,
    })
    .collect()
}

fn sample_products() -> Vec<ProductInput> {
    vec![
        ProductInput {
            name: "All-Weather Floor Mat Set".into(),
            description: "Laser-measured rubber mats with raised edges. Traps \
                          mud, snow, and coffee spills; hose off and done."
                .into(),
            price: Decimal::new(8900, 2),
            discount_price: Some(Decimal::new(7400, 2)),
            category: "Interior".into(),
            vehicle_model: Some("Toyota RAV4 2019-2025".into()),
            images: vec!["/seed/products/floor-mats-1.jpg".into()],
            stock: 42,
            is_new: false,
            is_featured: true,
        },
        ProductInput {
            name: "Magnetic Phone Mount".into(),
            description: "Vent-mounted MagSafe-compatible holder rated for \
                          rough roads. One-hand dock, zero wobble."
                .into(),
            price: Decimal::new(3450, 2),
            discount_price: None,
            category: "Electronics".into(),
            vehicle_model: None,
            images: vec!["/seed/products/phone-mount-1.jpg".into()],
            stock: 120,
            is_new: true,
            is_featured: true,
        },
        ProductInput {
            name: "Trunk Organizer Pro".into(),
            description: "Collapsible three-compartment organizer with \
                          non-slip base and insulated cooler pocket."
                .into(),
            price: Decimal::new(5200, 2),
            discount_price: None,
            category: "Interior".into(),
            vehicle_model: None,
            images: vec!["/seed/products/trunk-organizer-1.jpg".into()],
            stock: 64,
            is_new: false,
            is_featured: false,
        },
        ProductInput {
            name: "Ceramic Spray Coating".into(),
            description: "Six months of gloss and beading from a ten-minute \
                          spray-on application. Safe on paint, trim, and wheels."
                .into(),
            price: Decimal::new(2899, 2),
            discount_price: Some(Decimal::new(2399, 2)),
            category: "Care & Detailing".into(),
            vehicle_model: None,
            images: vec!["/seed/products/ceramic-spray-1.jpg".into()],
            stock: 200,
            is_new: true,
            is_featured: false,
        },
        ProductInput {
            name: "LED Fog Light Kit".into(),
            description: "Plug-and-play 6000K fog lights with CAN bus \
                          compatibility. No flicker, no error codes."
                .into(),
            price: Decimal::new(11900, 2),
            discount_price: None,
            category: "Exterior".into(),
            vehicle_model: Some("Honda Civic 2022-2025".into()),
            images: vec!["/seed/products/fog-lights-1.jpg".into()],
            stock: 3,
            is_new: false,
            is_featured: false,
        },
    ]
}

fn sample_hero_slides() -> Vec<HeroSlideInput> {
    vec![
        HeroSlideInput {
            title: "Gear up for every drive".into(),
            subtitle: "Accessories tested in our own daily drivers".into(),
            image_url: "/seed/hero/drive.jpg".into(),
            cta_label: "Shop now".into(),
            cta_href: "/products".into(),
            text_color: "#ffffff".into(),
            overlay_color: "#000000".into(),
            overlay_opacity: 0.4,
            sort_order: 0,
            enabled: true,
        },
        HeroSlideInput {
            title: "Winter-ready interiors".into(),
            subtitle: "Floor mats and seat covers built for the season".into(),
            image_url: "/seed/hero/winter.jpg".into(),
            cta_label: "Browse interior".into(),
            cta_href: "/products?category=Interior".into(),
            text_color: "#ffffff".into(),
            overlay_color: "#0a1f44".into(),
            overlay_opacity: 0.5,
            sort_order: 1,
            enabled: true,
        },
    ]
}

fn sample_highlights() -> Vec<HighlightInput> {
    vec![
        HighlightInput {
            title: "Free shipping over $50".into(),
            body: "Orders ship within one business day.".into(),
            icon: "truck".into(),
            image_url: String::new(),
            accent_color: "#e10600".into(),
            sort_order: 0,
            enabled: true,
        },
        HighlightInput {
            title: "Fitment guaranteed".into(),
            body: "Doesn't fit? Return it on us.".into(),
            icon: "shield-check".into(),
            image_url: String::new(),
            accent_color: "#e10600".into(),
            sort_order: 1,
            enabled: true,
        },
        HighlightInput {
            title: "Real support".into(),
            body: "Talk to people who actually install this stuff.".into(),
            icon: "headset".into(),
            image_url: String::new(),
            accent_color: "#e10600".into(),
            sort_order: 2,
            enabled: true,
        },
    ]
}

fn sample_category_tiles() -> Vec<CategoryTileInput> {
    [
        ("Interior", "Interior", "/seed/tiles/interior.jpg"),
        ("Exterior", "Exterior", "/seed/tiles/exterior.jpg"),
        ("Electronics", "Electronics", "/seed/tiles/electronics.jpg"),
        ("Care & Detailing", "Care & Detailing", "/seed/tiles/care.jpg"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (label, category, image_url))| CategoryTileInput {
        label: label.into(),
        category: category.into(),
        image_url: image_url.into(),
        brightness_percent: 90,
        grayscale_percent: 0,
        text_align: "center".into(),
        sort_order: i32::try_from(i).unwrap_or(0),
        enabled: true,
    })
    .collect()
}
