//! Walk one order through every step of the form and print the message

use cakeform::prelude::*;
use tracing_subscriber::EnvFilter;

/// Pretends to look at the photo and always sees a heart
struct HeartAnalyzer;

#[async_trait]
impl ImageAnalyzer for HeartAnalyzer {
    async fn analyze(&self, _image: &ImageUpload) -> Result<AnalysisSuggestion> {
        AnalysisSuggestion::from_json(
            r##"{"shape": "Heart", "hexColor": "#F472B6", "description": "Růžové srdce."}"##,
        )
    }
}

fn show(session: &OrderSession) {
    let order = session.order();
    println!(
        "   {} | {} | {} patra: {}",
        session.step(),
        order.shape,
        order.tier_count.get(),
        order.tiers.joined(" / ")
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🎂 Cakeform walkthrough\n");

    let mut session = OrderSession::with_defaults()?;
    show(&session);

    // Step 1: photo, shape and tiers
    let photo = ImageUpload::new("image/jpeg", vec![0xFF, 0xD8, 0xFF]).with_file_name("vzor.jpg");
    session
        .add_images_and_analyze(vec![photo], &HeartAnalyzer)
        .await?;
    if let Some(hint) = session.analysis_hint() {
        println!("💡 Hint: {:?}", hint.description);
    }
    session.apply_tier_count_change(TierCount::TWO);
    show(&session);
    session.next_step()?;

    // Step 2: flavor and surface, first attempt is incomplete
    session.apply_update(
        OrderUpdate::new()
            .filling(Filling::MangoPassion)
            .sponge(Sponge::Vanilla)
            .surface(SurfaceFinish::CreamWithDrip)
            .cream_color(PaletteColor::Pink),
    )?;
    if let Err(e) = session.next_step() {
        println!("⚠️  {}", e.to_prompt().message);
    }
    session.apply_update(OrderUpdate::new().drip_style(DripStyle::WhiteChocolate))?;
    session.next_step()?;

    // Step 3: details
    session.apply_update(OrderUpdate::new().inscription("Pro Aničku").quantity(1))?;
    session.next_step()?;

    // Step 4: pickup
    let today = chrono::Local::now().date_naive();
    let date = session.earliest_pickup_date(today);
    session.select_pickup_date(date, today)?;
    session.apply_update(OrderUpdate::new().pickup_location("pist"))?;
    session.next_step()?;
    show(&session);

    // Step 5: contact and submit
    session.apply_update(OrderUpdate::new().contact(
        "Anna Dvořáková",
        "+420 602 000 000",
        "anna@example.cz",
    ))?;
    let message = session.submit()?;

    println!("\n📧 To: {}", message.recipient);
    println!("   Subject: {}\n", message.subject);
    println!("{}", message.body);

    Ok(())
}
