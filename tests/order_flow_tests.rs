//! End-to-end scenarios through an order session

use cakeform::prelude::*;
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn photo() -> ImageUpload {
    ImageUpload::new("image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]).with_file_name("dort.jpg")
}

/// A session walked up to the summary step with a valid cake
fn session_at_summary() -> OrderSession {
    let mut session = OrderSession::with_defaults().unwrap();

    session.apply_tier_count_change(TierCount::TWO);
    session.next_step().unwrap();

    session
        .apply_update(
            OrderUpdate::new()
                .filling(Filling::Pistachio)
                .sponge(Sponge::Chocolate)
                .surface(SurfaceFinish::Marzipan)
                .marzipan_color(PaletteColor::Blue),
        )
        .unwrap();
    session.next_step().unwrap();

    session
        .apply_update(
            OrderUpdate::new()
                .inscription("Všechno nejlepší, Petře!")
                .specifications("Bez ořechů prosím.")
                .quantity(2),
        )
        .unwrap();
    session.next_step().unwrap();

    session
        .apply_update(OrderUpdate::new().pickup_location("ostrava"))
        .unwrap();
    let date = session.earliest_pickup_date(today());
    session.select_pickup_date(date, today()).unwrap();
    assert_eq!(session.next_step().unwrap(), Step::Summary);

    session
}

// =============================================================================
// Design step
// =============================================================================

mod design_tests {
    use super::*;

    #[test]
    fn test_round_three_tiers_then_bottom_change() {
        let mut session = OrderSession::with_defaults().unwrap();
        session.apply_shape_change(Shape::Round);
        session.apply_tier_count_change(TierCount::THREE);
        assert_eq!(session.order().tiers.joined(" / "), "26 / 24 / 22");

        session.apply_tier_size_change(0, SizeToken::diameter(18)).unwrap();
        assert_eq!(session.order().tiers.joined(" / "), "18 / 16 / 14");
        assert_eq!(session.available_options(2), vec![SizeToken::diameter(14)]);
    }

    #[test]
    fn test_custom_rectangle_note_lifecycle() {
        let mut session = OrderSession::with_defaults().unwrap();
        session.apply_shape_change(Shape::Rectangle);
        session.apply_tier_size_change(0, SizeToken::Custom).unwrap();
        session
            .apply_update(OrderUpdate::new().custom_size_note("55x35"))
            .unwrap();

        // Unrelated edits keep the note
        session
            .apply_update(OrderUpdate::new().filling(Filling::Cherry))
            .unwrap();
        assert_eq!(session.order().custom_size_note.as_deref(), Some("55x35"));
        assert!(session.order().tiers.contains_custom());

        session.apply_shape_change(Shape::Square);
        assert!(session.order().custom_size_note.is_none());
        assert!(!session.order().tiers.contains_custom());
    }

    #[test]
    fn test_size_from_other_shape_is_rejected() {
        let mut session = OrderSession::with_defaults().unwrap();
        session.apply_shape_change(Shape::Heart);

        let err = session
            .apply_tier_size_change(0, SizeToken::diameter(26))
            .unwrap_err();
        assert_eq!(err.error_code(), "SIZE_NOT_OFFERED");
        assert_eq!(session.order().tiers.joined(" / "), "24");
    }

    #[test]
    fn test_upper_tier_cannot_outgrow_lower() {
        let mut session = OrderSession::with_defaults().unwrap();
        session.apply_tier_count_change(TierCount::THREE);
        assert_eq!(session.order().tiers.joined(" / "), "24 / 22 / 18");

        let err = session
            .apply_tier_size_change(1, SizeToken::diameter(26))
            .unwrap_err();
        assert_eq!(err.error_code(), "SIZE_NOT_OFFERED");
        assert_eq!(session.order().tiers.joined(" / "), "24 / 22 / 18");
        assert!(session.order().tiers.is_monotonic_for(Shape::Round));
    }

    #[test]
    fn test_image_cap() {
        let previews = Arc::new(InMemoryPreviewStore::new());
        let mut session =
            OrderSession::new(FormConfig::default_config(), previews.clone()).unwrap();

        let added = session.add_images((0..7).map(|_| photo()).collect()).unwrap();
        assert_eq!(added.len(), 5);
        assert_eq!(session.order().images.len(), 5);
        assert!(session.add_images(vec![photo()]).unwrap().is_empty());

        let url = session.order().images[0].preview_url.clone();
        assert!(previews.is_live(&url));
        session.remove_image(added[0]).unwrap();
        assert!(!previews.is_live(&url));
        assert_eq!(session.add_images(vec![photo()]).unwrap().len(), 1);
    }
}

// =============================================================================
// Surface step
// =============================================================================

mod surface_tests {
    use super::*;

    #[test]
    fn test_drip_without_style_blocks_step() {
        let mut session = OrderSession::with_defaults().unwrap();
        session.next_step().unwrap();
        session
            .apply_update(
                OrderUpdate::new()
                    .surface(SurfaceFinish::CreamWithDrip)
                    .cream_color("Bílá".parse().unwrap()),
            )
            .unwrap();

        let err = session.next_step().unwrap_err();
        assert_eq!(err.error_code(), "SURFACE_INCOMPLETE");
        assert!(err.user_message().contains("stékání"));
        assert_eq!(session.step(), Step::FlavorAndSurface);
    }

    #[test]
    fn test_edible_print_needs_print_image() {
        let mut session = OrderSession::with_defaults().unwrap();
        session
            .apply_update(OrderUpdate::new().surface(SurfaceFinish::EdiblePrint))
            .unwrap();

        let verdict = session.validate_for_step(Step::FlavorAndSurface);
        assert!(!verdict.passed);

        session.set_print_image(photo()).unwrap();
        assert!(session.validate_for_step(Step::FlavorAndSurface).passed);

        session.remove_print_image().unwrap();
        assert!(!session.validate_for_step(Step::FlavorAndSurface).passed);
    }

    #[test]
    fn test_other_surface_needs_note() {
        let mut session = OrderSession::with_defaults().unwrap();
        session
            .apply_update(OrderUpdate::new().surface(SurfaceFinish::Other).surface_note("  "))
            .unwrap();
        assert!(!session.validate_for_step(Step::FlavorAndSurface).passed);

        session
            .apply_update(OrderUpdate::new().surface_note("Zlaté hvězdičky"))
            .unwrap();
        assert!(session.validate_for_step(Step::FlavorAndSurface).passed);
    }

    #[test]
    fn test_finish_switch_keeps_colors() {
        let mut session = OrderSession::with_defaults().unwrap();
        session
            .apply_update(OrderUpdate::new().cream_color(PaletteColor::Pink))
            .unwrap();
        session
            .apply_update(OrderUpdate::new().surface(SurfaceFinish::Marzipan))
            .unwrap();
        session
            .apply_update(OrderUpdate::new().surface(SurfaceFinish::CreamWithDrip))
            .unwrap();

        assert_eq!(
            session.order().surface_attributes.cream_color,
            Some(PaletteColor::Pink)
        );
    }
}

// =============================================================================
// Pickup and submission
// =============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_pickup_step_needs_date() {
        let session = OrderSession::with_defaults().unwrap();
        let verdict = session.validate_for_step(Step::Pickup);
        assert!(!verdict.passed);
        assert_eq!(
            verdict.message.as_deref(),
            Some("Vyberte prosím datum vyzvednutí.")
        );
    }

    #[test]
    fn test_holiday_and_lead_time() {
        let mut session = OrderSession::with_defaults().unwrap();
        let christmas = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
        assert!(session.calendar().is_holiday(christmas));
        assert!(session.select_pickup_date(christmas, today()).is_err());

        let tomorrow = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let err = session.select_pickup_date(tomorrow, today()).unwrap_err();
        assert!(err.user_message().contains("26. 10. 2026"));

        // Lead time ends on a working day
        assert_eq!(
            session.earliest_pickup_date(today()),
            NaiveDate::from_ymd_opt(2026, 10, 26).unwrap()
        );
    }

    #[test]
    fn test_submit_without_contact_names_all_fields() {
        let session = session_at_summary();
        let err = session.submit().unwrap_err();

        assert_eq!(err.error_code(), "CONTACT_MISSING");
        let message = err.user_message();
        for label in ["Jméno", "Telefon", "Email"] {
            assert!(message.contains(label), "{message}");
        }
    }

    #[test]
    fn test_submit_rejects_malformed_contact() {
        let mut session = session_at_summary();
        session
            .apply_update(OrderUpdate::new().contact("Petr", "777 123 456", "petr@"))
            .unwrap();
        assert_eq!(
            session.submit().unwrap_err().error_code(),
            "CONTACT_INVALID_EMAIL"
        );

        session
            .apply_update(OrderUpdate::new().contact("Petr", "12", "petr@example.cz"))
            .unwrap();
        assert_eq!(
            session.submit().unwrap_err().error_code(),
            "CONTACT_INVALID_PHONE"
        );
    }

    #[test]
    fn test_submit_composes_message() {
        let mut session = session_at_summary();
        session
            .apply_update(OrderUpdate::new().contact(
                "Petr Svoboda",
                "+420 777 123 456",
                "petr@example.cz",
            ))
            .unwrap();

        let message = session.submit().unwrap();
        assert_eq!(message.recipient, "cukrarna.pist@seznam.cz");
        assert_eq!(message.subject, "Poptávka dortu - Petr Svoboda");
        assert!(message.body.contains("Datum vyzvednutí: 26. 10. 2026"));
        assert!(message.body.contains("Místo: Ostrava Zábřeh"));
        assert!(message.body.contains("Patra: 2"));
        assert!(message.body.contains("Rozměry: 24 / 22 cm"));
        assert!(message.body.contains("Korpus: Čokoládový"));
        assert!(message.body.contains("Povrch: Marcipánový (Barva: Modrá)"));
        assert!(message.body.contains("Nápis: Všechno nejlepší, Petře!"));
        assert!(message.body.contains("Množství: 2 ks"));
        assert!(message.body.contains("Bez ořechů prosím."));

        let summary = session.summary();
        assert_eq!(summary.location, "Ostrava Zábřeh");
        assert_eq!(summary.quantity, 2);
        assert!(!summary.edible_print);
    }
}
