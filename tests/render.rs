use hollow_forge::{
    AnimationPhase, CharacterConfiguration, CharacterProfile, Color, DEFAULT_FILL, ForgeSession,
    HairTone, Metal, NONE_ID, RenderSettings, Slot, Surface, render_background_id,
    render_character,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn render(config: &CharacterConfiguration, time_ms: f64) -> Surface {
    render_character(config, &AnimationPhase::at(time_ms), &RenderSettings::unscaled())
}

fn knight() -> CharacterConfiguration {
    CharacterProfile::from_json(
        r#"{"chest": "plate", "helmet": "none", "hair": "short", "weapon": "sword", "background": "bonfire"}"#,
    )
    .unwrap()
    .to_configuration()
}

#[test]
fn same_inputs_give_identical_pixels() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let mut config = CharacterConfiguration::default();
        config.randomize(&mut rng);
        for t in [0.0, 333.0, 4321.5] {
            let a = render_character(&config, &AnimationPhase::at(t), &RenderSettings::default());
            let b = render_character(&config, &AnimationPhase::at(t), &RenderSettings::default());
            assert_eq!(a.image().as_raw(), b.image().as_raw());
        }
    }
}

#[test]
fn none_omits_each_optional_layer() {
    for &slot in Slot::ALL.iter().filter(|slot| slot.is_optional()) {
        let visible = slot.options()[1].id;
        let with = CharacterConfiguration::default().with(slot, visible);
        let without = CharacterConfiguration::default().with(slot, NONE_ID);
        assert_eq!(without.get(slot), NONE_ID);
        assert_ne!(
            render(&with, 0.0),
            render(&without, 0.0),
            "{} = {visible} should change the picture",
            slot.id()
        );
    }
}

#[test]
fn helmet_hides_hair_and_face() {
    let bare = knight().with(Slot::Face, "skull");
    let hooded = bare.with(Slot::Helmet, "hood");
    let hooded_bald = hooded.with(Slot::Hair, NONE_ID).with(Slot::Face, "normal");

    assert_eq!(render(&hooded, 0.0), render(&hooded_bald, 0.0));
    assert_ne!(render(&bare, 0.0), render(&hooded, 0.0));
}

#[test]
fn plate_knight_at_the_bonfire() {
    let surface = render(&knight(), 0.0);
    let steel = Metal::Steel.ramp();

    assert_eq!(surface.logical_pixel(27, 67), Some(steel.base), "plate on torso");
    assert_eq!(
        surface.logical_pixel(29, 53),
        Some(HairTone::Black.ramp().base),
        "short hair"
    );
    assert_eq!(surface.logical_pixel(40, 58), Some(steel.base), "blade");
    assert_eq!(surface.logical_pixel(40, 62), Some(steel.highlight), "blade edge");
    assert_eq!(
        surface.logical_pixel(27, 74),
        Some(Color::hex(0xd04010)),
        "flame at the fire anchor"
    );
}

#[test]
fn pixel_size_scales_device_buffer_only() {
    let config = knight();
    let big = render_character(&config, &AnimationPhase::at(0.0), &RenderSettings::default());
    let small = render(&config, 0.0);
    assert_eq!(big.image().dimensions(), (256, 384));
    for (x, y) in [(27, 67), (29, 53), (40, 58), (27, 74), (0, 0)] {
        assert_eq!(big.logical_pixel(x, y), small.logical_pixel(x, y), "({x}, {y})");
    }
}

#[test]
fn unknown_background_uses_default_fill() {
    let mut surface = Surface::new(64, 96, 1);
    render_background_id("starfield", 0.0, &mut surface);
    assert_eq!(surface.logical_pixel(32, 48), Some(DEFAULT_FILL));

    let config = CharacterProfile::from_json(r#"{"background": "starfield"}"#)
        .unwrap()
        .to_configuration();
    assert_eq!(config.get(Slot::Background), "bonfire");
}

#[test]
fn randomize_picks_table_members() {
    let mut session = ForgeSession::default();
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..50 {
        session.randomize(&mut rng, round as f64 * 16.0);
        let profile = hollow_forge::Configurable::export_profile(&session);
        for &slot in Slot::ALL {
            let id = profile.get(slot);
            assert!(
                slot.options().iter().any(|entry| entry.id == id),
                "{} picked unknown id {id}",
                slot.id()
            );
        }
    }
}

#[test]
fn breathing_moves_the_figure_but_not_the_scene() {
    let config = knight().with(Slot::Background, "ruins");
    let rest = render(&config, 0.0);
    let inhale = render(&config, 600.0 * std::f64::consts::FRAC_PI_2);
    assert_ne!(rest, inhale);
    assert_eq!(rest.logical_pixel(1, 1), inhale.logical_pixel(1, 1));
}
