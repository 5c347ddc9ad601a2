//! Views mounted by the studio's pages.

use crate::foundation::core::Rgba;
use crate::page::spec::ViewSpec;
use crate::pointer::effects::EffectSpec;
use crate::pointer::glow::{GlowPaint, GlowSpec};
use crate::section::registry::Section;
use crate::site::{CONTACT, FEATURED_WORK, HERO, INTRODUCTION, SERVICES, TESTIMONIALS};
use crate::timeline::ease::Ease;
use crate::timeline::keyframes::{Length, Property, Tween};
use crate::timeline::pin::PinSpec;
use crate::timeline::scroll::TimelineSpec;
use crate::timeline::scrub::Scrub;
use crate::timeline::trigger::{Edge, TriggerEnd, TriggerPos};

/// Ease of tweens that do not name one (`power1.out`).
const DEFAULT_EASE: Ease = Ease::OutQuad;

const TOP_TOP: TriggerPos = TriggerPos::new(Edge::Top, Edge::Top);

fn top_at(percent: f64) -> TriggerPos {
    TriggerPos::new(Edge::Top, Edge::Percent(percent))
}

fn px(v: f64) -> Length {
    Length::Px(v)
}

/// Tween from `from` to the property's rest value.
fn reveal(target: &str, property: Property, from: f64) -> Tween {
    Tween::new(target, property, px(from), px(property.neutral())).eased(DEFAULT_EASE)
}

/// Magnetic button with the site's pull strength.
fn magnetic(id: &str) -> EffectSpec {
    EffectSpec::Magnetic {
        id: id.to_owned(),
        anchor: id.to_owned(),
        strength: 0.35,
    }
}

/// Fixed navigation bar with its three hover glows.
pub fn nav() -> ViewSpec {
    ViewSpec {
        glows: ["nav-links", "nav-brand", "nav-cta"]
            .into_iter()
            .map(|id| GlowSpec::nav_block(id, id, "nav"))
            .collect(),
        ..ViewSpec::new("nav")
    }
}

/// Landing hero.
pub fn hero() -> ViewSpec {
    ViewSpec {
        sections: vec![Section::new(HERO.0, "Hero", HERO.1)],
        ..ViewSpec::new("hero")
    }
}

/// Featured work: title and cards scrub in, cards reveal under the pointer.
pub fn featured_work() -> ViewSpec {
    let title = TimelineSpec::new("work-title", "featured-work")
        .window(top_at(80.0), TriggerEnd::At(top_at(50.0)))
        .scrubbed(Scrub::Smooth(1.0))
        .with_tweens(
            [
                reveal("work-title", Property::Y, 100.0),
                reveal("work-title", Property::Opacity, 0.0),
            ]
            .into_iter()
            .collect(),
        );
    let cards = TimelineSpec::new("work-cards", "work-cards")
        .window(top_at(90.0), TriggerEnd::At(top_at(40.0)))
        .scrubbed(Scrub::Smooth(1.0))
        .with_tweens(
            [
                reveal("work-card-1", Property::X, -200.0),
                reveal("work-card-1", Property::Opacity, 0.0),
                reveal("work-card-2", Property::Y, 100.0),
                reveal("work-card-2", Property::Opacity, 0.0),
                reveal("work-card-3", Property::X, 200.0),
                reveal("work-card-3", Property::Opacity, 0.0),
            ]
            .into_iter()
            .collect(),
        );
    ViewSpec {
        sections: vec![Section::new(FEATURED_WORK.0, "Featured work", FEATURED_WORK.1)],
        timelines: vec![title, cards],
        glows: (1..=3)
            .map(|i| GlowSpec::reveal_mask(format!("work-card-{i}-mask"), format!("work-card-{i}")))
            .collect(),
        effects: vec![magnetic("work-cta")],
        ..ViewSpec::new("featured-work")
    }
}

/// Philosophy (the introduction section): text fades in before the pin, then two boxes cross
/// while the section is pinned and the text fades out once they meet.
pub fn philosophy() -> ViewSpec {
    let text = "philosophy-text";
    let text_in = TimelineSpec::new("philosophy-text-in", "philosophy")
        .window(top_at(50.0), TriggerEnd::At(TOP_TOP))
        .with_tweens(
            [
                (Property::Opacity, 0.0, 1.0),
                (Property::Blur, 20.0, 0.0),
                (Property::Scale, 0.9, 1.0),
            ]
            .into_iter()
            .map(|(p, a, b)| Tween::new(text, p, px(a), px(b)).eased(Ease::OutCubic))
            .collect(),
        );

    // Each box starts just touching its screen edge, offset by its own size.
    let boxes = [
        ("philosophy-box-1", -50.0, 100.0, -50.0, 20.0),
        ("philosophy-box-2", 50.0, -100.0, 50.0, -80.0),
    ]
    .into_iter()
    .flat_map(|(target, from, to, x_pct, y_pct)| {
        let held =
            |p: Property, v: f64| Tween::new(target, p, Length::Percent(v), Length::Percent(v));
        [
            Tween::new(target, Property::X, Length::Vw(from), Length::Vw(to)),
            held(Property::XPercent, x_pct),
            held(Property::YPercent, y_pct),
        ]
        .map(|tw| tw.at(0.0, 3.0))
    });
    let text_out = [
        (Property::Opacity, 1.0, 0.0),
        (Property::Blur, 0.0, 20.0),
        (Property::Scale, 1.0, 1.1),
    ]
    .into_iter()
    .map(|(p, a, b)| {
        Tween::new(text, p, px(a), px(b))
            .at(1.0, 1.0)
            .eased(DEFAULT_EASE)
            .lazy()
    });
    // Pinned for the first third of the crossing, until the boxes meet.
    let main = TimelineSpec::new("philosophy-main", "philosophy")
        .window(TOP_TOP, TriggerEnd::Distance(3000.0))
        .pinned(PinSpec::new(1000.0))
        .with_tweens(boxes.into_iter().chain(text_out).collect());

    ViewSpec {
        sections: vec![
            Section::new(INTRODUCTION.0, "Introduction", INTRODUCTION.1).anchored_at("philosophy"),
        ],
        timelines: vec![text_in, main],
        ..ViewSpec::new("philosophy")
    }
}

/// Process: four tilting cards with border glows that follow the pointer across the section.
pub fn process() -> ViewSpec {
    ViewSpec {
        glows: (1..=4)
            .map(|i| {
                let card = format!("process-card-{i}");
                GlowSpec::process_card(card.clone(), card, "process")
            })
            .collect(),
        effects: (1..=4)
            .map(|i| EffectSpec::Tilt {
                id: format!("process-card-{i}-tilt"),
                anchor: format!("process-card-{i}"),
                container: "process".to_owned(),
                max_deg: 3.0,
            })
            .collect(),
        ..ViewSpec::new("process")
    }
}

/// Services: scrubbed title and a magnetic call to action.
pub fn services() -> ViewSpec {
    let title = TimelineSpec::new("services-title", "services")
        .window(top_at(80.0), TriggerEnd::At(top_at(50.0)))
        .scrubbed(Scrub::Smooth(1.0))
        .with_tweens(
            [
                reveal("services-title", Property::Y, 50.0),
                reveal("services-title", Property::Opacity, 0.0),
            ]
            .into_iter()
            .collect(),
        );
    ViewSpec {
        sections: vec![Section::new(SERVICES.0, "Services", SERVICES.1)],
        timelines: vec![title],
        effects: vec![magnetic("services-cta")],
        ..ViewSpec::new("services")
    }
}

/// Testimonials: three cards with a spotlight that resets when the pointer leaves.
pub fn testimonials() -> ViewSpec {
    ViewSpec {
        sections: vec![Section::new(TESTIMONIALS.0, "Testimonials", TESTIMONIALS.1)],
        glows: (1..=3)
            .map(|i| {
                let card = format!("testimonial-{i}");
                GlowSpec::testimonial(card.clone(), card)
            })
            .collect(),
        ..ViewSpec::new("testimonials")
    }
}

/// Contact form.
pub fn contact() -> ViewSpec {
    ViewSpec {
        sections: vec![Section::new(CONTACT.0, "Contact", CONTACT.1)],
        ..ViewSpec::new("contact")
    }
}

/// Footer block with a wide border glow shown while the footer is hovered.
pub fn footer() -> ViewSpec {
    let glow = GlowSpec {
        container: Some("footer".to_owned()),
        radius: Some(600.0),
        round: true,
        hover_fade_ms: Some(500),
        ..GlowSpec::new(
            "footer-block",
            "footer-block",
            GlowPaint::Colors(vec![
                Rgba::new(59, 130, 246, 0.8),
                Rgba::new(147, 51, 234, 0.8),
            ]),
        )
    };
    ViewSpec {
        glows: vec![glow],
        ..ViewSpec::new("footer")
    }
}
