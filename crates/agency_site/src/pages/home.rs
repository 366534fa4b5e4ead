use agency_animation::Variant;
use agency_layout::prelude::*;

use super::{page_root, PageView};
use crate::config::SiteConfig;
use crate::content::service_description;
use crate::message::SiteMsg;
use crate::route::Route;

pub const HERO_HEADING: &str = "Creative Digital Solutions";
pub const TAGLINE: &str = "Video • Design • Marketing";
pub const CTA_LABEL: &str = "View Our Work";
pub const SERVICES_HEADING: &str = "Our Services";

/// Landing page: hero with call to action, then the services grid
pub struct HomePage;

impl PageView for HomePage {
    fn route(&self) -> Route {
        Route::Home
    }

    fn heading(&self) -> &str {
        HERO_HEADING
    }

    fn view(&self, config: &SiteConfig) -> Element<SiteMsg> {
        page_root("home", config)
            .child(hero())
            .child(services(config))
    }
}

fn hero() -> Element<SiteMsg> {
    let zoom = TransitionPreset::new("hero_zoom")
        .with_pose(Phase::Initial, Pose::scale(0.5).with_opacity(0.0))
        .with_variant(
            Phase::Animate,
            Variant::new(Pose::scale(1.0).with_opacity(1.0)).with_transition(Transition::tween(500)),
        );
    let rise = TransitionPreset::new("tagline_rise")
        .with_pose(Phase::Initial, Pose::opacity(0.0).with_y(20.0))
        .with_variant(
            Phase::Animate,
            Variant::new(Pose::opacity(1.0).with_y(0.0))
                .with_transition(Transition::default().with_delay(200)),
        );
    let cta = MotionProps::new(TransitionPreset::new("cta"))
        .while_hover(Pose::scale(1.05))
        .while_tap(Pose::scale(0.95));

    section()
        .id("hero")
        .class("h-screen flex items-center justify-center bg-gradient-to-r from-blue-600 to-purple-600")
        .child(
            div()
                .class("text-center text-white px-4")
                .child(
                    heading(1, HERO_HEADING)
                        .class("text-5xl md:text-7xl font-bold mb-4")
                        .animate(zoom),
                )
                .child(
                    paragraph(TAGLINE)
                        .class("text-xl md:text-2xl mb-8")
                        .animate(rise),
                )
                .child(
                    div().motion(cta).child(
                        anchor(Route::Portfolio.path()).child(
                            button(CTA_LABEL)
                                .class("bg-white text-blue-600 px-8 py-3 rounded-full text-lg font-semibold"),
                        ),
                    ),
                ),
        )
}

fn services(config: &SiteConfig) -> Element<SiteMsg> {
    let cards = config.content.services.iter().map(|service| {
        div()
            .key(service.clone())
            .class("service-card bg-white p-6 rounded-lg shadow-lg")
            .motion(
                MotionProps::new(TransitionPreset::scale_up())
                    .while_hover(Pose::default().with_y(-10.0)),
            )
            .child(heading(3, service.clone()).class("text-xl font-bold mb-2"))
            .child(paragraph(service_description(service)).class("text-gray-600"))
    });

    section().id("services").class("py-20 px-4 bg-gray-100").child(
        div()
            .class("max-w-6xl mx-auto")
            .animate(TransitionPreset::stagger_container(config.motion.stagger_ms))
            .child(
                heading(2, SERVICES_HEADING)
                    .class("text-4xl font-bold text-center mb-12")
                    .animate(TransitionPreset::fade_in_up()),
            )
            .child(div().class("grid md:grid-cols-3 gap-8").children(cards)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_layout::{RenderState, RenderTree, Viewport};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_home_structure() {
        let config = SiteConfig::default();
        let mut tree = RenderTree::new(Viewport::default());
        let root = tree.root();
        let page = tree.mount(root, HomePage.view(&config)).unwrap();

        assert_eq!(
            tree.headings(page),
            vec![
                (1, HERO_HEADING.to_string()),
                (2, SERVICES_HEADING.to_string()),
                (3, "Video Production".to_string()),
                (3, "Graphic Design".to_string()),
                (3, "Digital Marketing".to_string()),
            ]
        );
        assert_eq!(
            tree.links(page),
            vec![(CTA_LABEL.to_string(), "/portfolio".to_string())]
        );
        assert_eq!(tree.find_text("Professional graphic design services").len(), 1);
    }

    #[test]
    fn test_services_stagger_after_heading() {
        let config = SiteConfig::default();
        let mut tree = RenderTree::new(Viewport::default());
        let root = tree.root();
        let page = tree.mount(root, HomePage.view(&config)).unwrap();
        let mut state = RenderState::new();
        state.start_subtree(&tree, page, 0);

        let container = tree
            .find_all(page, |n| n.class() == Some("max-w-6xl mx-auto"))
            .into_iter()
            .next()
            .unwrap();
        let delays: Vec<u32> = tree
            .motion_children(container)
            .into_iter()
            .filter_map(|node| state.animation(node))
            .map(|a| a.transition().delay_ms())
            .collect();
        assert_eq!(delays, vec![0, 100, 200, 300]);
    }
}
