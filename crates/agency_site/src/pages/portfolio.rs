use agency_layout::prelude::*;

use super::{page_root, PageView};
use crate::config::SiteConfig;
use crate::content::Project;
use crate::message::SiteMsg;
use crate::route::Route;

pub const HEADING: &str = "Our Work";

/// Project grid; each tile reveals its caption on hover
pub struct PortfolioPage;

impl PageView for PortfolioPage {
    fn route(&self) -> Route {
        Route::Portfolio
    }

    fn heading(&self) -> &str {
        HEADING
    }

    fn view(&self, config: &SiteConfig) -> Element<SiteMsg> {
        page_root("portfolio", config)
            .class("container mx-auto px-4 py-12")
            .child(
                heading(1, HEADING)
                    .class("text-4xl font-bold mb-12 text-center")
                    .animate(TransitionPreset::fade_in_up()),
            )
            .child(
                div()
                    .id("portfolio-grid")
                    .class("grid md:grid-cols-2 lg:grid-cols-3 gap-8")
                    .animate(TransitionPreset::stagger_container(config.motion.stagger_ms))
                    .children(config.content.projects.iter().enumerate().map(tile)),
            )
    }
}

fn tile((index, project): (usize, &Project)) -> Element<SiteMsg> {
    div()
        .key(index.to_string())
        .class("project-tile relative overflow-hidden rounded-lg shadow-lg")
        .motion(MotionProps::new(TransitionPreset::scale_up()).while_hover(Pose::scale(1.05)))
        .child(image(project.image.clone(), project.title.clone()).class("w-full h-64 object-cover"))
        .child(
            div()
                .class("overlay absolute inset-0 bg-black/60 flex items-center justify-center")
                .animate(TransitionPreset::hover_reveal(0.0, 0))
                .child(
                    div()
                        .class("text-center text-white")
                        .child(
                            heading(3, project.title.clone())
                                .class("text-xl font-bold")
                                .animate(TransitionPreset::hover_reveal(20.0, 0)),
                        )
                        .child(
                            paragraph(project.category.clone())
                                .animate(TransitionPreset::hover_reveal(20.0, 100)),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_layout::{RenderState, RenderTree, Viewport};
    use pretty_assertions::assert_eq;

    fn mounted() -> (RenderTree<SiteMsg>, NodeId) {
        let mut tree = RenderTree::new(Viewport::default());
        let root = tree.root();
        let page = tree
            .mount(root, PortfolioPage.view(&SiteConfig::default()))
            .unwrap();
        (tree, page)
    }

    #[test]
    fn test_one_tile_per_project() {
        let (tree, _) = mounted();
        let grid = tree.find_by_id("portfolio-grid").unwrap();
        let tiles = tree.motion_children(grid);
        let projects = SiteConfig::default().content.projects;
        assert_eq!(tiles.len(), projects.len());

        for (tile, project) in tiles.iter().zip(&projects) {
            assert_eq!(
                tree.headings(*tile),
                vec![(3, project.title.clone())]
            );
            assert!(tree.text_content(*tile).ends_with(&project.category));
        }
    }

    #[test]
    fn test_hover_reveals_caption() {
        let (tree, page) = mounted();
        let mut state = RenderState::new();
        state.start_subtree(&tree, page, 0);
        state.tick(2000.0);

        let title = tree.find_text("Brand Campaign")[0];
        assert_eq!(state.pose(title).map(Pose::resolved_opacity), Some(0.0));

        let tile = tree.motion_children(tree.find_by_id("portfolio-grid").unwrap())[0];
        state.apply_gesture(&tree, tile, GestureEvent::Enter);
        state.tick(500.0);
        assert_eq!(state.pose(title).map(Pose::resolved_opacity), Some(1.0));
        assert_eq!(state.pose(tile).and_then(|p| p.scale), Some(1.05));
    }
}
