//! Layout shell
//!
//! The nav bar and the `main` slot persist across pages. The shell owns the
//! mobile menu state: a two-state machine whose open state is mirrored by
//! a presence slot (the dropdown) and by the toggle icon.

use agency_core::StateMachine;
use agency_layout::prelude::*;

use crate::config::SiteConfig;
use crate::content::MenuItem;
use crate::error::{Result, SiteError};
use crate::message::SiteMsg;
use crate::route::Route;

/// Three horizontal bars
pub const BARS_PATH: &str = "M4 6h16M4 12h16M4 18h16";
/// Cross shown while the menu is open
pub const CROSS_PATH: &str = "M6 18L18 6M6 6l12 12";

pub const NAV_ID: &str = "site-nav";
pub const BRAND_ID: &str = "brand";
pub const TOGGLE_ID: &str = "menu-toggle";
pub const DESKTOP_MENU_ID: &str = "desktop-menu";
pub const MOBILE_MENU_ID: &str = "mobile-menu";
pub const MAIN_ID: &str = "main";

const DROPDOWN_KEY: &str = "menu";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    Close,
}

fn menu_machine() -> StateMachine<MenuState, MenuEvent> {
    StateMachine::builder(MenuState::Closed)
        .on(MenuState::Closed, MenuEvent::Toggle, MenuState::Open)
        .on(MenuState::Open, MenuEvent::Toggle, MenuState::Closed)
        .on(MenuState::Open, MenuEvent::Close, MenuState::Closed)
        .build()
}

/// Mounted nav bar and page slot
pub struct Shell {
    frame: NodeId,
    nav: NodeId,
    toggle: NodeId,
    icon: NodeId,
    desktop_menu: NodeId,
    main: NodeId,
    menu: StateMachine<MenuState, MenuEvent>,
    dropdown: Presence<SiteMsg>,
    items: Vec<MenuItem>,
    stagger_ms: u32,
}

impl Shell {
    /// Mount the shell under the tree root and start its entrance
    pub fn mount(
        tree: &mut RenderTree<SiteMsg>,
        state: &mut RenderState,
        config: &SiteConfig,
    ) -> Result<Self> {
        let items = config.content.menu_items();
        let stagger_ms = config.motion.stagger_ms;
        let md = config.viewport.md_breakpoint;

        let root = tree.root();
        let frame = tree
            .mount(root, shell_view(config, &items, stagger_ms, md))
            .ok_or_else(|| SiteError::NodeNotFound("#root".to_string()))?;

        let nav = require(tree, NAV_ID)?;
        let toggle = require(tree, TOGGLE_ID)?;
        let desktop_menu = require(tree, DESKTOP_MENU_ID)?;
        let dropdown_host = require(tree, MOBILE_MENU_ID)?;
        let main = require(tree, MAIN_ID)?;
        let icon = tree
            .get(toggle)
            .and_then(|n| n.children().first().copied())
            .ok_or_else(|| SiteError::NodeNotFound(format!("#{TOGGLE_ID} > svg")))?;

        state.start_subtree(tree, frame, 0);
        tracing::debug!("shell: mounted with {} menu item(s)", items.len());

        Ok(Self {
            frame,
            nav,
            toggle,
            icon,
            desktop_menu,
            main,
            menu: menu_machine(),
            dropdown: Presence::new(dropdown_host, PresenceMode::Wait),
            items,
            stagger_ms,
        })
    }

    pub fn frame(&self) -> NodeId {
        self.frame
    }

    pub fn nav(&self) -> NodeId {
        self.nav
    }

    pub fn toggle(&self) -> NodeId {
        self.toggle
    }

    pub fn icon(&self) -> NodeId {
        self.icon
    }

    pub fn desktop_menu(&self) -> NodeId {
        self.desktop_menu
    }

    /// Container the page presence slot mounts into
    pub fn main(&self) -> NodeId {
        self.main
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.current_state()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_in(MenuState::Open)
    }

    /// The dropdown node while it is in the tree (entering, open or exiting)
    pub fn dropdown(&self) -> Option<NodeId> {
        self.dropdown
            .current()
            .or_else(|| self.dropdown.exiting().last())
            .map(|p| p.node)
    }

    /// Flip the menu. Returns the new open state.
    pub fn toggle_menu(&mut self, tree: &mut RenderTree<SiteMsg>, state: &mut RenderState) -> bool {
        self.menu.send(MenuEvent::Toggle);
        self.sync(tree, state);
        self.is_menu_open()
    }

    /// Close the menu if it is open. Returns true when it was open.
    pub fn close_menu(&mut self, tree: &mut RenderTree<SiteMsg>, state: &mut RenderState) -> bool {
        if !self.menu.can_send(MenuEvent::Close) {
            return false;
        }
        self.menu.send(MenuEvent::Close);
        self.sync(tree, state);
        true
    }

    /// Per-frame upkeep of the dropdown slot
    pub fn update(&mut self, tree: &mut RenderTree<SiteMsg>, state: &mut RenderState) -> bool {
        self.dropdown.update(tree, state)
    }

    pub fn is_settled(&self) -> bool {
        self.dropdown.is_settled()
    }

    fn sync(&mut self, tree: &mut RenderTree<SiteMsg>, state: &mut RenderState) {
        let open = self.is_menu_open();
        tracing::debug!("shell: menu {:?}", self.menu_state());

        if open {
            let dropdown = dropdown_view(&self.items, self.stagger_ms);
            self.dropdown.present(tree, state, DROPDOWN_KEY, Some(dropdown));
        } else {
            self.dropdown.clear(tree, state);
        }

        let removed = tree.remove(self.icon);
        state.forget(&removed);
        let path = if open { CROSS_PATH } else { BARS_PATH };
        if let Some(icon) = tree.mount(self.toggle, svg_path(path).class("w-6 h-6")) {
            self.icon = icon;
        }
    }
}

fn require(tree: &RenderTree<SiteMsg>, dom_id: &str) -> Result<NodeId> {
    tree.find_by_id(dom_id)
        .ok_or_else(|| SiteError::NodeNotFound(format!("#{dom_id}")))
}

// ============================================================================
// Views
// ============================================================================

fn shell_view(config: &SiteConfig, items: &[MenuItem], stagger_ms: u32, md: u32) -> Element<SiteMsg> {
    let brand = anchor(Route::Home.path()).id(BRAND_ID).child(
        div()
            .class("text-2xl font-bold")
            .text(config.site.brand.clone())
            .animate(TransitionPreset::logo_spin()),
    );

    let toggle = icon_button()
        .id(TOGGLE_ID)
        .class("md:hidden")
        .only_below(md)
        .motion(MotionProps::new(TransitionPreset::new("menu_toggle")).while_tap(Pose::scale(0.9)))
        .on_click(|_| Some(SiteMsg::ToggleMenu))
        .child(svg_path(BARS_PATH).class("w-6 h-6"));

    let desktop = div()
        .id(DESKTOP_MENU_ID)
        .class("hidden md:flex space-x-8")
        .only_from(md)
        .children(items.iter().enumerate().map(|(index, item)| {
            div()
                .key(item.label.clone())
                .animate(TransitionPreset::slide_from_right(index, stagger_ms))
                .child(nav_link(item, "relative text-gray-700 hover:text-blue-600"))
        }));

    div()
        .class("min-h-screen")
        .child(
            nav()
                .id(NAV_ID)
                .class("fixed w-full bg-white shadow-lg z-50")
                .animate(TransitionPreset::nav_drop())
                .child(
                    div().class("container mx-auto px-4").child(
                        div()
                            .class("flex justify-between items-center h-16")
                            .child(brand)
                            .child(toggle)
                            .child(desktop),
                    ),
                )
                .child(div().id(MOBILE_MENU_ID).only_below(md)),
        )
        .child(main_area().id(MAIN_ID).class("pt-16"))
}

fn dropdown_view(items: &[MenuItem], stagger_ms: u32) -> Element<SiteMsg> {
    div()
        .class("md:hidden bg-white")
        .animate(TransitionPreset::menu_expand())
        .child(
            div()
                .class("px-2 pt-2 pb-3 space-y-1")
                .children(items.iter().enumerate().map(|(index, item)| {
                    div()
                        .key(item.label.clone())
                        .animate(TransitionPreset::slide_from_left(index, stagger_ms))
                        .child(
                            nav_link(item, "block px-3 py-2 text-gray-700 hover:bg-gray-100")
                                .on_click(|_| Some(SiteMsg::CloseMenu)),
                        )
                })),
        )
}

/// Router link with the hover underline bar
fn nav_link(item: &MenuItem, class: &str) -> Element<SiteMsg> {
    link(item.path.clone(), item.label.clone())
        .class(class)
        .child(
            span()
                .class("absolute bottom-0 left-0 w-full h-0.5 bg-blue-600")
                .animate(TransitionPreset::underline_reveal()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_layout::{ElementKind, Viewport};
    use pretty_assertions::assert_eq;

    fn mounted(width: u32) -> (RenderTree<SiteMsg>, RenderState, Shell) {
        let config = SiteConfig::default();
        let mut tree = RenderTree::new(Viewport::new(width, 720));
        let mut state = RenderState::new();
        let shell = Shell::mount(&mut tree, &mut state, &config).unwrap();
        (tree, state, shell)
    }

    fn icon_path(tree: &RenderTree<SiteMsg>, shell: &Shell) -> String {
        match tree.get(shell.icon()).map(|n| n.kind().clone()) {
            Some(ElementKind::Svg { path }) => path,
            other => panic!("icon is {other:?}"),
        }
    }

    #[test]
    fn test_desktop_links_match_menu() {
        let (tree, _, shell) = mounted(1280);
        assert_eq!(
            tree.links(shell.desktop_menu()),
            vec![
                ("Home".to_string(), "/".to_string()),
                ("Portfolio".to_string(), "/portfolio".to_string()),
                ("Contact".to_string(), "/contact".to_string()),
            ]
        );
        assert!(tree.is_visible(shell.desktop_menu()));
        assert!(!tree.is_visible(shell.toggle()));
    }

    #[test]
    fn test_toggle_mounts_dropdown_and_morphs_icon() {
        let (mut tree, mut state, mut shell) = mounted(375);
        assert!(!shell.is_menu_open());
        assert_eq!(icon_path(&tree, &shell), BARS_PATH);

        assert!(shell.toggle_menu(&mut tree, &mut state));
        assert_eq!(icon_path(&tree, &shell), CROSS_PATH);
        let dropdown = shell.dropdown().unwrap();
        assert_eq!(tree.links(dropdown).len(), 3);

        assert!(!shell.toggle_menu(&mut tree, &mut state));
        assert_eq!(icon_path(&tree, &shell), BARS_PATH);
        // the dropdown stays mounted until its exit finishes
        assert!(tree.contains(dropdown));
        for _ in 0..40 {
            state.tick(16.0);
            shell.update(&mut tree, &mut state);
        }
        assert!(!tree.contains(dropdown));
        assert_eq!(shell.dropdown(), None);
    }

    #[test]
    fn test_close_is_noop_when_closed() {
        let (mut tree, mut state, mut shell) = mounted(375);
        assert!(!shell.close_menu(&mut tree, &mut state));
        shell.toggle_menu(&mut tree, &mut state);
        assert!(shell.close_menu(&mut tree, &mut state));
        assert_eq!(shell.menu_state(), MenuState::Closed);
    }
}
