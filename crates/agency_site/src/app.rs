//! Composition root
//!
//! `AgencyApp` owns the render tree, the animation state, the layout shell,
//! the page presence slot and the navigation history. User interactions are
//! methods; animation time only advances through [`AgencyApp::tick`].
//!
//! ```rust
//! use agency_site::{AgencyApp, SiteConfig};
//!
//! let mut app = AgencyApp::new(SiteConfig::default()).unwrap();
//! app.navigate("/contact");
//! app.settle();
//! assert_eq!(app.mounted_pages(), vec!["/contact"]);
//! ```

use agency_core::{event_types, EventData};
use agency_layout::{
    render_html, snapshot, Activation, ElementKind, GestureEvent, NodeId, NodeSnapshot, Presence,
    PresenceMode, RenderState, RenderTree, Submission, Viewport,
};

use crate::config::SiteConfig;
use crate::contact::{ContactOutcome, FormError};
use crate::error::{Result, SiteError};
use crate::layout::Shell;
use crate::message::SiteMsg;
use crate::pages::{self, PageView};
use crate::route::{History, Route};

/// Frame length used by [`AgencyApp::settle`]
pub const FRAME_MS: f32 = 16.0;

/// Upper bound on frames [`AgencyApp::settle`] will run
pub const SETTLE_FRAME_LIMIT: u32 = 2_000;

pub struct AgencyApp {
    config: SiteConfig,
    tree: RenderTree<SiteMsg>,
    state: RenderState,
    shell: Shell,
    pages: Presence<SiteMsg>,
    history: History,
    notifications: Vec<String>,
    form_errors: Vec<FormError>,
    clock_ms: f64,
}

impl AgencyApp {
    /// Mount the shell and the home page
    pub fn new(config: SiteConfig) -> Result<Self> {
        let mut tree = RenderTree::new(config.viewport.viewport());
        let mut state = RenderState::new();
        let shell = Shell::mount(&mut tree, &mut state, &config)?;
        let pages = Presence::new(shell.main(), PresenceMode::Wait);

        let mut app = Self {
            config,
            tree,
            state,
            shell,
            pages,
            history: History::new(Route::Home),
            notifications: Vec::new(),
            form_errors: Vec::new(),
            clock_ms: 0.0,
        };
        app.show(Route::Home);
        Ok(app)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Navigate to `location`. Returns false when it resolves to the current
    /// route, in which case nothing changes.
    pub fn navigate(&mut self, location: &str) -> bool {
        let route = Route::resolve(location);
        if !self.history.push(route.clone()) {
            tracing::debug!("app: already at {}", route);
            return false;
        }
        tracing::info!("app: navigate to {}", route);
        self.show(route);
        true
    }

    pub fn back(&mut self) -> bool {
        let Some(route) = self.history.back().cloned() else {
            return false;
        };
        tracing::info!("app: back to {}", route);
        self.show(route);
        true
    }

    pub fn forward(&mut self) -> bool {
        let Some(route) = self.history.forward().cloned() else {
            return false;
        };
        tracing::info!("app: forward to {}", route);
        self.show(route);
        true
    }

    pub fn route(&self) -> &Route {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn show(&mut self, route: Route) {
        let page = pages::page_for(&route);
        if route.is_not_found() {
            tracing::warn!("app: no page at {}", route);
        }
        let view = page.view(&self.config);
        self.pages
            .present(&mut self.tree, &mut self.state, route.path(), Some(view));
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Activate `node` the way a click or tap would
    pub fn click(&mut self, node: NodeId) -> Result<()> {
        self.ensure_interactive(node)?;
        let activation = self.tree.activate(node);
        self.apply(activation);
        Ok(())
    }

    /// Click the first visible link labelled `label`
    pub fn click_link(&mut self, label: &str) -> Result<()> {
        let links = self.tree.find_all(self.tree.root(), |n| {
            matches!(n.kind(), ElementKind::Link { .. })
        });
        let matching: Vec<NodeId> = links
            .into_iter()
            .filter(|id| self.tree.text_content(*id) == label)
            .collect();
        let target = self.pick_visible(&matching, || format!("link '{label}'"))?;
        self.click(target)
    }

    /// Click the first visible node whose own text is `text`
    pub fn click_text(&mut self, text: &str) -> Result<()> {
        let matching = self.tree.find_text(text);
        let target = self.pick_visible(&matching, || format!("text '{text}'"))?;
        self.click(target)
    }

    /// Flip the mobile menu. Returns the new open state.
    pub fn toggle_menu(&mut self) -> bool {
        self.shell.toggle_menu(&mut self.tree, &mut self.state)
    }

    pub fn is_menu_open(&self) -> bool {
        self.shell.is_menu_open()
    }

    /// Pointer entering (`true`) or leaving `node`
    pub fn hover(&mut self, node: NodeId, entered: bool) -> Result<()> {
        self.ensure_exists(node)?;
        let (event_type, gesture) = if entered {
            (event_types::POINTER_ENTER, GestureEvent::Enter)
        } else {
            (event_types::POINTER_LEAVE, GestureEvent::Leave)
        };
        let dispatch = self.tree.dispatch(node, event_type, EventData::None);
        self.state.apply_gesture(&self.tree, node, gesture);
        self.handle(dispatch.messages);
        Ok(())
    }

    /// Pointer pressed (`true`) or released on `node`
    pub fn press(&mut self, node: NodeId, down: bool) -> Result<()> {
        self.ensure_interactive(node)?;
        let (event_type, gesture) = if down {
            (event_types::POINTER_DOWN, GestureEvent::Down)
        } else {
            (event_types::POINTER_UP, GestureEvent::Up)
        };
        let dispatch = self.tree.dispatch(node, event_type, EventData::None);
        self.state.apply_gesture(&self.tree, node, gesture);
        self.handle(dispatch.messages);
        Ok(())
    }

    /// Type `value` into the contact form field labelled `label`
    pub fn fill(&mut self, label: &str, value: &str) -> Result<()> {
        let form = self.contact_form()?;
        let name = self
            .config
            .content
            .field(label)
            .map(|f| f.name())
            .ok_or_else(|| SiteError::UnknownField(label.to_string()))?;
        let control = self
            .tree
            .find_control_in(form, &name)
            .ok_or_else(|| SiteError::UnknownField(label.to_string()))?;
        if let Some(dispatch) = self.tree.set_value(control, value) {
            self.handle(dispatch.messages);
        }
        Ok(())
    }

    /// Submit the contact form, as pressing its submit button would
    pub fn submit_contact(&mut self) -> Result<ContactOutcome> {
        let form = self.contact_form()?;
        let activation = self.tree.request_submit(form);
        let notified_before = self.notifications.len();
        let submission = activation.submission.clone();
        self.apply(activation);

        Ok(match submission {
            Some(Submission::Submitted { fields, .. }) => ContactOutcome::Acknowledged {
                message: self
                    .notifications
                    .get(notified_before)
                    .cloned()
                    .unwrap_or_else(|| self.config.site.acknowledgement.clone()),
                fields,
            },
            _ => ContactOutcome::Rejected {
                errors: self.form_errors.clone(),
            },
        })
    }

    /// Errors from the most recent blocked submit
    pub fn form_errors(&self) -> &[FormError] {
        &self.form_errors
    }

    /// Acknowledgements posted so far, oldest first
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        tracing::debug!("app: viewport {}x{}", width, height);
        self.tree.set_viewport(Viewport::new(width, height));
    }

    pub fn viewport(&self) -> Viewport {
        self.tree.viewport()
    }

    // ========================================================================
    // Frame clock
    // ========================================================================

    /// Advance animations by `dt_ms` and let presence slots mount or unmount.
    /// Returns true while anything is still moving.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.clock_ms += f64::from(dt_ms.max(0.0));
        self.tree.set_clock(self.clock_ms as u64);

        let animating = self.state.tick(dt_ms);
        let pages_changed = self.pages.update(&mut self.tree, &mut self.state);
        let shell_changed = self.shell.update(&mut self.tree, &mut self.state);

        animating
            || pages_changed
            || shell_changed
            || !self.pages.is_settled()
            || !self.shell.is_settled()
    }

    /// Tick until everything is at rest. Returns the number of frames run.
    pub fn settle(&mut self) -> u32 {
        let mut frames = 0;
        while frames < SETTLE_FRAME_LIMIT {
            frames += 1;
            if !self.tick(FRAME_MS) {
                return frames;
            }
        }
        tracing::warn!("app: still animating after {} frames", frames);
        frames
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.clock_ms
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Keys of every mounted page, exiting pages first
    pub fn mounted_pages(&self) -> Vec<&str> {
        self.pages.mounted_keys()
    }

    /// `(level, text)` of the headings inside `main`
    pub fn page_headings(&self) -> Vec<(u8, String)> {
        self.tree.headings(self.shell.main())
    }

    pub fn tree(&self) -> &RenderTree<SiteMsg> {
        &self.tree
    }

    pub fn render_state(&self) -> &RenderState {
        &self.state
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn render_html(&self) -> String {
        render_html(&self.tree, &self.state)
    }

    pub fn snapshot(&self) -> Option<NodeSnapshot> {
        snapshot(&self.tree, &self.state, self.tree.root())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn apply(&mut self, activation: Activation<SiteMsg>) {
        if let Some(Submission::Blocked { invalid }) = &activation.submission {
            self.form_errors.clear();
            tracing::warn!("app: contact form blocked, {} invalid field(s)", invalid.len());
        }
        self.handle(activation.messages);
        if let Some(to) = activation.follow {
            self.navigate(&to);
        }
    }

    fn handle(&mut self, messages: Vec<SiteMsg>) {
        for message in messages {
            match message {
                SiteMsg::ToggleMenu => {
                    self.shell.toggle_menu(&mut self.tree, &mut self.state);
                }
                SiteMsg::CloseMenu => {
                    self.shell.close_menu(&mut self.tree, &mut self.state);
                }
                SiteMsg::Submitted { fields } => self.acknowledge(fields),
                SiteMsg::Invalid { field, reason } => {
                    if let Some(error) = FormError::from_reason(field, &reason) {
                        tracing::debug!("app: {}", error);
                        self.form_errors.push(error);
                    }
                }
            }
        }
    }

    fn acknowledge(&mut self, fields: Vec<(String, String)>) {
        let message = self.config.site.acknowledgement.clone();
        tracing::info!("app: {} ({} field(s))", message, fields.len());
        self.notifications.push(message);
        self.form_errors.clear();
        if let Ok(form) = self.contact_form() {
            self.tree.reset_form(form);
        }
    }

    /// The form on the current page. A contact page that is still playing
    /// its exit does not count.
    fn contact_form(&self) -> Result<NodeId> {
        self.pages
            .current()
            .and_then(|page| self.tree.find_by_id_in(page.node, pages::CONTACT_FORM_ID))
            .ok_or(SiteError::NoContactForm)
    }

    fn ensure_exists(&self, node: NodeId) -> Result<()> {
        if self.tree.contains(node) {
            Ok(())
        } else {
            Err(SiteError::NodeNotFound(format!("{node:?}")))
        }
    }

    fn ensure_interactive(&self, node: NodeId) -> Result<()> {
        self.ensure_exists(node)?;
        if self.tree.is_visible(node) {
            Ok(())
        } else {
            tracing::warn!("app: {:?} is hidden at {}px", node, self.tree.viewport().width);
            Err(SiteError::NotInteractive(self.describe(node)))
        }
    }

    fn pick_visible(&self, candidates: &[NodeId], what: impl Fn() -> String) -> Result<NodeId> {
        if let Some(id) = candidates.iter().find(|id| self.tree.is_visible(**id)) {
            return Ok(*id);
        }
        Err(if candidates.is_empty() {
            SiteError::NodeNotFound(what())
        } else {
            SiteError::NotInteractive(what())
        })
    }

    fn describe(&self, node: NodeId) -> String {
        let Some(n) = self.tree.get(node) else {
            return format!("{node:?}");
        };
        match n.dom_id() {
            Some(id) => format!("#{id}"),
            None => format!("<{}> '{}'", n.kind().tag(), self.tree.text_content(node)),
        }
    }
}
