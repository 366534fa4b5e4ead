/// Messages produced by the site's event handlers
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteMsg {
    /// Hamburger button pressed
    ToggleMenu,
    /// A dropdown link was activated
    CloseMenu,
    /// The contact form passed validation and its submit was intercepted
    Submitted { fields: Vec<(String, String)> },
    /// A contact form control failed constraint validation
    Invalid { field: String, reason: String },
}
