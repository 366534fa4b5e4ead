//! Event model
//!
//! Events target a node in the element tree and bubble towards the root.
//! Handlers may stop propagation or prevent the host's default action
//! (following a link, submitting a form to the server).

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    /// Activation (mouse click or finger tap)
    pub const CLICK: EventType = 8;
    pub const FOCUS: EventType = 10;
    pub const BLUR: EventType = 11;
    /// Value of a form control changed
    pub const INPUT: EventType = 22;
    /// Form submission, fired on the form element
    pub const SUBMIT: EventType = 40;
    /// Constraint validation failed, fired on the offending control
    pub const INVALID: EventType = 41;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// Human readable name for an event type, used in logs.
pub fn event_name(event_type: EventType) -> &'static str {
    use event_types::*;
    match event_type {
        POINTER_DOWN => "pointer_down",
        POINTER_UP => "pointer_up",
        POINTER_ENTER => "pointer_enter",
        POINTER_LEAVE => "pointer_leave",
        CLICK => "click",
        FOCUS => "focus",
        BLUR => "blur",
        INPUT => "input",
        SUBMIT => "submit",
        INVALID => "invalid",
        MOUNT => "mount",
        UNMOUNT => "unmount",
        _ => "unknown",
    }
}

/// Event-specific data
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
    },
    /// New value of a form control
    Input {
        value: String,
    },
    /// Reason a control failed validation
    Invalid {
        reason: String,
    },
    /// Name/value pairs collected from a form, in document order
    Submit {
        fields: Vec<(String, String)>,
    },
    #[default]
    None,
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    /// Node the event was dispatched to
    pub target: u64,
    /// Node whose handler is currently running (changes while bubbling)
    pub current_target: u64,
    pub data: EventData,
    pub timestamp_ms: u64,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: u64) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            data: EventData::None,
            timestamp_ms: 0,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Builder: attach event data
    pub fn with_data(mut self, data: EventData) -> Self {
        self.data = data;
        self
    }

    /// Builder: set the timestamp
    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Stop the event from reaching ancestor handlers
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Suppress the host's default action for this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn name(&self) -> &'static str {
        event_name(self.event_type)
    }
}
