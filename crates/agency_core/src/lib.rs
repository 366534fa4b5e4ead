//! Agency Core
//!
//! Foundational primitives shared by the layout engine and the site:
//!
//! - **Events**: pointer, input and form events with bubbling and
//!   default-prevention flags
//! - **State Machines**: flat statecharts for menu and gesture states
//!
//! # Example
//!
//! ```rust
//! use agency_core::fsm::StateMachine;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Menu { Closed, Open }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Tap { Toggle }
//!
//! let mut menu = StateMachine::builder(Menu::Closed)
//!     .on(Menu::Closed, Tap::Toggle, Menu::Open)
//!     .on(Menu::Open, Tap::Toggle, Menu::Closed)
//!     .build();
//!
//! menu.send(Tap::Toggle);
//! assert!(menu.is_in(Menu::Open));
//! ```

pub mod events;
pub mod fsm;

pub use events::{event_types, Event, EventData, EventType};
pub use fsm::{StateMachine, StateMachineBuilder, Transition};
