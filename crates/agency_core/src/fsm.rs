//! State Machine Runtime
//!
//! Flat transition tables for UI interaction states (menu open/closed,
//! idle/hovered/pressed gestures). States and events are caller-defined
//! `Copy` types, usually small enums. A machine keeps its current state
//! and nothing else; sent events are not recorded.

use std::fmt::Debug;

/// One row of a transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
}

impl<S, E> Transition<S, E> {
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: Vec<Transition<S, E>>,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: Vec<Transition<S, E>>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: E) -> bool {
        self.find(event).is_some()
    }

    /// Send an event, returning the (possibly unchanged) current state.
    /// The first matching row wins.
    pub fn send(&mut self, event: E) -> S {
        let current = self.current_state;
        match self.find(event) {
            Some(to_state) => {
                self.current_state = to_state;
                tracing::trace!("fsm: {:?} --{:?}--> {:?}", current, event, to_state);
                to_state
            }
            None => {
                tracing::trace!("fsm: {:?} ignored in {:?}", event, current);
                current
            }
        }
    }

    fn find(&self, event: E) -> Option<S> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.event == event)
            .map(|t| t.to_state)
    }
}
