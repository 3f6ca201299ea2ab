//! `app` is the core of the widget.
//!
//! It owns the application state, routes keyboard and mouse input, drains
//! background completions on every tick and decides, through the host gate,
//! whether the chat screen may mount at all.

/// `actions` executes a `CommandAction`, whatever triggered it.
mod actions;
/// `agent` wires operator actions to the chat controller and the host.
mod agent;
/// `gate` evaluates the host configuration and mounts the chat screen.
mod gate;
/// `init` builds the `App`.
mod init;
/// `keyboard` handles key events.
mod keyboard;
/// `mouse` handles clicks on action buttons and wheel scrolling.
mod mouse;
/// `state` defines `App` and the input composer.
mod state;
/// `tick` applies completions reported by background tasks.
mod tick;

pub use state::{App, CommandAction, Composer};

#[cfg(test)]
mod tests;
