//! Console construction, deferred widget build and teardown.
//!
//! A console is spawned in the [`Pending`](ConsoleLifecycle::Pending) state.
//! Its widgets are built only once a host UI root (an entity with
//! [`ConsoleUiRoot`]) exists; until then the build can be cancelled.
//! Teardown removes every per-instance resource and leaves a
//! [`Disposed`](ConsoleLifecycle::Disposed) marker behind.

use std::sync::atomic::{AtomicU64, Ordering};

use bevy::prelude::*;

use super::{
    ConsoleCommands, ConsoleInputLine, ConsoleSettings, ConsoleViewport, ConsoleVisibility,
    ConsoleWidgets, MessageBuffer, SettingsError,
};

static NEXT_CONSOLE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a registered console instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsoleId(u64);

impl ConsoleId {
    fn next() -> Self {
        Self(NEXT_CONSOLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ConsoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "console#{}", self.0)
    }
}

/// The registered console. At most one exists per [`World`].
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleInstance {
    id: ConsoleId,
}

impl ConsoleInstance {
    /// Identity of the registered console.
    pub fn id(&self) -> ConsoleId {
        self.id
    }
}

/// Marker for the host UI root the console attaches to.
///
/// With the `egui` feature the primary egui context entity is tagged
/// automatically. Headless hosts can spawn one themselves.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ConsoleUiRoot;

/// Lifecycle state of the console widgets.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleLifecycle {
    /// Waiting for a host UI root.
    #[default]
    Pending,
    /// Widgets are built.
    Ready,
    /// The wait for a root was cancelled; nothing will be built.
    Cancelled,
    /// Torn down.
    Disposed,
}

impl ConsoleLifecycle {
    /// `Pending -> Ready`. Returns `false` from any other state.
    pub fn mark_ready(&mut self) -> bool {
        if *self != ConsoleLifecycle::Pending {
            return false;
        }
        *self = ConsoleLifecycle::Ready;
        true
    }

    /// `Pending -> Cancelled`. Returns `false` from any other state.
    pub fn cancel(&mut self) -> bool {
        if *self != ConsoleLifecycle::Pending {
            return false;
        }
        *self = ConsoleLifecycle::Cancelled;
        true
    }

    /// Whether widgets are built.
    pub fn is_ready(&self) -> bool {
        *self == ConsoleLifecycle::Ready
    }
}

/// Register a console in `world`.
///
/// If a console is already registered it is left untouched and its id is
/// returned.
pub fn spawn_console(world: &mut World, settings: ConsoleSettings) -> Result<ConsoleId, SettingsError> {
    settings.validate()?;

    if let Some(instance) = world.get_resource::<ConsoleInstance>() {
        warn!("In-game console {} already exists, ignoring new console", instance.id);
        return Ok(instance.id);
    }

    let id = ConsoleId::next();
    world.insert_resource(MessageBuffer::new(settings.max_messages, settings.show_timestamps));
    world.insert_resource(settings);
    world.insert_resource(ConsoleVisibility::default());
    world.insert_resource(ConsoleInputLine::default());
    world.init_resource::<ConsoleCommands>();
    world.init_resource::<ConsoleViewport>();
    world.insert_resource(ConsoleLifecycle::Pending);
    world.insert_resource(ConsoleInstance { id });

    debug!("Registered in-game console {}", id);
    Ok(id)
}

/// Cancel a pending widget build. Returns `true` if a build was pending.
pub fn cancel_console(world: &mut World) -> bool {
    world
        .get_resource_mut::<ConsoleLifecycle>()
        .is_some_and(|mut lifecycle| lifecycle.cancel())
}

/// Tear the console down.
///
/// Safe to call repeatedly and from any state, including before the widgets
/// were built or when no console was ever spawned.
pub fn dispose_console(world: &mut World) {
    let Some(mut lifecycle) = world.get_resource_mut::<ConsoleLifecycle>() else {
        return;
    };
    if *lifecycle == ConsoleLifecycle::Disposed {
        return;
    }
    *lifecycle = ConsoleLifecycle::Disposed;

    if let Some(mut buffer) = world.remove_resource::<MessageBuffer>() {
        buffer.clear();
    }
    world.remove_resource::<ConsoleWidgets>();
    world.remove_resource::<ConsoleInputLine>();
    world.remove_resource::<ConsoleVisibility>();
    world.remove_resource::<ConsoleCommands>();
    world.remove_resource::<ConsoleSettings>();
    world.remove_resource::<ConsoleViewport>();

    if let Some(instance) = world.remove_resource::<ConsoleInstance>() {
        info!("In-game console {} disposed", instance.id);
    }
}

/// System that builds the widgets once a host UI root exists.
pub(crate) fn await_ui_root(
    mut commands: Commands,
    roots: Query<(), With<ConsoleUiRoot>>,
    mut lifecycle: ResMut<ConsoleLifecycle>,
    viewport: Res<ConsoleViewport>,
) {
    if roots.is_empty() {
        return;
    }
    if lifecycle.mark_ready() {
        commands.insert_resource(ConsoleWidgets::layout(**viewport));
        info!("In-game console initialized");
    }
}

/// Run condition: the widget build is still pending.
pub fn console_pending(lifecycle: Option<Res<ConsoleLifecycle>>) -> bool {
    lifecycle.is_some_and(|l| *l == ConsoleLifecycle::Pending)
}

/// Run condition: a console is registered and not disposed.
pub fn console_alive(instance: Option<Res<ConsoleInstance>>) -> bool {
    instance.is_some()
}

/// Run condition: the widgets are built.
pub fn console_ready(lifecycle: Option<Res<ConsoleLifecycle>>) -> bool {
    lifecycle.is_some_and(|l| l.is_ready())
}
