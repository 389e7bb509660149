//! Pointer interaction: toggle-then-paint editing and space-drag panning.
//!
//! The gesture logic lives in [`PointerSession`], an explicit state machine
//! over pointer/keyboard events that emits [`EditAction`]s for the host to
//! apply. The Bevy system at the bottom is only a translator from raw engine
//! input to those events.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::grid::{CellCoord, LifeGrid};
use crate::viewport::Viewport;

/// What the pointer is currently doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerMode {
    #[default]
    Idle,
    /// Space held when the button went down; moves pan the viewport.
    Panning,
    /// Button went down on a dead cell; moves paint cells alive.
    Drawing,
    /// Button went down on a live cell; moves erase cells.
    Erasing,
}

/// Host-independent pointer events, positions in window pixels.
#[derive(Clone, Copy, Debug)]
pub enum PointerEvent {
    ButtonDown(Vec2),
    ButtonUp,
    Moved(Vec2),
    SpaceDown,
    SpaceUp,
}

/// Side effect the host must apply to the grid or viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditAction {
    /// Set one cell alive (`true`) or dead (`false`).
    Set(CellCoord, bool),
    /// Translate the pan offset by a raw pixel delta.
    Pan(Vec2),
}

/// Explicit drag-gesture state machine.
///
/// The mode is fixed at button-down and never re-evaluated mid-drag: space
/// pressed or released while the button is held does not convert a draw into
/// a pan or end one, and a paint drag keeps its draw/erase direction no
/// matter which cells it crosses.
#[derive(Debug, Default, Resource)]
pub struct PointerSession {
    mode: PointerMode,
    space_held: bool,
    /// Last cell written during a paint drag, so sub-cell pointer motion
    /// does not rewrite (or re-toggle) the same cell.
    last_cell: Option<CellCoord>,
    last_pixel: Option<Vec2>,
}

impl PointerSession {
    pub fn mode(&self) -> PointerMode {
        self.mode
    }

    /// Feed one event; returns the action the host must apply, if any.
    ///
    /// `alive_at` reports the pre-event state of a cell and is consulted only
    /// at button-down, to decide between Drawing and Erasing.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        viewport: &Viewport,
        alive_at: impl Fn(CellCoord) -> bool,
    ) -> Option<EditAction> {
        match event {
            PointerEvent::SpaceDown => {
                self.space_held = true;
                None
            }
            PointerEvent::SpaceUp => {
                self.space_held = false;
                None
            }
            PointerEvent::ButtonDown(pixel) => {
                self.last_pixel = Some(pixel);
                if self.space_held {
                    self.mode = PointerMode::Panning;
                    None
                } else {
                    let cell = viewport.cell_at(pixel);
                    let was_alive = alive_at(cell);
                    self.mode = if was_alive {
                        PointerMode::Erasing
                    } else {
                        PointerMode::Drawing
                    };
                    self.last_cell = Some(cell);
                    Some(EditAction::Set(cell, !was_alive))
                }
            }
            PointerEvent::ButtonUp => {
                self.mode = PointerMode::Idle;
                self.last_cell = None;
                self.last_pixel = None;
                None
            }
            PointerEvent::Moved(pixel) => {
                let action = match self.mode {
                    PointerMode::Panning => {
                        let delta = self.last_pixel.map_or(Vec2::ZERO, |prev| pixel - prev);
                        (delta != Vec2::ZERO).then_some(EditAction::Pan(delta))
                    }
                    PointerMode::Drawing | PointerMode::Erasing => {
                        let cell = viewport.cell_at(pixel);
                        if self.last_cell == Some(cell) {
                            None
                        } else {
                            self.last_cell = Some(cell);
                            Some(EditAction::Set(cell, self.mode == PointerMode::Drawing))
                        }
                    }
                    PointerMode::Idle => None,
                };
                self.last_pixel = Some(pixel);
                action
            }
        }
    }
}

fn apply(action: Option<EditAction>, grid: &mut LifeGrid, viewport: &mut Viewport) {
    match action {
        Some(EditAction::Set(cell, true)) => grid.set_alive(cell),
        Some(EditAction::Set(cell, false)) => grid.set_dead(cell),
        Some(EditAction::Pan(delta)) => viewport.pan_by(delta),
        None => {}
    }
}

/// Translate raw Bevy input into [`PointerEvent`]s and apply the resulting
/// actions. `ButtonInput` is window-global, so a release after the cursor
/// leaves the canvas still ends the drag.
pub fn pointer_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<PointerSession>,
    mut grid: ResMut<LifeGrid>,
    mut viewport: ResMut<Viewport>,
) {
    // Modifier state first, so a press in the same frame sees it.
    if keys.just_pressed(KeyCode::Space) {
        session.handle(PointerEvent::SpaceDown, &viewport, |c| grid.is_alive(c));
    }
    if keys.just_released(KeyCode::Space) {
        session.handle(PointerEvent::SpaceUp, &viewport, |c| grid.is_alive(c));
    }

    if mouse.just_pressed(MouseButton::Left) {
        if let Some(pixel) = windows.get_single().ok().and_then(|w| w.cursor_position()) {
            let action = session.handle(PointerEvent::ButtonDown(pixel), &viewport, |c| {
                grid.is_alive(c)
            });
            apply(action, &mut grid, &mut viewport);
        }
    }

    for moved in cursor_moved.read() {
        let action = session.handle(PointerEvent::Moved(moved.position), &viewport, |c| {
            grid.is_alive(c)
        });
        apply(action, &mut grid, &mut viewport);
    }

    if mouse.just_released(MouseButton::Left) {
        session.handle(PointerEvent::ButtonUp, &viewport, |c| grid.is_alive(c));
    }
}
