//! Frame rendering: grid lines and one sprite per live cell.
//!
//! Runs every display frame, independent of the tick rate, and never mutates
//! simulation state. Window pixel space (origin top-left, y down) is
//! converted to Bevy's centred, y-up world space only here, at the drawing
//! boundary.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::grid::{CellCoord, LifeGrid};
use crate::viewport::Viewport;

const CELL_COLOR: Color = Color::srgb(0.92, 0.93, 0.82);
const GRID_LINE_COLOR: Color = Color::srgb(0.18, 0.19, 0.24);

/// Marker carrying the grid position a sprite renders.
#[derive(Component)]
pub struct CellSprite {
    pub coord: CellCoord,
}

/// Bookkeeping of spawned cell sprites, diffed against the grid version so
/// frames without edits or ticks spawn and despawn nothing.
#[derive(Default, Resource)]
pub struct CellSprites {
    entities: HashMap<CellCoord, Entity>,
    seen_version: Option<u64>,
}

fn pixel_to_world(pixel: Vec2, window: &Window) -> Vec2 {
    Vec2::new(
        pixel.x - window.width() / 2.0,
        window.height() / 2.0 - pixel.y,
    )
}

/// Spawn sprites for newly live cells and despawn sprites for dead ones.
pub fn sync_cell_sprites(
    mut commands: Commands,
    grid: Res<LifeGrid>,
    mut sprites: ResMut<CellSprites>,
) {
    if sprites.seen_version == Some(grid.version()) {
        return;
    }

    sprites.entities.retain(|coord, entity| {
        if grid.is_alive(*coord) {
            true
        } else {
            commands.entity(*entity).despawn();
            false
        }
    });

    for &coord in grid.cells() {
        sprites.entities.entry(coord).or_insert_with(|| {
            commands
                .spawn((
                    Sprite::from_color(CELL_COLOR, Vec2::ONE),
                    Transform::default(),
                    CellSprite { coord },
                ))
                .id()
        });
    }

    sprites.seen_version = Some(grid.version());
}

/// Position and size every cell sprite from the current offset and scale.
pub fn layout_cell_sprites(
    viewport: Res<Viewport>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sprites: Query<(&CellSprite, &mut Sprite, &mut Transform)>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let scale = viewport.scale() as f32;
    // Leave a hairline so the grid shows between adjacent cells.
    let size = (scale - 1.0).max(1.0);

    for (cell, mut sprite, mut transform) in &mut sprites {
        let origin = viewport.cell_origin(cell.coord) + viewport.offset();
        let center = origin + Vec2::splat(scale / 2.0);
        transform.translation = pixel_to_world(center, window).extend(1.0);
        sprite.custom_size = Some(Vec2::splat(size));
    }
}

/// Draw the visible grid lines with gizmos.
pub fn draw_grid_lines(
    mut gizmos: Gizmos,
    viewport: Res<Viewport>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    let scale = viewport.scale() as f32;
    let offset = viewport.offset();

    let mut x = offset.x.rem_euclid(scale);
    while x <= width {
        gizmos.line_2d(
            pixel_to_world(Vec2::new(x, 0.0), window),
            pixel_to_world(Vec2::new(x, height), window),
            GRID_LINE_COLOR,
        );
        x += scale;
    }

    let mut y = offset.y.rem_euclid(scale);
    while y <= height {
        gizmos.line_2d(
            pixel_to_world(Vec2::new(0.0, y), window),
            pixel_to_world(Vec2::new(width, y), window),
            GRID_LINE_COLOR,
        );
        y += scale;
    }
}
