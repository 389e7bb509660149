//! On-screen status readout: generation, population, rate, and FPS.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::grid::LifeGrid;
use crate::scheduler::{SimStats, TickScheduler};
use crate::viewport::Viewport;

#[derive(Component)]
pub struct HudText;

pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.88, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
        HudText,
    ));
}

pub fn update_hud(
    mut hud: Query<&mut Text, With<HudText>>,
    grid: Res<LifeGrid>,
    scheduler: Res<TickScheduler>,
    viewport: Res<Viewport>,
    stats: Res<SimStats>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let Ok(mut text) = hud.get_single_mut() else {
        return;
    };
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    let state = if scheduler.is_running() {
        "running"
    } else {
        "paused"
    };
    text.0 = format!(
        "gen {}  |  pop {}  |  {state}  |  {:.0} tps  |  {} px/cell  |  {fps:.0} fps",
        stats.generation,
        grid.population(),
        scheduler.rate(),
        viewport.scale(),
    );
}
