use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use clap::Parser;
use log::{error, info};
use rand::Rng;

use lifecanvas::config::{Cli, Config};
use lifecanvas::grid::{CellCoord, LifeGrid};
use lifecanvas::hud::{setup_hud, update_hud};
use lifecanvas::input::{pointer_input, PointerSession};
use lifecanvas::render::{draw_grid_lines, layout_cell_sprites, sync_cell_sprites, CellSprites};
use lifecanvas::scheduler::{SimStats, TickScheduler};
use lifecanvas::viewport::Viewport;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => match Config::from_path(path) {
            Ok(config) => config,
            Err(err) => {
                error!("{err}");
                std::process::exit(1);
            }
        },
        None => Config::load_default(),
    }
    .apply_cli(&cli);

    info!(
        "starting at {:.0} ticks/s, {} px cells",
        config.tick_rate, config.cell_size
    );

    let scheduler = TickScheduler::new(config.tick_rate);
    let viewport = Viewport::new(config.cell_size);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "lifecanvas".into(),
                resolution: (1200.0, 800.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .insert_resource(config)
        .insert_resource(scheduler)
        .insert_resource(viewport)
        .init_resource::<LifeGrid>()
        .init_resource::<PointerSession>()
        .init_resource::<CellSprites>()
        .init_resource::<SimStats>()
        .add_systems(Startup, (setup_camera, setup_hud))
        .add_systems(
            Update,
            (
                handle_keyboard,
                pointer_input.after(handle_keyboard),
                run_ticks.after(pointer_input),
                sync_cell_sprites.after(run_ticks),
                layout_cell_sprites.after(sync_cell_sprites),
                draw_grid_lines,
                update_hud,
            ),
        )
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Drain due ticks from the scheduler and advance the grid for each one.
fn run_ticks(
    time: Res<Time>,
    mut scheduler: ResMut<TickScheduler>,
    mut grid: ResMut<LifeGrid>,
    mut stats: ResMut<SimStats>,
) {
    for _ in 0..scheduler.advance(time.delta()) {
        grid.step();
        stats.generation += 1;
    }
}

/// Simulation hotkeys. Space is reserved for the drag-pan modifier, so P
/// toggles play/pause instead.
fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut scheduler: ResMut<TickScheduler>,
    mut grid: ResMut<LifeGrid>,
    mut viewport: ResMut<Viewport>,
    mut stats: ResMut<SimStats>,
    config: Res<Config>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::KeyP) {
        if scheduler.is_running() {
            scheduler.stop();
        } else {
            scheduler.start();
        }
    }

    // Single step works whether running or paused, and leaves the scheduler's
    // running flag and tick phase alone.
    if keys.just_pressed(KeyCode::KeyS) {
        grid.step();
        stats.generation += 1;
    }

    if keys.just_pressed(KeyCode::KeyC) {
        grid.clear();
        stats.generation = 0;
        info!("grid cleared");
    }

    if keys.just_pressed(KeyCode::Equal) {
        let rate = scheduler.rate();
        scheduler.set_rate(rate * 1.25);
    }
    if keys.just_pressed(KeyCode::Minus) {
        let rate = scheduler.rate();
        scheduler.set_rate(rate * 0.8);
    }

    if keys.just_pressed(KeyCode::BracketRight) {
        let scale = viewport.scale();
        viewport.set_scale(scale + 1);
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        let scale = viewport.scale();
        viewport.set_scale(scale.saturating_sub(1));
    }

    if keys.just_pressed(KeyCode::KeyN) {
        if let Ok(window) = windows.get_single() {
            scatter_noise(&mut grid, &viewport, window, config.noise_density);
        }
    }
}

/// Sprinkle random live cells over the visible region.
fn scatter_noise(grid: &mut LifeGrid, viewport: &Viewport, window: &Window, density: f32) {
    let mut rng = rand::thread_rng();
    let top_left = viewport.cell_at(Vec2::ZERO);
    let bottom_right = viewport.cell_at(Vec2::new(window.width(), window.height()));
    for y in top_left.y..=bottom_right.y {
        for x in top_left.x..=bottom_right.x {
            if rng.gen::<f32>() < density {
                grid.set_alive(CellCoord::new(x, y));
            }
        }
    }
    info!("noise scatter, population now {}", grid.population());
}
