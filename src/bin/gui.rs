use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use town_quest::config::GRID_SIZE;
use town_quest::{
	format_arrival, format_hud, format_side_panel, ActionOutcome, Cell, Difficulty, Engine, GameMode, GameSnapshot,
	GridPos, JsonFileStore, MoveError, PlayerId, RoadStyle, SystemClock, TileKind,
	GO_FORWARD_LABEL, RESTART_LABEL, REWARDS_PANEL_HEADING, TURN_LEFT_LABEL, TURN_RIGHT_LABEL,
};
use town_quest::Direction as Facing;

// ---------- Constants ----------
const TILE_SIZE: f32 = 64.0;
const STORE_PATH: &str = "town_quest_save.json";
const TOAST_SECONDS: f32 = 4.0;

// ---------- Components ----------
#[derive(Component)]
struct TilePos {
	x: i32,
	y: i32,
}

#[derive(Component)]
struct MapSprite; // Marker to despawn/rebuild when the engine revision changes

// ---------- Resources ----------
#[derive(Resource, Default)]
struct UiState {
	toast: Option<(String, f32)>, // (message, remaining_seconds)
	drawn_revision: Option<u64>,
	reward_edits: Vec<(String, String)>,
}

#[derive(Resource)]
struct GameEngine {
	engine: Engine,
}

// ---------- Entry ----------
fn main() {
	App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Town Quest".to_string(),
				resolution: (1280, 800).into(),
				..Default::default()
			}),
			..Default::default()
		}))
		.add_plugins(EguiPlugin::default())
		// Resources
		.insert_resource(UiState::default())
		.insert_resource(GameEngine {
			engine: Engine::with_entropy(JsonFileStore::open(STORE_PATH), SystemClock),
		})
		// Setup
		.add_systems(Startup, setup_camera)
		// Frame systems
		.add_systems(
			Update,
			(handle_keyboard, handle_hover, tick_engine, rebuild_map_when_changed, update_toast_timer),
		)
		.add_systems(EguiPrimaryContextPass, draw_ui)
		.run();
}

// ---------- Setup ----------
fn setup_camera(mut commands: Commands) {
	let center = GRID_SIZE as f32 * TILE_SIZE * 0.5;
	commands.spawn((Camera2d, Transform::from_xyz(center, center, 1000.0)));
}

// ---------- Utilities ----------
fn cell_color(cell: Cell) -> Color {
	match (cell.kind, cell.road_style) {
		(TileKind::Grass, _) => Color::srgb(0.49, 0.78, 0.31),
		(TileKind::Building, _) => Color::srgb(0.45, 0.42, 0.50),
		(TileKind::Road, Some(RoadStyle::Street)) => Color::srgb_u8(0x7f, 0x8c, 0x8d),
		(TileKind::Road, Some(RoadStyle::Avenue)) => Color::srgb_u8(0x6c, 0x7a, 0x89),
		(TileKind::Road, _) => Color::srgb_u8(0x95, 0xa5, 0xa6),
	}
}

fn player_color(id: PlayerId) -> Color {
	match id {
		PlayerId::One => Color::srgb(0.20, 0.40, 0.90),
		PlayerId::Two => Color::srgb(0.90, 0.25, 0.25),
	}
}

/// Row 0 is the top of the map; bevy's y axis points up.
fn tile_center(p: GridPos, z: f32) -> Vec3 {
	Vec3::new(
		p.x as f32 * TILE_SIZE + TILE_SIZE * 0.5,
		(GRID_SIZE - 1 - p.y) as f32 * TILE_SIZE + TILE_SIZE * 0.5,
		z,
	)
}

fn world_to_grid(p: Vec2) -> GridPos {
	let x = (p.x / TILE_SIZE).floor() as i32;
	let row = (p.y / TILE_SIZE).floor() as i32;
	GridPos::new(x, GRID_SIZE - 1 - row)
}

fn screen_to_world_2d(camera_q: &Query<(&Camera, &GlobalTransform)>, screen_pos: Vec2) -> Option<Vec2> {
	let (camera, camera_transform) = camera_q.single().ok()?;
	camera.viewport_to_world_2d(camera_transform, screen_pos).ok()
}

fn set_toast(ui: &mut UiState, msg: impl Into<String>) {
	ui.toast = Some((msg.into(), TOAST_SECONDS));
}

fn report_step(ui: &mut UiState, result: Result<ActionOutcome, MoveError>) {
	match result {
		Ok(ActionOutcome::Moved { arrival: Some(a), .. }) => set_toast(ui, format_arrival(&a)),
		Ok(_) => {}
		Err(e) => set_toast(ui, e.to_string()),
	}
}

// ---------- Systems: Input ----------
fn handle_keyboard(
	keys: Res<ButtonInput<KeyCode>>,
	mut egui_ctx: EguiContexts,
	mut eng: ResMut<GameEngine>,
	mut ui: ResMut<UiState>,
) {
	let text_focus = egui_ctx.ctx_mut().is_ok_and(|ctx| ctx.wants_keyboard_input());
	apply_arrow_keys(&keys, text_focus, &mut eng.engine, &mut ui);
}

/// Arrow keys belong to the reward editor while a text field has focus.
fn apply_arrow_keys(keys: &ButtonInput<KeyCode>, text_focus: bool, engine: &mut Engine, ui: &mut UiState) {
	if text_focus {
		return;
	}
	if keys.just_pressed(KeyCode::ArrowLeft) {
		engine.turn_left();
	}
	if keys.just_pressed(KeyCode::ArrowRight) {
		engine.turn_right();
	}
	if keys.just_pressed(KeyCode::ArrowUp) {
		let result = engine.go_forward();
		report_step(ui, result);
	}
}

fn handle_hover(
	windows: Query<&Window, With<PrimaryWindow>>,
	q_cam: Query<(&Camera, &GlobalTransform)>,
	mut eng: ResMut<GameEngine>,
) {
	let window = if let Ok(w) = windows.single() { w } else { return };
	let cell = window
		.cursor_position()
		.and_then(|cursor| screen_to_world_2d(&q_cam, cursor))
		.map(world_to_grid);
	eng.engine.hover(cell);
}

// ---------- Systems: Engine ----------
fn tick_engine(mut eng: ResMut<GameEngine>, mut ui: ResMut<UiState>) {
	if eng.engine.tick() {
		if let Some(place) = eng.engine.destination() {
			let msg = format!("New destination: {} {}", place.kind.emoji(), place.name());
			set_toast(&mut ui, msg);
		}
	}
}

// ---------- Systems: Map Rendering ----------
fn rebuild_map_when_changed(
	mut commands: Commands,
	mut ui: ResMut<UiState>,
	eng: Res<GameEngine>,
	existing: Query<Entity, With<MapSprite>>,
) {
	let revision = eng.engine.revision();
	if ui.drawn_revision == Some(revision) {
		return;
	}
	for e in &existing {
		commands.entity(e).despawn();
	}
	spawn_map(&mut commands, &eng.engine.snapshot());
	ui.drawn_revision = Some(revision);
}

fn spawn_map(commands: &mut Commands, snap: &GameSnapshot) {
	let tile = Vec2::splat(TILE_SIZE - 2.0);
	for (pos, cell) in snap.grid.iter_cells() {
		commands.spawn((
			Sprite::from_color(cell_color(cell), tile),
			Transform::from_translation(tile_center(pos, 0.0)),
			TilePos { x: pos.x, y: pos.y },
			MapSprite,
		));
	}

	if let Some(dest) = snap.destination {
		commands.spawn((
			Sprite::from_color(Color::srgb(1.0, 0.84, 0.0), Vec2::splat(TILE_SIZE * 0.8)),
			Transform::from_translation(tile_center(dest.pos, 1.0)),
			MapSprite,
		));
	}
	for place in snap.grid.places() {
		let (r, g, b) = place.kind.color();
		commands.spawn((
			Sprite::from_color(Color::srgb_u8(r, g, b), Vec2::splat(TILE_SIZE * 0.6)),
			Transform::from_translation(tile_center(place.pos, 2.0)),
			MapSprite,
		));
	}

	for (id, player) in snap.players.iter() {
		let body = tile_center(player.pos, 3.0);
		commands.spawn((
			Sprite::from_color(player_color(id), Vec2::splat(TILE_SIZE * 0.45)),
			Transform::from_translation(body),
			MapSprite,
		));
		commands.spawn((
			Sprite::from_color(Color::srgb(0.1, 0.1, 0.1), Vec2::splat(TILE_SIZE * 0.15)),
			Transform::from_translation(body + facing_offset(player.facing)),
			MapSprite,
		));
	}

	if let Some((pos, _)) = snap.hover {
		commands.spawn((
			Sprite::from_color(Color::srgba(1.0, 1.0, 1.0, 0.25), Vec2::splat(TILE_SIZE)),
			Transform::from_translation(tile_center(pos, 5.0)),
			MapSprite,
		));
	}
}

fn facing_offset(facing: Facing) -> Vec3 {
	let (dx, dy) = facing.delta();
	Vec3::new(dx as f32, -dy as f32, 1.0) * Vec3::new(TILE_SIZE * 0.3, TILE_SIZE * 0.3, 1.0)
}

// ---------- Systems: Toast ----------
fn update_toast_timer(time: Res<Time>, mut ui: ResMut<UiState>) {
	if let Some((_, ref mut remaining)) = ui.toast {
		*remaining -= time.delta_secs();
		if *remaining <= 0.0 {
			ui.toast = None;
		}
	}
}

// ---------- Systems: UI ----------
fn draw_ui(mut egui_ctx: EguiContexts, mut ui: ResMut<UiState>, mut eng: ResMut<GameEngine>) {
	if let Ok(ctx) = egui_ctx.ctx_mut() {

	let snap = eng.engine.snapshot();

	// Top HUD
	egui::TopBottomPanel::top("top_hud").show(&*ctx, |ui_top| {
		ui_top.horizontal(|ui_row| {
			ui_row.label(format_hud(&snap));
			ui_row.separator();
			ui_row.label(format!("Time: {:.0}s", eng.engine.trip_elapsed_seconds().floor()));
			if let Some((_, target)) = snap.hover {
				ui_row.separator();
				ui_row.label(target.label());
			}
			if let Some((ref msg, _)) = ui.toast {
				ui_row.separator();
				ui_row.colored_label(egui::Color32::YELLOW, msg);
			}
		});
	});

	// Right panel (status, controls, settings, rewards)
	egui::SidePanel::right("right_panel")
		.resizable(true)
		.default_width(300.0)
		.show(&*ctx, |ui_right| {
			for line in format_side_panel(&snap) {
				ui_right.label(line);
			}
			ui_right.separator();

			ui_right.horizontal(|ui_row| {
				if ui_row.button(TURN_LEFT_LABEL).clicked() {
					eng.engine.turn_left();
				}
				if ui_row.button(GO_FORWARD_LABEL).clicked() {
					let result = eng.engine.go_forward();
					report_step(&mut ui, result);
				}
				if ui_row.button(TURN_RIGHT_LABEL).clicked() {
					eng.engine.turn_right();
				}
			});
			if ui_right.button(RESTART_LABEL).clicked() {
				eng.engine.restart();
				set_toast(&mut ui, "Game restarted!");
			}
			ui_right.separator();

			let mut difficulty = snap.difficulty;
			egui::ComboBox::from_label("Difficulty")
				.selected_text(difficulty.label())
				.show_ui(ui_right, |ui_combo| {
					for d in Difficulty::ALL {
						ui_combo.selectable_value(&mut difficulty, d, d.label());
					}
				});
			if difficulty != snap.difficulty {
				eng.engine.set_difficulty(difficulty);
			}

			let mut mode = snap.mode;
			egui::ComboBox::from_label("Mode")
				.selected_text(mode.label())
				.show_ui(ui_right, |ui_combo| {
					for m in [GameMode::Single, GameMode::TwoPlayer] {
						ui_combo.selectable_value(&mut mode, m, m.label());
					}
				});
			if mode != snap.mode {
				eng.engine.set_game_mode(mode);
			}
			ui_right.separator();

			ui_right.collapsing(REWARDS_PANEL_HEADING, |ui_rewards| {
				if ui.reward_edits.is_empty() {
					ui.reward_edits = eng
						.engine
						.rewards()
						.catalog
						.entries()
						.iter()
						.map(|e| (e.emoji.clone(), e.name.clone()))
						.collect();
				}
				for (emoji, name) in ui.reward_edits.iter_mut() {
					ui_rewards.horizontal(|ui_row| {
						ui_row.add(egui::TextEdit::singleline(emoji).desired_width(40.0));
						ui_row.add(egui::TextEdit::singleline(name));
					});
				}
				ui_rewards.horizontal(|ui_row| {
					if ui_row.button("Add").clicked() {
						ui.reward_edits.push((String::new(), String::new()));
					}
					if ui_row.button("Save").clicked() {
						let edits = ui.reward_edits.clone();
						match eng.engine.update_rewards(&edits) {
							Ok(()) => set_toast(&mut ui, "Rewards configuration saved!"),
							Err(e) => set_toast(&mut ui, e.to_string()),
						}
					}
					if ui_row.button("Reset today's count").clicked() {
						eng.engine.reset_daily_rewards();
						set_toast(&mut ui, "Daily rewards reset!");
					}
				});
			});
		});

	} // end if Ok(ctx)
}

#[cfg(test)]
mod tests {
	use super::*;
	use bevy::prelude::{MinimalPlugins, TransformPlugin};
	use town_quest::{ManualClock, MemoryStore, CONTROL_LABELS};

	fn test_engine() -> Engine {
		let now = chrono::NaiveDate::from_ymd_opt(2026, 10, 17)
			.and_then(|d| d.and_hms_opt(9, 0, 0))
			.expect("valid test date");
		Engine::with_seed(MemoryStore::new(), ManualClock::new(now), 5)
	}

	#[test]
	fn grid_round_trips_through_world_space() {
		for (x, y) in [(0, 0), (3, 7), (9, 9)] {
			let p = GridPos::new(x, y);
			let c = tile_center(p, 0.0);
			assert_eq!(world_to_grid(Vec2::new(c.x, c.y)), p);
		}
	}

	#[test]
	fn map_sprites_cover_every_tile() {
		let mut app = App::new();
		app.add_plugins((MinimalPlugins, TransformPlugin));
		app.insert_resource(GameEngine { engine: test_engine() });
		app.insert_resource(UiState::default());
		app.add_systems(Update, rebuild_map_when_changed);

		app.update();
		let mut tile_query = app.world_mut().query::<&TilePos>();
		let tiles = tile_query.iter(app.world()).count();
		assert_eq!(tiles, (GRID_SIZE * GRID_SIZE) as usize);
		let tiles_at_origin = tile_query.iter(app.world()).filter(|t| t.x == 0 && t.y == 0).count();

		// An unchanged engine does not respawn the map.
		let mut sprite_query = app.world_mut().query::<&MapSprite>();
		let before = sprite_query.iter(app.world()).count();
		app.update();
		let after = sprite_query.iter(app.world()).count();
		assert_eq!(before, after);
		assert_eq!(tiles_at_origin, 1);
	}

	#[test]
	fn control_labels_are_exposed() {
		for expected in [TURN_LEFT_LABEL, GO_FORWARD_LABEL, TURN_RIGHT_LABEL, RESTART_LABEL] {
			assert!(CONTROL_LABELS.contains(&expected));
		}
	}

	#[test]
	fn arrow_keys_are_ignored_while_editing_text() {
		let mut engine = test_engine();
		let mut ui = UiState::default();
		let mut keys = ButtonInput::<KeyCode>::default();
		keys.press(KeyCode::ArrowRight);

		let facing = engine.players().active().facing;
		apply_arrow_keys(&keys, true, &mut engine, &mut ui);
		assert_eq!(engine.players().active().facing, facing);

		apply_arrow_keys(&keys, false, &mut engine, &mut ui);
		assert_eq!(engine.players().active().facing, facing.turned_right());
	}
}
