//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World layout ---

/// Playfield width in pixels.
pub const WORLD_WIDTH: f32 = 1280.0;

/// Full screen height in pixels, including the HUD strip.
pub const WORLD_HEIGHT: f32 = 720.0;

/// Height of the HUD strip along the bottom edge. Nothing is simulated there.
pub const HUD_HEIGHT: f32 = 80.0;

/// Edge length of one tower-grid tile.
pub const TILE_SIZE: f32 = 32.0;

// --- Castle ---

pub const CASTLE_X: f32 = 640.0;
pub const CASTLE_Y: f32 = 360.0;

/// Castle footprint edge length.
pub const CASTLE_SIZE: f32 = 128.0;

pub const CASTLE_MAX_HEALTH: f32 = 500.0;

/// Clear zone (in tiles) kept free of towers around the castle footprint.
pub const CASTLE_BUILD_BUFFER_TILES: f32 = 2.0;

// --- Routes ---

/// Rendered route width. Half of it counts toward placement clearance.
pub const PATH_WIDTH: f32 = 40.0;

/// Extra clearance between a tower edge and a route edge.
pub const PATH_PLACEMENT_MARGIN: f32 = 10.0;

/// Distance under which an enemy counts as having reached its waypoint.
pub const WAYPOINT_REACHED_DISTANCE: f32 = 20.0;

// --- Player avatar ---

pub const PLAYER_START_X: f32 = 400.0;
pub const PLAYER_START_Y: f32 = 300.0;
pub const PLAYER_SPEED: f32 = 200.0;
pub const PLAYER_SIZE: f32 = 32.0;

/// Melee reach measured center to center.
pub const PLAYER_ATTACK_RANGE: f32 = 45.0;

/// Melee swings per second.
pub const PLAYER_ATTACK_RATE: f32 = 1.5;

/// Swing animation length. The avatar cannot move while swinging.
pub const PLAYER_ATTACK_DURATION: f32 = 0.3;

/// Distance enemies are shoved away from the avatar on hit.
pub const PLAYER_KNOCKBACK: f32 = 20.0;

// --- Character progression ---

pub const CHARACTER_BASE_HEALTH: u32 = 100;
pub const CHARACTER_HEALTH_PER_LEVEL: u32 = 2;
pub const CHARACTER_BASE_ATTACK: u32 = 35;
pub const CHARACTER_ATTACK_PER_LEVEL: u32 = 1;

/// Experience needed to go from level 1 to level 2.
pub const EXP_BASE_REQUIREMENT: f64 = 100.0;

/// Growth factor of the per-level experience requirement.
pub const EXP_GROWTH_RATE: f64 = 1.5;

pub const EXP_PER_KILL: u32 = 25;

pub const DEFAULT_CHARACTER_NAME: &str = "Thranduil";

// --- Enemies ---

pub const ORC_HEALTH: f32 = 30.0;
pub const ORC_SPEED: f32 = 50.0;
pub const ORC_DAMAGE: f32 = 10.0;
pub const ORC_SIZE: f32 = 24.0;

pub const URUK_HAI_HEALTH: f32 = 50.0;
pub const URUK_HAI_SPEED: f32 = 60.0;
pub const URUK_HAI_DAMAGE: f32 = 15.0;
pub const URUK_HAI_SIZE: f32 = 28.0;

/// First wave in which Uruk-hai may appear.
pub const URUK_HAI_START_WAVE: u32 = 3;

/// Share of Orcs once Uruk-hai are unlocked.
pub const ORC_SPAWN_RATIO: f64 = 0.7;

/// Enemy attacks per second (ranged and melee).
pub const ENEMY_ATTACK_RATE: f32 = 2.5;

/// Strict range within which an enemy may shoot at its target tower.
pub const ENEMY_ATTACK_RANGE: f32 = 200.0;

/// Range at which a moving enemy notices a tower.
pub const ENEMY_DETECTION_RANGE: f32 = 220.0;

/// Distance to the castle at which an enemy settles into a permanent siege.
pub const ENEMY_SIEGE_DISTANCE: f32 = 250.0;

pub const ENEMY_PROJECTILE_SPEED: f32 = 250.0;
pub const ENEMY_PROJECTILE_DAMAGE: f32 = 1.0;

// --- Towers ---

pub const TOWER_COST: u32 = 50;
pub const TOWER_SIZE: f32 = 32.0;
pub const TOWER_MAX_LEVEL: u32 = 5;

pub const TOWER_BASE_HEALTH: f32 = 100.0;
pub const TOWER_HEALTH_PER_LEVEL: f32 = 25.0;
pub const TOWER_BASE_DAMAGE: f32 = 25.0;
pub const TOWER_DAMAGE_PER_LEVEL: f32 = 8.0;

/// Shots per second at level 1.
pub const TOWER_BASE_FIRE_RATE: f32 = 1.0;

/// Fire-rate gain granted on every second level.
pub const TOWER_FIRE_RATE_BONUS_PER_2_LEVELS: f32 = 0.2;

/// Targeting range. Constant across levels.
pub const TOWER_RANGE: f32 = 150.0;

/// Upgrade costs keyed by target level.
pub const TOWER_UPGRADE_COSTS: [(u32, u32); 4] = [(2, 75), (3, 100), (4, 150), (5, 200)];

pub const TOWER_REPAIR_BASE_COST: u32 = 25;
pub const TOWER_REPAIR_COST_PER_LEVEL: u32 = 10;

/// Share of max health restored by one repair.
pub const TOWER_REPAIR_FRACTION: f32 = 0.5;

// --- Allies ---

pub const ALLY_COST: u32 = 75;
pub const ALLY_HEALTH: f32 = 60.0;
pub const ALLY_DAMAGE: f32 = 20.0;
pub const ALLY_SPEED: f32 = 80.0;
pub const ALLY_SIZE: f32 = 28.0;
pub const ALLY_ATTACK_RANGE: f32 = 100.0;
pub const ALLY_ATTACK_RATE: f32 = 1.5;

/// Seconds between wander heading changes.
pub const ALLY_WANDER_INTERVAL: f32 = 3.0;

/// Speed multiplier while wandering.
pub const ALLY_WANDER_SPEED_FACTOR: f32 = 0.3;

/// Allies stop closing in once within this share of their attack range.
pub const ALLY_APPROACH_FACTOR: f32 = 0.8;

pub const ALLY_SPAWN_MIN_DISTANCE: f32 = 40.0;
pub const ALLY_SPAWN_MAX_DISTANCE: f32 = 80.0;

// --- Projectiles ---

pub const ARROW_SPEED: f32 = 300.0;
pub const ARROW_SIZE: f32 = 8.0;

/// Seconds before an unspent projectile expires.
pub const PROJECTILE_LIFETIME: f32 = 5.0;

// --- Wave spawning ---

pub const WAVE_BASE_ENEMY_COUNT: u32 = 5;
pub const WAVE_ENEMY_COUNT_MULTIPLIER: f64 = 1.3;

/// Minimum seconds between the starts of consecutive waves.
pub const WAVE_DELAY_SECS: f64 = 5.0;

/// Maximum per-axis offset applied to spawn points.
pub const SPAWN_JITTER: i32 = 50;

// --- Economy and score ---

pub const STARTING_ESSENCE: u32 = 100;
pub const ESSENCE_PER_KILL: u32 = 15;

/// Kill score is this factor times the enemy's max health.
pub const SCORE_PER_ENEMY_HEALTH: u32 = 10;

pub const SCORE_PER_TOWER_BUILT: u32 = 10;
pub const SCORE_PER_TOWER_UPGRADE: u32 = 15;

/// Number of entries kept on the high-score table.
pub const HIGH_SCORE_SLOTS: usize = 10;
