// Play field geometry, in field pixels. These are the original tuning values;
// collision difficulty is calibrated against them, so don't retune casually.
pub const BIRD_HEIGHT: i32 = 28;
pub const BIRD_WIDTH: i32 = 33;
pub const BIRD_LEFT: i32 = 100;
pub const WALL_HEIGHT: i32 = 600;
pub const WALL_WIDTH: i32 = 400;
pub const OBJ_WIDTH: i32 = 52;
pub const OBJ_GAP: i32 = 200;

// Motion per tick
pub const GRAVITY: i32 = 8;
pub const OBJ_SPEED: i32 = 6;

// Bird starting row and the upward impulse applied per flap. A flap from
// above row BIRD_HEIGHT clamps to the ceiling instead of going negative.
pub const BIRD_START_Y: i32 = 300;
pub const IMPULSE: i32 = 50;

// Horizontal hit window: the obstacle collides with the bird while its x is
// within [OBJ_WIDTH, OBJ_WIDTH + HIT_WINDOW], inclusive on both ends.
pub const HIT_WINDOW: i32 = 80;

// Timer periods
pub const GRAVITY_TICK_MS: u64 = 24;
pub const OBSTACLE_TICK_MS: u64 = 50;
pub const COUNTDOWN_TICK_MS: u64 = 1000;

// Seconds the exit action stays locked after game over
pub const COUNTDOWN_START: u32 = 3;

// Main loop input poll interval
pub const INPUT_POLL_MS: u64 = 10;
