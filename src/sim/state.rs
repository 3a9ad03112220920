//! World state and entity types
//!
//! The `World` owns every entity collection. Collections are kept in entity-id
//! order so iteration (and therefore collision crediting) is deterministic.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::{
    ConfigError, ProjectileConfig, SpawnPolicy, WorldConfig, finite, non_negative,
};
use super::geometry::Rect;
use super::snapshot::{EnemyView, Snapshot, StarView};

/// PCG stream used for gameplay draws (spawns, enemy colors)
const GAMEPLAY_STREAM: u64 = 0;
/// PCG stream used for the starfield, kept apart so stars never shift spawns
const STARFIELD_STREAM: u64 = 1;

/// Stars fall between these speeds (units per tick)
const STAR_SPEED_MIN: f32 = 1.0;
const STAR_SPEED_MAX: f32 = 3.0;
/// Star diameters are whole units in this inclusive range
const STAR_SIZE_MIN: u8 = 1;
const STAR_SIZE_MAX: u8 = 3;

/// Render-only enemy tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Bluish-violet palette used by randomly spawned enemies
    pub fn random(rng: &mut impl Rng) -> Self {
        let r = rng.random_range(100..=254u8);
        let g = rng.random_range(50..=254u8);
        Self { r, g, b: 255 - g / 2 }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Player {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            pos: config.player.start,
            size: config.player.size,
            speed: config.player.speed,
            moving_left: false,
            moving_right: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.pos, self.size)
    }

    /// Where a fired projectile appears: centered on the nose (rounded down
    /// to a whole unit), `muzzle_lift` above the ship's top edge
    pub fn muzzle(&self, projectile: &ProjectileConfig) -> Vec2 {
        Vec2::new(
            self.pos.x + ((self.size.x - projectile.size.x) / 2.0).floor(),
            self.pos.y - projectile.muzzle_lift,
        )
    }

    /// Apply movement intents; right wins when both are held
    pub fn update(&mut self, max_x: f32) {
        let dx = if self.moving_right {
            self.speed
        } else if self.moving_left {
            -self.speed
        } else {
            0.0
        };
        self.pos.x = (self.pos.x + dx).clamp(0.0, max_x);
    }
}

/// A shot travelling up the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Projectile {
    pub fn update(&mut self) {
        self.pos.y -= self.speed;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.pos, self.size)
    }

    /// Past the top edge of the field
    pub fn is_expired(&self) -> bool {
        self.pos.y < 0.0
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub color: Rgb,
}

impl Enemy {
    pub fn update(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.pos, Vec2::splat(self.size))
    }
}

/// A background star (not gameplay-affecting)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Star {
    pub fn random(field: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..field.x).floor(),
                rng.random_range(0.0..field.y).floor(),
            ),
            size: rng.random_range(STAR_SIZE_MIN..=STAR_SIZE_MAX) as f32,
            speed: rng.random_range(STAR_SPEED_MIN..STAR_SPEED_MAX),
        }
    }

    /// Fall, wrapping to the top at a fresh column after leaving the bottom
    pub fn update(&mut self, field: Vec2, rng: &mut impl Rng) {
        self.pos.y += self.speed;
        if self.pos.y > field.y {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0.0..field.x).floor();
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A projectile left the top of the field
    ProjectileExpired { id: u32 },
    /// A single enemy entered under the random policy
    EnemySpawned { id: u32 },
    /// A full wave entered under the wave policy
    WaveSpawned { wave: u32, speed: f32 },
    /// An enemy passed the escape line
    EnemyEscaped { id: u32 },
    /// A projectile destroyed an enemy; `score` is the new total
    EnemyDestroyed {
        enemy_id: u32,
        projectile_id: u32,
        score: u64,
    },
    /// An enemy rammed the player
    PlayerHit { enemy_id: u32 },
}

/// The complete simulation
#[derive(Debug, Clone)]
pub struct World {
    pub(super) config: WorldConfig,
    pub(super) seed: u64,
    /// Gameplay RNG (spawn rolls, positions, speeds, colors)
    pub(super) rng: Pcg32,
    /// Starfield RNG
    pub(super) star_rng: Pcg32,
    pub(super) player: Player,
    pub(super) projectiles: Vec<Projectile>,
    pub(super) enemies: Vec<Enemy>,
    pub(super) stars: Vec<Star>,
    pub(super) score: u64,
    pub(super) game_over: bool,
    /// Waves spawned since the last reset
    pub(super) wave: u32,
    /// Speed given to the most recent wave
    pub(super) wave_speed: f32,
    /// Ticks simulated since the last reset
    pub(super) tick_count: u64,
    next_id: u32,
}

impl World {
    /// Build a world in its freshly-reset state
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut star_rng = Pcg32::new(seed, STARFIELD_STREAM);
        let field = Vec2::new(config.field_width, config.field_height);
        let stars = (0..config.star_count)
            .map(|_| Star::random(field, &mut star_rng))
            .collect();

        let mut world = Self {
            player: Player::new(&config),
            seed,
            rng: Pcg32::new(seed, GAMEPLAY_STREAM),
            star_rng,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            stars,
            score: 0,
            game_over: false,
            wave: 0,
            wave_speed: 0.0,
            tick_count: 0,
            next_id: 1,
            config,
        };
        world.populate();

        log::info!(
            "World created: {}x{} field, seed {}",
            world.config.field_width,
            world.config.field_height,
            seed
        );
        Ok(world)
    }

    /// Start a new run. Stars keep falling and the RNG streams continue.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.config);
        self.projectiles.clear();
        self.enemies.clear();
        self.score = 0;
        self.game_over = false;
        self.wave = 0;
        self.tick_count = 0;
        self.populate();
        log::info!("World reset");
    }

    /// Initial enemy set for a fresh run
    fn populate(&mut self) {
        if let SpawnPolicy::Wave { speed, .. } = self.config.spawn {
            self.wave_speed = speed;
            self.spawn_wave();
        }
    }

    /// Fire one projectile from the ship's nose. Ignored after game over.
    pub fn fire(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let projectile = Projectile {
            id: self.next_entity_id(),
            pos: self.player.muzzle(&self.config.projectile),
            size: self.config.projectile.size,
            speed: self.config.projectile.speed,
        };
        log::debug!("Projectile {} fired at {}", projectile.id, projectile.pos);
        self.projectiles.push(projectile);
        true
    }

    /// Place a single enemy. Ignored after game over, and rejected when the
    /// position is not finite or the speed is negative or not finite.
    pub fn spawn_enemy_at(&mut self, x: f32, y: f32, speed: f32) -> Option<u32> {
        if self.game_over {
            return None;
        }
        let checked = finite("x", x)
            .and_then(|_| finite("y", y))
            .and_then(|_| non_negative("speed", speed));
        if let Err(e) = checked {
            log::warn!("Rejected enemy spawn: {}", e);
            return None;
        }
        let color = match self.config.spawn {
            SpawnPolicy::Wave { .. } => Rgb::RED,
            SpawnPolicy::Random { .. } => Rgb::random(&mut self.rng),
        };
        Some(self.push_enemy(Vec2::new(x, y), speed, color))
    }

    pub(super) fn push_enemy(&mut self, pos: Vec2, speed: f32, color: Rgb) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            size: self.config.enemy_size,
            speed,
            color,
        });
        id
    }

    /// Spawn a full row. Every wave after the first is faster.
    pub(super) fn spawn_wave(&mut self) -> Option<GameEvent> {
        let SpawnPolicy::Wave {
            count,
            x,
            spacing,
            y,
            speed_step,
            ..
        } = self.config.spawn
        else {
            return None;
        };

        if self.wave > 0 {
            self.wave_speed += speed_step;
        }
        self.wave += 1;

        for i in 0..count {
            let pos = Vec2::new(x + i as f32 * spacing, y);
            self.push_enemy(pos, self.wave_speed, Rgb::RED);
        }

        log::info!("Wave {} spawned at speed {}", self.wave, self.wave_speed);
        Some(GameEvent::WaveSpawned {
            wave: self.wave,
            speed: self.wave_speed,
        })
    }

    /// Allocate a new entity ID
    pub(super) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick_count,
            field: Vec2::new(self.config.field_width, self.config.field_height),
            player: self.player.bounds(),
            projectiles: self.projectiles.iter().map(Projectile::bounds).collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    rect: e.bounds(),
                    color: e.color,
                })
                .collect(),
            stars: self
                .stars
                .iter()
                .map(|s| StarView {
                    pos: s.pos,
                    size: s.size,
                })
                .collect(),
            score: self.score,
            game_over: self.game_over,
            wave: self.wave,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn wave_speed(&self) -> f32 {
        self.wave_speed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_arcade_world() {
        let world = World::new(WorldConfig::arcade(), 7).unwrap();
        assert_eq!(world.score(), 0);
        assert!(!world.is_game_over());
        assert!(world.enemies().is_empty());
        assert_eq!(world.stars().len(), 80);
        assert_eq!(world.player().pos, Vec2::new(380.0, 500.0));
    }

    #[test]
    fn test_new_classic_world_has_wave() {
        let world = World::new(WorldConfig::classic(), 7).unwrap();
        assert_eq!(world.wave(), 1);
        assert_eq!(world.enemies().len(), 5);
        let xs: Vec<f32> = world.enemies().iter().map(|e| e.pos.x).collect();
        assert_eq!(xs, vec![50.0, 130.0, 210.0, 290.0, 370.0]);
        assert!(world.enemies().iter().all(|e| e.speed == 2.0 && e.pos.y == 30.0));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = WorldConfig::arcade();
        config.projectile.speed = 0.0;
        assert!(World::new(config, 1).is_err());
    }

    #[test]
    fn test_fire_from_nose() {
        let mut world = World::new(WorldConfig::arcade(), 1).unwrap();
        assert!(world.fire());
        let shot = &world.projectiles()[0];
        // 380 + (40 - 4) / 2, 500 - 10
        assert_eq!(shot.pos, Vec2::new(398.0, 490.0));
        assert_eq!(shot.size, Vec2::new(4.0, 10.0));
    }

    #[test]
    fn test_fire_ignored_after_game_over() {
        let mut world = World::new(WorldConfig::arcade(), 1).unwrap();
        world.game_over = true;
        assert!(!world.fire());
        assert!(world.projectiles().is_empty());
        assert_eq!(world.spawn_enemy_at(10.0, 10.0, 1.0), None);
    }

    #[test]
    fn test_spawn_rejects_bad_values() {
        let mut world = World::new(WorldConfig::arcade(), 1).unwrap();
        assert_eq!(world.spawn_enemy_at(100.0, 100.0, -3.0), None);
        assert_eq!(world.spawn_enemy_at(200.0, 100.0, f32::NAN), None);
        assert_eq!(world.spawn_enemy_at(f32::INFINITY, 100.0, 2.0), None);
        assert_eq!(world.spawn_enemy_at(10.0, f32::NAN, 2.0), None);
        assert!(world.enemies().is_empty());

        // A parked enemy is still allowed
        assert!(world.spawn_enemy_at(10.0, 10.0, 0.0).is_some());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut world = World::new(WorldConfig::arcade(), 1).unwrap();
        world.fire();
        world.fire();
        let a = world.spawn_enemy_at(0.0, 0.0, 1.0).unwrap();
        assert_eq!(world.projectiles()[0].id, 1);
        assert_eq!(world.projectiles()[1].id, 2);
        assert_eq!(a, 3);
    }

    #[test]
    fn test_player_right_wins() {
        let config = WorldConfig::arcade();
        let mut player = Player::new(&config);
        player.moving_left = true;
        player.moving_right = true;
        player.update(config.player_max_x());
        assert_eq!(player.pos.x, 386.0);
    }

    #[test]
    fn test_player_clamped() {
        let config = WorldConfig::arcade();
        let mut player = Player::new(&config);
        player.pos.x = 3.0;
        player.moving_left = true;
        player.update(config.player_max_x());
        assert_eq!(player.pos.x, 0.0);

        player.moving_left = false;
        player.moving_right = true;
        player.pos.x = 758.0;
        player.update(config.player_max_x());
        assert_eq!(player.pos.x, 760.0);
    }

    #[test]
    fn test_star_wraps_to_top() {
        let field = Vec2::new(800.0, 600.0);
        let mut rng = Pcg32::new(3, STARFIELD_STREAM);
        let mut star = Star {
            pos: Vec2::new(10.0, 599.5),
            size: 2.0,
            speed: 1.0,
        };
        star.update(field, &mut rng);
        assert_eq!(star.pos.y, 0.0);
        assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
    }

    #[test]
    fn test_random_colors_in_palette() {
        let mut rng = Pcg32::new(11, GAMEPLAY_STREAM);
        for _ in 0..100 {
            let c = Rgb::random(&mut rng);
            assert!(c.r >= 100);
            assert!(c.g >= 50);
            assert_eq!(c.b, 255 - c.g / 2);
        }
    }
}
