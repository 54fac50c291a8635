use macroquad::prelude::*;

use crate::tile::TILE_SIZE;

const SPRITE_SIZE: f32 = TILE_SIZE as f32;

/// Position and per-frame velocity of a 16x16 sprite.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Sprite {
    pub fn at(x: f32, y: f32) -> Self {
        Sprite {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SPRITE_SIZE, SPRITE_SIZE)
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.x + SPRITE_SIZE / 2.0, self.y + SPRITE_SIZE / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub sprite: Sprite,
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub sprite: Sprite,
    pub follows_player: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Potion {
    pub sprite: Sprite,
    pub heal_amount: u32,
}

// Strict overlap: touching edges do not collide.
fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

fn step_toward(from: f32, to: f32, speed: f32) -> f32 {
    if from < to {
        speed
    } else if from > to {
        -speed
    } else {
        0.0
    }
}

impl Enemy {
    /// Set velocity one `speed` step toward `target` on each axis. Idle enemies stand still.
    pub fn chase(&mut self, target: &Sprite, speed: f32) {
        if self.follows_player {
            self.sprite.dx = step_toward(self.sprite.x, target.x, speed);
            self.sprite.dy = step_toward(self.sprite.y, target.y, speed);
        } else {
            self.sprite.dx = 0.0;
            self.sprite.dy = 0.0;
        }
    }
}

impl Player {
    /// Drink every potion the player stands on. Returns how many were taken.
    pub fn collect_potions(&mut self, potions: &mut Vec<Potion>) -> usize {
        let me = self.sprite.rect();
        let before = potions.len();
        potions.retain(|p| {
            if overlaps(&me, &p.sprite.rect()) {
                self.health += p.heal_amount;
                false
            } else {
                true
            }
        });
        before - potions.len()
    }
}

/// Push `sprite` out of any collider it overlaps, along x, based on its horizontal motion.
pub fn resolve_horizontal(sprite: &mut Sprite, colliders: &[Rect]) {
    for c in colliders {
        if overlaps(c, &sprite.rect()) {
            if sprite.dx > 0.0 {
                sprite.x = c.x - SPRITE_SIZE;
            } else if sprite.dx < 0.0 {
                sprite.x = c.x + c.w;
            }
        }
    }
}

/// Same as [`resolve_horizontal`] for the y axis.
pub fn resolve_vertical(sprite: &mut Sprite, colliders: &[Rect]) {
    for c in colliders {
        if overlaps(c, &sprite.rect()) {
            if sprite.dy > 0.0 {
                sprite.y = c.y - SPRITE_SIZE;
            } else if sprite.dy < 0.0 {
                sprite.y = c.y + c.h;
            }
        }
    }
}
