use anyhow::Context;
use std::path::Path;
use macroquad::prelude::*;
use macroquad_tile_rpg::actor::{resolve_horizontal, resolve_vertical, Enemy, Player, Potion, Sprite};
use macroquad_tile_rpg::camera::Camera;
use macroquad_tile_rpg::{
    load_image, plan_draws, AssetConfig, DrawPlan, MapDocument, TileSet, TilesetPairing,
};

const VIEW_W: f32 = 320.0;
const VIEW_H: f32 = 240.0;
const KB_SPEED: f32 = 2.0;
const ENEMY_SPEED: f32 = 0.8;

fn window_conf() -> Conf {
    Conf {
        window_title: "Tile RPG".into(),
        window_width: 640,
        window_height: 480,
        window_resizable: true,
        ..Default::default()
    }
}

struct World {
    map: MapDocument,
    plan: DrawPlan,
    tile_textures: Vec<Vec<Texture2D>>,
    player_tex: Texture2D,
    skeleton_tex: Texture2D,
    potion_tex: Texture2D,
    player: Player,
    enemies: Vec<Enemy>,
    potions: Vec<Potion>,
    colliders: Vec<Rect>,
    camera: Camera,
    tile_size: u32,
}

fn texture(path: &str) -> anyhow::Result<Texture2D> {
    let img = load_image(Path::new(path)).with_context(|| format!("Loading sprite {}", path))?;
    let tex = Texture2D::from_image(&img);
    tex.set_filter(FilterMode::Nearest);
    Ok(tex)
}

fn tileset_textures(tilesets: &[TileSet]) -> Vec<Vec<Texture2D>> {
    tilesets
        .iter()
        .map(|ts| {
            ts.images()
                .iter()
                .map(|img| {
                    let tex = Texture2D::from_image(img);
                    tex.set_filter(FilterMode::Nearest);
                    tex
                })
                .collect()
        })
        .collect()
}

fn load_world() -> anyhow::Result<World> {
    let config = AssetConfig::default();
    let map = MapDocument::load("assets/maps/spawn-map.json").context("Loading map")?;
    let tilesets = map.build_tilesets(&config).context("Building tilesets")?;
    let plan = plan_draws(
        &map,
        &tilesets,
        &TilesetPairing::positional(&map),
        config.tile_size,
    );

    Ok(World {
        plan,
        tile_textures: tileset_textures(&tilesets),
        player_tex: texture("assets/images/NinjaSpriteSheet.png")?,
        skeleton_tex: texture("assets/images/SkeletonSpriteSheet.png")?,
        potion_tex: texture("assets/images/HealingPotion.png")?,
        player: Player {
            sprite: Sprite::at(17.0, 15.0),
            health: 100,
        },
        enemies: vec![
            Enemy { sprite: Sprite::at(50.0, 55.0), follows_player: true },
            Enemy { sprite: Sprite::at(170.0, 180.0), follows_player: true },
            Enemy { sprite: Sprite::at(100.0, 155.0), follows_player: false },
        ],
        potions: vec![
            Potion { sprite: Sprite::at(120.0, 128.0), heal_amount: 10 },
            Potion { sprite: Sprite::at(210.0, 80.0), heal_amount: 10 },
        ],
        colliders: vec![Rect::new(100.0, 100.0, 16.0, 16.0)],
        camera: Camera::default(),
        tile_size: config.tile_size,
        map,
    })
}

impl World {
    fn update(&mut self) {
        let p = &mut self.player.sprite;
        p.dx = 0.0;
        p.dy = 0.0;
        if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
            p.dx = KB_SPEED;
        }
        if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
            p.dx = -KB_SPEED;
        }
        if is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) {
            p.dy = -KB_SPEED;
        }
        if is_key_down(KeyCode::Down) || is_key_down(KeyCode::S) {
            p.dy = KB_SPEED;
        }

        p.x += p.dx;
        resolve_horizontal(p, &self.colliders);
        p.y += p.dy;
        resolve_vertical(p, &self.colliders);

        for enemy in &mut self.enemies {
            enemy.chase(&self.player.sprite, ENEMY_SPEED);
            enemy.sprite.x += enemy.sprite.dx;
            resolve_horizontal(&mut enemy.sprite, &self.colliders);
            enemy.sprite.y += enemy.sprite.dy;
            resolve_vertical(&mut enemy.sprite, &self.colliders);
        }

        self.player.collect_potions(&mut self.potions);

        let c = self.player.sprite.center();
        let size = self.map.pixel_size(self.tile_size);
        self.camera.follow_target(c.x, c.y, VIEW_W, VIEW_H);
        self.camera.constrain(size.x, size.y, VIEW_W, VIEW_H);
    }

    fn draw(&self) {
        let scale = (screen_width() / VIEW_W).min(screen_height() / VIEW_H);
        let blit = |tex: &Texture2D, src: Rect, x: f32, y: f32| {
            draw_texture_ex(
                tex,
                (x + self.camera.x) * scale,
                (y + self.camera.y) * scale,
                WHITE,
                DrawTextureParams {
                    source: Some(src),
                    dest_size: Some(vec2(src.w * scale, src.h * scale)),
                    ..Default::default()
                },
            );
        };

        clear_background(Color::from_rgba(120, 180, 255, 255));

        let ts = self.tile_size as f32;
        for cmd in &self.plan.commands {
            let tex = &self.tile_textures[cmd.tileset_index][cmd.image];
            // Tall images stand on the bottom edge of their cell.
            blit(tex, cmd.src, cmd.dest.x, cmd.dest.y + ts - cmd.src.h);
        }

        let cell = Rect::new(0.0, 0.0, ts, ts);
        blit(&self.player_tex, cell, self.player.sprite.x, self.player.sprite.y);
        for e in &self.enemies {
            blit(&self.skeleton_tex, cell, e.sprite.x, e.sprite.y);
        }
        for p in &self.potions {
            blit(&self.potion_tex, cell, p.sprite.x, p.sprite.y);
        }
        for c in &self.colliders {
            draw_rectangle_lines(
                (c.x + self.camera.x) * scale,
                (c.y + self.camera.y) * scale,
                c.w * scale,
                c.h * scale,
                1.0,
                RED,
            );
        }

        draw_text(&format!("HP: {}", self.player.health), 8.0, 20.0, 24.0, WHITE);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut world = load_world().expect("Failed to load assets");

    loop {
        world.update();
        world.draw();
        next_frame().await;
    }
}
