//! Rendering module
//!
//! [`render_scene`] turns the simulation pools into primitive draw calls on
//! any [`DrawSurface`]. [`VertexBatch`] tessellates those calls into
//! triangles, and [`FlatRenderState`] puts them on screen through WebGPU.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use pipeline::FlatRenderState;
pub use vertex::Vertex;

use crate::palette;
use crate::sim::SimulationState;

/// Primitive drawing operations offered by a backend
pub trait DrawSurface {
    /// Discard the previous frame and paint the whole surface
    fn clear(&mut self, color: [f32; 4]);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [f32; 4]);
    /// Global opacity applied to subsequent fills
    fn set_alpha(&mut self, alpha: f32);
}

/// Draw one frame: background, player, bullets, enemies, asteroids, particles
pub fn render_scene(state: &SimulationState, surface: &mut impl DrawSurface) {
    surface.clear(palette::BACKGROUND);
    surface.set_alpha(1.0);

    let player = &state.player;
    surface.fill_rect(
        player.pos.x,
        player.pos.y,
        player.size.x,
        player.size.y,
        palette::PLAYER,
    );

    for bullet in &state.bullets {
        surface.fill_rect(
            bullet.pos.x,
            bullet.pos.y,
            bullet.size.x,
            bullet.size.y,
            palette::BULLET,
        );
    }

    for enemy in &state.enemies {
        surface.fill_rect(
            enemy.pos.x,
            enemy.pos.y,
            enemy.size.x,
            enemy.size.y,
            palette::ENEMY,
        );
    }

    for rock in &state.asteroids {
        let radius = rock.size / 2.0;
        surface.fill_circle(
            rock.pos.x + radius,
            rock.pos.y + radius,
            radius,
            palette::ASTEROID,
        );
    }

    for particle in &state.particles {
        surface.set_alpha(particle.alpha);
        surface.fill_rect(
            particle.pos.x,
            particle.pos.y,
            particle.size,
            particle.size,
            particle.color,
        );
        surface.set_alpha(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Asteroid, Enemy, Particle};
    use glam::Vec2;

    #[derive(Debug, Clone, PartialEq)]
    enum Draw {
        Clear([f32; 4]),
        Rect(f32, f32, f32, f32, [f32; 4]),
        Circle(f32, f32, f32, [f32; 4]),
        Alpha(f32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Draw>);

    impl DrawSurface for Recorder {
        fn clear(&mut self, color: [f32; 4]) {
            self.0.push(Draw::Clear(color));
        }
        fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) {
            self.0.push(Draw::Rect(x, y, width, height, color));
        }
        fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [f32; 4]) {
            self.0.push(Draw::Circle(cx, cy, radius, color));
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.0.push(Draw::Alpha(alpha));
        }
    }

    #[test]
    fn test_draw_order_and_shapes() {
        let config = GameConfig::default();
        let mut state = SimulationState::new(&config);
        state.enemies.push(Enemy {
            pos: Vec2::new(10.0, 20.0),
            size: Vec2::splat(40.0),
            health: 2,
        });
        state.asteroids.push(Asteroid {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            size: 30.0,
        });
        state.particles.push(Particle {
            pos: Vec2::new(5.0, 6.0),
            vel: Vec2::ZERO,
            size: 2.0,
            color: palette::ENEMY,
            alpha: 0.25,
        });

        let mut recorder = Recorder::default();
        render_scene(&state, &mut recorder);

        assert_eq!(
            recorder.0,
            vec![
                Draw::Clear(palette::BACKGROUND),
                Draw::Alpha(1.0),
                Draw::Rect(400.0, 500.0, 50.0, 50.0, palette::PLAYER),
                Draw::Rect(10.0, 20.0, 40.0, 40.0, palette::ENEMY),
                Draw::Circle(115.0, 115.0, 15.0, palette::ASTEROID),
                Draw::Alpha(0.25),
                Draw::Rect(5.0, 6.0, 2.0, 2.0, palette::ENEMY),
                Draw::Alpha(1.0),
            ]
        );
    }
}
