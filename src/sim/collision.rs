//! Collision detection and response for the rectangular playfield
//!
//! Pure functions over the ball, paddle and canvas bounds; the tick decides
//! what to do with the results.

use glam::Vec2;

use super::state::{Ball, Paddle};

/// A playfield edge the ball bounces off. The bottom edge is the miss zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
}

impl Wall {
    /// Surface normal pointing into the playfield
    pub fn normal(&self) -> Vec2 {
        match self {
            Wall::Left => Vec2::X,
            Wall::Right => Vec2::NEG_X,
            Wall::Top => Vec2::Y,
        }
    }
}

/// Walls the ball currently overlaps
pub fn wall_contacts(ball: &Ball, canvas_width: f32) -> Vec<Wall> {
    let mut walls = Vec::with_capacity(2);
    if ball.left() < 0.0 {
        walls.push(Wall::Left);
    } else if ball.right() > canvas_width {
        walls.push(Wall::Right);
    }
    if ball.top() < 0.0 {
        walls.push(Wall::Top);
    }
    walls
}

/// Reflect a velocity off a surface with the given normal
pub fn reflect_velocity(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

/// Bounce the ball off every wall it overlaps while heading into it.
/// Returns true if any component flipped.
pub fn bounce_off_walls(ball: &mut Ball, canvas_width: f32) -> bool {
    let mut bounced = false;
    for wall in wall_contacts(ball, canvas_width) {
        let normal = wall.normal();
        // Already heading back in: flipping again would trap the ball in the wall
        if ball.vel.dot(normal) < 0.0 {
            ball.vel = reflect_velocity(ball.vel, normal);
            bounced = true;
        }
    }
    bounced
}

/// Where along the paddle the ball touches, as a fraction in [0, 1]
/// (0 = left edge, 1 = right edge). `None` when there is no contact.
pub fn paddle_hit_fraction(ball: &Ball, paddle: &Paddle) -> Option<f32> {
    let reached = ball.bottom() >= paddle.y;
    let over = ball.pos.x >= paddle.x && ball.pos.x <= paddle.x + paddle.width;
    (reached && over).then(|| ((ball.pos.x - paddle.x) / paddle.width).clamp(0.0, 1.0))
}

/// Velocity after a paddle hit: the contact point steers the horizontal
/// speed, the ball always leaves upward.
pub fn paddle_rebound(vel: Vec2, base_speed: f32, hit_fraction: f32) -> Vec2 {
    Vec2::new(base_speed * (hit_fraction - 0.5) * 2.0, -vel.y.abs())
}

/// Ball has dropped past the bottom edge
pub fn is_miss(ball: &Ball, canvas_height: f32) -> bool {
    ball.bottom() > canvas_height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel,
            radius: 8.0,
            base_speed: 5.0,
        }
    }

    fn paddle() -> Paddle {
        Paddle {
            x: 340.0,
            y: 570.0,
            width: 120.0,
            height: 15.0,
            speed: 8.0,
        }
    }

    #[test]
    fn test_reflect_velocity() {
        let v = reflect_velocity(Vec2::new(3.0, -4.0), Vec2::Y);
        assert_eq!(v, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_wall_contacts() {
        assert!(wall_contacts(&ball_at(400.0, 300.0, Vec2::ZERO), 800.0).is_empty());
        assert_eq!(
            wall_contacts(&ball_at(5.0, 5.0, Vec2::ZERO), 800.0),
            vec![Wall::Left, Wall::Top]
        );
        assert_eq!(
            wall_contacts(&ball_at(795.0, 300.0, Vec2::ZERO), 800.0),
            vec![Wall::Right]
        );
    }

    #[test]
    fn test_bounce_off_right_wall() {
        let mut ball = ball_at(795.0, 300.0, Vec2::new(5.0, -5.0));
        assert!(bounce_off_walls(&mut ball, 800.0));
        assert_eq!(ball.vel, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_bounce_off_corner() {
        let mut ball = ball_at(4.0, 4.0, Vec2::new(-5.0, -5.0));
        assert!(bounce_off_walls(&mut ball, 800.0));
        assert_eq!(ball.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_no_double_flip_when_leaving_wall() {
        let mut ball = ball_at(795.0, 300.0, Vec2::new(-5.0, -5.0));
        assert!(!bounce_off_walls(&mut ball, 800.0));
        assert_eq!(ball.vel, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_paddle_hit_fraction() {
        let p = paddle();
        assert_eq!(paddle_hit_fraction(&ball_at(400.0, 562.0, Vec2::ZERO), &p), Some(0.5));
        assert_eq!(paddle_hit_fraction(&ball_at(340.0, 562.0, Vec2::ZERO), &p), Some(0.0));
        assert_eq!(paddle_hit_fraction(&ball_at(460.0, 562.0, Vec2::ZERO), &p), Some(1.0));
        // Above the paddle
        assert_eq!(paddle_hit_fraction(&ball_at(400.0, 561.0, Vec2::ZERO), &p), None);
        // Beside the paddle
        assert_eq!(paddle_hit_fraction(&ball_at(339.0, 565.0, Vec2::ZERO), &p), None);
    }

    #[test]
    fn test_paddle_rebound() {
        assert_eq!(
            paddle_rebound(Vec2::new(5.0, 5.0), 5.0, 0.5),
            Vec2::new(0.0, -5.0)
        );
        assert_eq!(
            paddle_rebound(Vec2::new(5.0, 5.0), 5.0, 0.0),
            Vec2::new(-5.0, -5.0)
        );
        assert_eq!(
            paddle_rebound(Vec2::new(-2.0, 5.0), 5.0, 1.0),
            Vec2::new(5.0, -5.0)
        );
        // Already moving up stays up
        assert_eq!(paddle_rebound(Vec2::new(0.0, -5.0), 5.0, 0.5).y, -5.0);
    }

    #[test]
    fn test_is_miss() {
        assert!(!is_miss(&ball_at(400.0, 592.0, Vec2::ZERO), 600.0));
        assert!(is_miss(&ball_at(400.0, 593.0, Vec2::ZERO), 600.0));
    }
}
