/// Screen-space offset applied to everything drawn in world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    pub fn new(x: f32, y: f32) -> Self {
        Camera { x, y }
    }

    /// Center the view on a world point.
    pub fn follow_target(&mut self, target_x: f32, target_y: f32, screen_w: f32, screen_h: f32) {
        self.x = -target_x + screen_w / 2.0;
        self.y = -target_y + screen_h / 2.0;
    }

    /// Keep the view inside a `map_w` x `map_h` map. Maps smaller than the screen pin to the origin.
    pub fn constrain(&mut self, map_w: f32, map_h: f32, screen_w: f32, screen_h: f32) {
        self.x = self.x.min(0.0).max((screen_w - map_w).min(0.0));
        self.y = self.y.min(0.0).max((screen_h - map_h).min(0.0));
    }
}
