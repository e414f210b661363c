use geo::Coord;
use macroquad::prelude::*;
use ndarray::Array1;
use shoal::simulation::ecosystem::Ecosystem;
use shoal::simulation::geometric_utils::wrapped_segments;
use shoal::simulation::params::Params;
use shoal::simulation::stats::PopulationStats;

trait ToScreen {
    type Output;
    fn to_screen(&self, params: &Params) -> Self::Output;
}

fn scale(params: &Params) -> (f32, f32) {
    (
        screen_width() / params.box_width,
        screen_height() / params.box_height,
    )
}

impl ToScreen for Array1<f32> {
    type Output = Vec2;
    fn to_screen(&self, params: &Params) -> Vec2 {
        let (scale_x, scale_y) = scale(params);
        vec2(self[0] * scale_x, self[1] * scale_y)
    }
}

impl ToScreen for Coord<f32> {
    type Output = Vec2;
    fn to_screen(&self, params: &Params) -> Vec2 {
        let (scale_x, scale_y) = scale(params);
        vec2(self.x * scale_x, self.y * scale_y)
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, params: &Params) -> f32 {
        let (scale_x, scale_y) = scale(params);
        self * scale_x.min(scale_y)
    }
}

/// Maps a screen position (e.g. the mouse cursor) into simulation coordinates.
pub fn screen_to_world(x: f32, y: f32, params: &Params) -> (f32, f32) {
    let (scale_x, scale_y) = scale(params);
    (x / scale_x, y / scale_y)
}

pub fn draw_pellets(ecosystem: &Ecosystem, params: &Params) {
    let radius = params.pellet_size.to_screen(params);
    for pellet in &ecosystem.pellets {
        let p = pellet.pos.to_screen(params);
        draw_circle(p.x, p.y, radius, YELLOW);
    }
}

pub fn draw_fish(ecosystem: &Ecosystem, params: &Params) {
    for fish in &ecosystem.fish {
        let [r, g, b, a] = fish.color;
        let color = Color::from_rgba(r, g, b, a);
        let head = fish.head(params);

        // a fish crossing an edge is drawn in two pieces
        for line in wrapped_segments(&fish.pos, &head, params.box_width, params.box_height) {
            let start = line.start.to_screen(params);
            let end = line.end.to_screen(params);
            draw_line(start.x, start.y, end.x, end.y, 1.0, color);
        }
    }
}

pub fn draw_stats_text(stats: Option<&PopulationStats>, paused: bool) {
    let font_size = 20.0;
    let mut y = 20.0;
    let mut line = |text: &str| {
        draw_text(text, 10.0, y, font_size, WHITE);
        y += 30.0;
    };

    match stats {
        Some(stats) => {
            line(&format!("Fish: {}", stats.count));
            line(&format!("Average Speed: {:.2}", stats.speed.avg));
            line(&format!(
                "Speed Range: {:.2} - {:.2}",
                stats.speed.min, stats.speed.max
            ));
            line(&format!(
                "Average Detection: {:.2}",
                stats.detection_range.avg
            ));
            line(&format!(
                "Detection Range: {:.2} - {:.2}",
                stats.detection_range.min, stats.detection_range.max
            ));
        }
        None => line("No fish remaining"),
    }

    if paused {
        line("Paused (space to resume)");
    }
}
