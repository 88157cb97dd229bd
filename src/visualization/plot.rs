//! Static trajectory images
//!
//! Trajectories are rasterized straight into an RGB buffer: world coordinates
//! map to a square canvas centered on the origin, lines are drawn by
//! sampling one point per pixel along each segment. Images land at fixed paths
//! under `images/`.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::info;

use crate::error::Result;
use crate::simulation::analysis::{ComparisonReport, GalaxyReport};
use crate::simulation::entropy::SINGULARITY_RADIUS;
use crate::simulation::galaxy::ESCAPE_FACTOR;
use crate::simulation::states::NVec2;

pub const COMPARISON_PATH: &str = "images/orbit_comparison.png";
pub const GALAXY_PATH: &str = "images/galaxy.png";

const SIZE: u32 = 800; // square canvas, pixels

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GRAY: Rgb<u8> = Rgb([170, 170, 170]);
const BLUE: Rgb<u8> = Rgb([60, 90, 220]);
const LIGHT_BLUE: Rgb<u8> = Rgb([170, 190, 240]);
const RED: Rgb<u8> = Rgb([220, 40, 40]);
const GREEN: Rgb<u8> = Rgb([30, 160, 60]);

struct Canvas {
    img: RgbImage,
    half_extent: f64, // world units from center to edge
}

impl Canvas {
    fn new(half_extent: f64) -> Self {
        Self {
            img: RgbImage::from_pixel(SIZE, SIZE, BACKGROUND),
            half_extent: half_extent.max(1.0),
        }
    }

    /// World -> pixel, y up
    fn to_pixel(&self, p: &NVec2) -> (f64, f64) {
        let s = f64::from(SIZE) / (2.0 * self.half_extent);
        let c = f64::from(SIZE) / 2.0;
        (c + p.x * s, c - p.y * s)
    }

    fn plot(&mut self, px: f64, py: f64, color: Rgb<u8>) {
        if px < 0.0 || py < 0.0 {
            return;
        }
        let (x, y) = (px as u32, py as u32);
        if x < SIZE && y < SIZE {
            self.img.put_pixel(x, y, color);
        }
    }

    fn line(&mut self, a: &NVec2, b: &NVec2, color: Rgb<u8>) {
        let (ax, ay) = self.to_pixel(a);
        let (bx, by) = self.to_pixel(b);
        let n = (bx - ax).abs().max((by - ay).abs()).ceil().max(1.0);
        // a jump across most of the canvas is not worth drawing pixel by pixel
        if n > f64::from(SIZE) * 4.0 {
            return;
        }
        let steps = n as usize;
        for i in 0..=steps {
            let t = i as f64 / n;
            self.plot(ax + (bx - ax) * t, ay + (by - ay) * t, color);
        }
    }

    fn polyline(&mut self, pts: &[NVec2], color: Rgb<u8>) {
        for w in pts.windows(2) {
            self.line(&w[0], &w[1], color);
        }
    }

    /// Filled disc of `radius` pixels
    fn dot(&mut self, p: &NVec2, radius: i32, color: Rgb<u8>) {
        let (cx, cy) = self.to_pixel(p);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.plot(cx + f64::from(dx), cy + f64::from(dy), color);
                }
            }
        }
    }

    /// Outline of a world-space circle around the origin
    fn circle(&mut self, radius: f64, color: Rgb<u8>) {
        let segments = 720;
        let pts: Vec<NVec2> = (0..=segments)
            .map(|i| {
                let th = std::f64::consts::TAU * i as f64 / segments as f64;
                NVec2::new(radius * th.cos(), radius * th.sin())
            })
            .collect();
        self.polyline(&pts, color);
    }

    fn axes(&mut self) {
        let e = self.half_extent;
        self.line(&NVec2::new(-e, 0.0), &NVec2::new(e, 0.0), GRAY);
        self.line(&NVec2::new(0.0, -e), &NVec2::new(0.0, e), GRAY);
    }
}

fn max_extent<'a>(trajectories: impl IntoIterator<Item = &'a [NVec2]>) -> f64 {
    trajectories
        .into_iter()
        .flat_map(|t| t.iter())
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max)
}

/// Agent (blue) vs inert matter (red) around the singularity core
pub fn render_comparison(report: &ComparisonReport) -> RgbImage {
    let extent = max_extent([report.conscious.as_slice(), report.inert.as_slice()]) * 1.1;
    let mut canvas = Canvas::new(extent);

    canvas.axes();
    canvas.circle(SINGULARITY_RADIUS, BLACK);
    canvas.polyline(&report.conscious, BLUE);
    canvas.polyline(&report.inert, RED);

    if let Some(start) = report.conscious.first() {
        canvas.dot(start, 4, BLACK);
    }
    canvas.img
}

/// Particle orbits (light blue), the agent path (red) and its goal (green)
pub fn render_galaxy(report: &GalaxyReport) -> RgbImage {
    let galaxy_radius = report.galaxy_radius;
    let agent_traj = report.agent.as_ref().map(|a| a.trajectory.as_slice()).unwrap_or(&[]);
    let goal_extent = report.goal.map_or(0.0, |g| g.x.abs().max(g.y.abs()));
    let extent = max_extent([agent_traj])
        .max(goal_extent)
        .max(ESCAPE_FACTOR * galaxy_radius)
        * 1.05;
    let mut canvas = Canvas::new(extent);

    canvas.circle(galaxy_radius, GRAY);
    for t in &report.particle_trajectories {
        canvas.polyline(t, LIGHT_BLUE);
    }
    for t in &report.particle_trajectories {
        if let Some(last) = t.last() {
            canvas.dot(last, 2, BLUE);
        }
    }
    canvas.dot(&NVec2::zeros(), 5, BLACK);

    if let Some(agent) = &report.agent {
        canvas.polyline(&agent.trajectory, RED);
        if let Some(start) = agent.trajectory.first() {
            canvas.dot(start, 4, RED);
        }
        canvas.dot(&agent.final_position, 6, RED);
    }
    if let Some(goal) = report.goal {
        canvas.dot(&goal, 6, GREEN);
    }
    canvas.img
}

pub fn save_comparison(report: &ComparisonReport) -> Result<PathBuf> {
    save(&render_comparison(report), Path::new(COMPARISON_PATH))
}

pub fn save_galaxy(report: &GalaxyReport) -> Result<PathBuf> {
    save(&render_galaxy(report), Path::new(GALAXY_PATH))
}

fn save(img: &RgbImage, path: &Path) -> Result<PathBuf> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    img.save(path)?;
    info!("image saved to {}", path.display());
    Ok(path.to_path_buf())
}
