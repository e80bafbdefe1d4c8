pub mod hit;
pub mod paint;
pub mod svg;
pub mod theme;

pub use hit::hit_test;
pub use paint::{DrawCmd, Scene, SceneInput, paint_scene};
pub use svg::render_svg;
pub use theme::CanvasTheme;
