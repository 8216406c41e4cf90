//! Terminal plotting of a built scene.

pub mod ascii;

pub use ascii::render_ascii_scene;
