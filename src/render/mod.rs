pub mod canvas;
pub mod renderer;
pub mod text;
