pub mod blur;
pub mod canvas;
pub mod rotate;
pub mod text;
