pub mod blue;
pub mod blue2;
pub mod rainbow;
