pub mod colour;
pub mod live_viewport;
pub mod pixel_buffer;
pub mod result_patch;
pub mod tile;
pub mod viewport;
