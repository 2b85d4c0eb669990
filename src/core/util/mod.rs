pub mod partition_pixel_ranges;
