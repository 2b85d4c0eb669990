pub mod patch_sink;
