#![forbid(unsafe_code)]

mod output;

pub use output::{init_tracing, save_render_result, OutputLayers};
