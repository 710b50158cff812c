pub mod target_url;

pub use target_url::infer_build_url;
