pub mod cpu_compositor;
pub mod filter_store;
pub mod hsl;
