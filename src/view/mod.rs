pub mod index_renderer;
