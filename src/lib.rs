// Library API shared by the CLI, the helper binaries and the wasm build
pub mod dictionary;
pub mod errors;
pub mod grid;
pub mod log;
pub mod solver;
pub mod trie;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
