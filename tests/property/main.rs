// tests/property/main.rs

mod output_paths;
