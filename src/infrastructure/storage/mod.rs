mod few_shot;
mod source_directory;

pub use few_shot::read_few_shot_example;
pub use source_directory::read_source_dir;
