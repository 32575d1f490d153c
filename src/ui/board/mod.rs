pub mod current_song;
pub mod decoration;
pub mod sung_list;
