pub mod sound_loader;
