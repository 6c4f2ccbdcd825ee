//! Boot screens.

mod splash;

pub use splash::run_splash_screen;
