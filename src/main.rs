mod app;
mod assets;
mod audio;
mod camera;
mod daynight;
mod ecs;
mod input;
mod messages;
mod particles;
mod render;
mod world;


fn main() {
    env_logger::init();
    log::info!("CatGlade starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
