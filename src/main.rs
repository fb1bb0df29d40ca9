mod app;
mod bridge;
mod config;
mod error;
mod island;
mod metadata;
mod runtime;
mod track;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
