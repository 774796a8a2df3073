use deployment_info::config::ENV_PREFIX;
use deployment_info::{AppContext, LoadStatus, Settings};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), deployment_info::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ctx = AppContext::builder()
        .with_settings(
            Settings::builder()
                .with_file("deployment-info.toml", false)
                .with_env(ENV_PREFIX)
                .build()?,
        )
        .build()?;

    let loader = ctx.loader();
    println!("file: {}", loader.json_path().display());
    println!("status: {}", loader.status());

    if loader.status() == LoadStatus::Error {
        println!("error: {}", loader.error());
        return Ok(());
    }

    println!("values: {}", loader.total());
    match loader.version() {
        Some(version) => println!("version ({}): {version}", loader.version_key()),
        None => println!("version ({}): not set", loader.version_key()),
    }

    for key in std::env::args().skip(1) {
        match loader.value_by_key(&key) {
            Some(value) => println!("{key} = {value}"),
            None => println!("{key} not found"),
        }
    }

    Ok(())
}
