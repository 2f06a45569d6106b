use anyhow::Result;
use boatyard::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        Config::generate_default_config(Config::get_default_config_path()?)?;
        return Ok(());
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e:#}");
            eprintln!("\n💡 Run `boatyard --generate-config` to write a fresh configuration file.");
            return Ok(());
        }
    };

    // Run the TUI application
    boatyard::ui::run_app(config).await?;

    Ok(())
}
