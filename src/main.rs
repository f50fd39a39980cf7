use quizmaster::{app::App, error, logging, Result};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let mut app = App::new()?;
    app.init()?;

    let result = app.run().await;
    app.restore()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, recoverable = error::is_recoverable(e), "application error");
        if error::is_recoverable(e) {
            eprintln!("Application error: {}", error::user_friendly_message(e));
        } else {
            eprintln!("Terminal error: {}. Try running in a different terminal.", e);
        }
        std::process::exit(1);
    }
    Ok(())
}
