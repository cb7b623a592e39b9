use greeterd::config::GreeterConfig;
use greeterd::greeting::greet;
use greeterd::server::Server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Flip to LogSink::Structured for tracing output instead of plain lines.
    let config = GreeterConfig::default();
    config.sink.init();

    Server::new(config, greet).run()?;
    Ok(())
}
