//! Serve command: start the web server

use anyhow::Result;

use pinpoint_server::ServerConfig;

/// Start the REST API server
pub async fn cmd_serve(host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting Pinpoint server at http://{}:{}", host, port);
    println!("   API base: http://{}:{}/api", host, port);

    pinpoint_server::serve_with_config(host, port, ServerConfig::default()).await
}
