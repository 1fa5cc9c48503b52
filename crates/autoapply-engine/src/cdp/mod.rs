//! Chrome DevTools Protocol (CDP) client.
//!
//! A pure Rust CDP client: the engine talks to Chrome over its WebSocket
//! debugging endpoint using the CDP JSON-RPC protocol, with no Node.js or
//! driver-binary dependency.
//!
//! The client connects to a Chrome instance that was started with
//! `--remote-debugging-port`, creates an isolated browser context, and
//! attaches a [`PageSession`] to one page inside it:
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://127.0.0.1:9222").await?;
//! let context_id = client.create_browser_context().await?;
//! let page = client.create_page(&context_id).await?;
//! page.navigate("https://example.com").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
