//! WebSocket dashboard sessions
//!
//! Lets a client open dashboards and push input changes over one socket;
//! every change is answered with the full set of recomputed outputs.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Tracks active connections and enforces the limit
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8050/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'open', dashboard: 'flight-delays'}));
//!   ws.send(JSON.stringify({
//!     type: 'set_input', dashboard: 'flight-delays', input_id: 'input-year', value: '2012'
//!   }));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   console.log('Received:', msg.type);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};
