//! Command/message protocol connecting the viewport engine to the host
//! runtime and the data source (§4.3).

pub mod cmd;
pub mod intent;
pub mod msg;

pub use cmd::Cmd;
pub use intent::{Intent, SelectionOp};
pub use msg::Msg;
